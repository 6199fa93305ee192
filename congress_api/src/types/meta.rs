use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unrecognized JSON fields, kept verbatim so newer API fields survive a
/// deserialize/serialize round trip.
pub type Extra = Map<String, Value>;

/// Paging block attached to every list response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of matching records.
    #[serde(default)]
    pub count: i64,
    /// URL of the next page, absent on the last one.
    pub next: Option<String>,
    pub prev: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Most recent action taken on a bill or amendment.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestAction {
    pub action_date: Option<NaiveDate>,
    pub action_time: Option<String>,
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{"count": .., "url": ..}` reference to a related collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountRef {
    #[serde(default)]
    pub count: i64,
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

known_fields!(Pagination { "count", "next", "prev" });
known_fields!(LatestAction { "actionDate", "actionTime", "text" });
known_fields!(CountRef { "count", "url" });
