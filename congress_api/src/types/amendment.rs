use serde::{Deserialize, Serialize};

use super::meta::{Extra, LatestAction, Pagination};

/// Summary record from an amendment list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amendment {
    pub congress: i32,
    pub number: String,
    /// `"HAMDT"`, `"SAMDT"` or `"SUAMDT"`.
    #[serde(rename = "type")]
    pub amendment_type: String,
    pub description: Option<String>,
    pub purpose: Option<String>,
    pub latest_action: Option<LatestAction>,
    pub update_date: Option<String>,
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One page of `/amendment` results.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AmendmentsPage {
    #[serde(default)]
    pub amendments: Vec<Amendment>,
    pub pagination: Option<Pagination>,
    #[serde(flatten)]
    pub extra: Extra,
}

known_fields!(Amendment {
    "congress",
    "number",
    "type",
    "description",
    "purpose",
    "latestAction" => LatestAction,
    "updateDate",
    "url",
});
known_fields!(AmendmentsPage { "amendments" => Amendment, "pagination" => Pagination });
