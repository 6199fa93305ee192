//! Bill types returned by the `/bill` endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::meta::{CountRef, Extra, LatestAction, Pagination};

/// Legislation type, as used in request paths (`/bill/118/hr`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BillType {
    /// House bill.
    Hr,
    /// Senate bill.
    S,
    HJRes,
    SJRes,
    HConRes,
    SConRes,
    HRes,
    SRes,
}

impl BillType {
    pub const ALL: [BillType; 8] = [
        BillType::Hr,
        BillType::S,
        BillType::HJRes,
        BillType::SJRes,
        BillType::HConRes,
        BillType::SConRes,
        BillType::HRes,
        BillType::SRes,
    ];

    /// Lowercase code used in request paths.
    pub fn as_path(&self) -> &'static str {
        match self {
            BillType::Hr => "hr",
            BillType::S => "s",
            BillType::HJRes => "hjres",
            BillType::SJRes => "sjres",
            BillType::HConRes => "hconres",
            BillType::SConRes => "sconres",
            BillType::HRes => "hres",
            BillType::SRes => "sres",
        }
    }
}

impl fmt::Display for BillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Case-insensitive: accepts both `hr` (paths) and `HR` (response bodies).
impl FromStr for BillType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BillType::ALL
            .into_iter()
            .find(|t| t.as_path().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown bill type {s:?}"))
    }
}

/// Summary record from a bill list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub congress: i32,
    /// Bill number within its type, e.g. `"3076"`.
    pub number: String,
    /// Upper-case type code as sent by the API, e.g. `"HR"`.
    #[serde(rename = "type")]
    pub bill_type: String,
    pub title: Option<String>,
    pub origin_chamber: Option<String>,
    pub origin_chamber_code: Option<String>,
    pub latest_action: Option<LatestAction>,
    pub update_date: Option<String>,
    pub update_date_including_text: Option<String>,
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Bill {
    /// Parsed [`BillType`], if the API sent a known code.
    pub fn kind(&self) -> Option<BillType> {
        self.bill_type.parse().ok()
    }
}

/// Sponsor entry on a bill detail record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    pub bioguide_id: String,
    pub full_name: Option<String>,
    pub party: Option<String>,
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Full record from `/bill/{congress}/{type}/{number}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDetail {
    pub congress: i32,
    pub number: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub title: Option<String>,
    pub introduced_date: Option<String>,
    pub origin_chamber: Option<String>,
    #[serde(default)]
    pub sponsors: Vec<Sponsor>,
    pub cosponsors: Option<CountRef>,
    pub actions: Option<CountRef>,
    pub latest_action: Option<LatestAction>,
    pub update_date: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One page of `/bill` results.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BillsPage {
    #[serde(default)]
    pub bills: Vec<Bill>,
    pub pagination: Option<Pagination>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Envelope of a single-bill response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BillResponse {
    pub bill: BillDetail,
    #[serde(flatten)]
    pub extra: Extra,
}

known_fields!(Bill {
    "congress",
    "number",
    "type",
    "title",
    "originChamber",
    "originChamberCode",
    "latestAction" => LatestAction,
    "updateDate",
    "updateDateIncludingText",
    "url",
});
known_fields!(Sponsor { "bioguideId", "fullName", "party", "state" });
known_fields!(BillDetail {
    "congress",
    "number",
    "type",
    "title",
    "introducedDate",
    "originChamber",
    "sponsors" => Sponsor,
    "cosponsors" => CountRef,
    "actions" => CountRef,
    "latestAction" => LatestAction,
    "updateDate",
});
known_fields!(BillsPage { "bills" => Bill, "pagination" => Pagination });
known_fields!(BillResponse { "bill" => BillDetail });
