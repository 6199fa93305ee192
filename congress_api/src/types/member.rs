//! Member types returned by the `/member` endpoints.

use serde::{Deserialize, Serialize};

use super::meta::{Extra, Pagination};

/// Bioguide identifier, e.g. `"L000174"`.
pub type BioguideId = String;

/// Official portrait reference.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Depiction {
    pub image_url: Option<String>,
    pub attribution: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Summary record from a member list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub bioguide_id: BioguideId,
    /// Display name, "Last, First M.".
    pub name: Option<String>,
    pub party_name: Option<String>,
    pub state: Option<String>,
    pub district: Option<i32>,
    pub depiction: Option<Depiction>,
    pub update_date: Option<String>,
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Full record from `/member/{bioguideId}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetail {
    pub bioguide_id: BioguideId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub direct_order_name: Option<String>,
    pub birth_year: Option<String>,
    pub current_member: Option<bool>,
    pub state: Option<String>,
    pub depiction: Option<Depiction>,
    pub update_date: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One page of `/member` results.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MembersPage {
    #[serde(default)]
    pub members: Vec<Member>,
    pub pagination: Option<Pagination>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Envelope of a single-member response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberResponse {
    pub member: MemberDetail,
    #[serde(flatten)]
    pub extra: Extra,
}

known_fields!(Depiction { "imageUrl", "attribution" });
known_fields!(Member {
    "bioguideId",
    "name",
    "partyName",
    "state",
    "district",
    "depiction" => Depiction,
    "updateDate",
    "url",
});
known_fields!(MemberDetail {
    "bioguideId",
    "firstName",
    "lastName",
    "directOrderName",
    "birthYear",
    "currentMember",
    "state",
    "depiction" => Depiction,
    "updateDate",
});
known_fields!(MembersPage { "members" => Member, "pagination" => Pagination });
known_fields!(MemberResponse { "member" => MemberDetail });
