use crate::{Error, QueryParams};

use super::common::{Query, QueryCommon};

/// Filters for the `/member` list endpoints.
#[derive(Clone, Debug, Default)]
pub struct MemberQuery {
    pub common: QueryCommon,
    pub congress: Option<u32>,
    /// Two-letter state code.
    pub state: Option<String>,
    pub district: Option<u32>,
    /// Only members currently serving.
    pub current_member: Option<bool>,
}

impl Query for MemberQuery {
    fn path(&self) -> Result<String, Error> {
        match (self.congress, self.state.as_deref(), self.district) {
            (None, None, None) => Ok("member".to_string()),
            (Some(congress), None, None) => Ok(format!("member/congress/{congress}")),
            (None, Some(state), None) => Ok(format!("member/{state}")),
            (None, Some(state), Some(district)) => Ok(format!("member/{state}/{district}")),
            (Some(congress), Some(state), Some(district)) => {
                Ok(format!("member/congress/{congress}/{state}/{district}"))
            }
            (Some(_), Some(_), None) => Err(Error::InvalidArgument(
                "filtering a congress by state also requires a district".to_string(),
            )),
            (_, None, Some(_)) => Err(Error::InvalidArgument(
                "filtering by district requires a state".to_string(),
            )),
        }
    }

    fn filter_params(&self) -> QueryParams {
        let mut params = self.common.filter_params();
        params.set("currentMember", self.current_member.map(|c| c.to_string()));
        params
    }

    fn common(&self) -> &QueryCommon {
        &self.common
    }

    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl MemberQuery {
    pub fn with_congress(mut self, congress: u32) -> Self {
        self.congress = Some(congress);
        self
    }

    /// Normalized to upper case.
    pub fn with_state(mut self, state: &str) -> Self {
        self.state = Some(state.trim().to_ascii_uppercase());
        self
    }

    pub fn with_district(mut self, district: u32) -> Self {
        self.district = Some(district);
        self
    }

    pub fn with_current_member(mut self, current: bool) -> Self {
        self.current_member = Some(current);
        self
    }
}
