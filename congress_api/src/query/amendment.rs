use crate::{Error, QueryParams};

use super::common::{Query, QueryCommon};

/// Filters for the `/amendment` list endpoints.
#[derive(Clone, Debug, Default)]
pub struct AmendmentQuery {
    pub common: QueryCommon,
    pub congress: Option<u32>,
}

impl Query for AmendmentQuery {
    fn path(&self) -> Result<String, Error> {
        Ok(match self.congress {
            Some(congress) => format!("amendment/{congress}"),
            None => "amendment".to_string(),
        })
    }

    fn filter_params(&self) -> QueryParams {
        self.common.filter_params()
    }

    fn common(&self) -> &QueryCommon {
        &self.common
    }

    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl AmendmentQuery {
    pub fn with_congress(mut self, congress: u32) -> Self {
        self.congress = Some(congress);
        self
    }
}
