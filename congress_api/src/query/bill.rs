use crate::types::BillType;
use crate::{Error, QueryParams};

use super::common::{Query, QueryCommon};

/// Filters for the `/bill` list endpoints.
#[derive(Clone, Debug, Default)]
pub struct BillQuery {
    pub common: QueryCommon,
    pub congress: Option<u32>,
    pub bill_type: Option<BillType>,
}

impl Query for BillQuery {
    fn path(&self) -> Result<String, Error> {
        match (self.congress, self.bill_type) {
            (None, None) => Ok("bill".to_string()),
            (Some(congress), None) => Ok(format!("bill/{congress}")),
            (Some(congress), Some(bill_type)) => Ok(format!("bill/{congress}/{bill_type}")),
            (None, Some(bill_type)) => Err(Error::InvalidArgument(format!(
                "filtering by bill type {bill_type} requires a congress"
            ))),
        }
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

impl BillQuery {
    pub fn with_congress(mut self, congress: u32) -> Self {
        self.congress = Some(congress);
        self
    }

    pub fn with_bill_type(mut self, bill_type: BillType) -> Self {
        self.bill_type = Some(bill_type);
        self
    }
}
