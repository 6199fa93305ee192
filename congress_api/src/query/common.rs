//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`SortDirection`].

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};

use crate::{Error, QueryParams};

/// Format the API expects for `fromDateTime` / `toDateTime`.
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Trait implemented by all query builders. Provides the request route,
/// parameter serialization, and shared builder methods for paging, date
/// filtering, and sort direction.
pub trait Query {
    /// Route relative to the API root, e.g. `bill/118/hr`.
    fn path(&self) -> Result<String, Error>;

    /// Filter parameters without `offset`/`limit`. Streaming helpers add the
    /// paging pair themselves.
    fn filter_params(&self) -> QueryParams;

    /// Returns a reference to the common query fields.
    fn common(&self) -> &QueryCommon;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// All parameters for a single-page request.
    fn to_params(&self) -> QueryParams {
        let mut params = self.common().page_params();
        params.merge(&self.filter_params());
        params
    }

    /// Sets the index of the first record to return.
    fn with_offset(mut self, offset: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().offset = offset;
        self
    }

    /// Sets the number of records per page (API maximum 250).
    fn with_limit(mut self, limit: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }

    /// Only records updated at or after this instant.
    fn with_from_date_time<Tz: TimeZone>(mut self, from: DateTime<Tz>) -> Self
    where
        Self: Sized,
    {
        self.get_common().from_date_time = Some(from.with_timezone(&Utc));
        self
    }

    /// Only records updated at or before this instant.
    fn with_to_date_time<Tz: TimeZone>(mut self, to: DateTime<Tz>) -> Self
    where
        Self: Sized,
    {
        self.get_common().to_date_time = Some(to.with_timezone(&Utc));
        self
    }

    /// Sorts by update date in the given direction.
    fn with_sort(mut self, sort: SortDirection) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort = Some(sort);
        self
    }
}

/// Sort order for API results, applied to the update date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (oldest first).
    Asc,
    /// Descending order (newest first). This is the API default.
    #[default]
    Desc,
}

impl SortDirection {
    /// Value of the `sort` parameter. The space is sent as `+`.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortDirection::Asc => "updateDate asc",
            SortDirection::Desc => "updateDate desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction {other:?}")),
        }
    }
}

/// Fields shared by all query types: paging, update-date window, and sort.
#[derive(Clone, Debug, Default)]
pub struct QueryCommon {
    /// Index of the first record. Defaults to 0.
    pub offset: i64,
    /// Records per page. `None` uses the API default for single-page calls
    /// and the client's default limit when streaming.
    pub limit: Option<i64>,
    pub from_date_time: Option<DateTime<Utc>>,
    pub to_date_time: Option<DateTime<Utc>>,
    /// Sort direction. `None` leaves ordering to the API.
    pub sort: Option<SortDirection>,
}

impl QueryCommon {
    /// `offset` and, when set, `limit`.
    pub fn page_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.set("offset", Some(self.offset.max(0).to_string()));
        params.set("limit", self.limit.map(|l| l.to_string()));
        params
    }

    /// Date window and sort.
    pub fn filter_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.set("fromDateTime", self.from_date_time.map(format_date_time));
        params.set("toDateTime", self.to_date_time.map(format_date_time));
        params.set("sort", self.sort.map(|s| s.as_param().to_string()));
        params
    }
}

fn format_date_time(at: DateTime<Utc>) -> String {
    at.format(DATE_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn sort_is_form_encoded_with_plus() {
        let common = QueryCommon {
            sort: Some(SortDirection::Asc),
            ..Default::default()
        };
        let mut url = Url::parse("https://api.congress.gov/v3/bill").unwrap();
        common.filter_params().apply_to(&mut url);
        assert_eq!(url.query(), Some("sort=updateDate+asc"));
    }

    #[test]
    fn unset_fields_are_left_out() {
        let common = QueryCommon::default();
        assert!(common.filter_params().is_empty());
        let params = common.page_params();
        let page: Vec<_> = params.iter().collect();
        assert_eq!(page, [("offset", "0")]);
    }

    #[test]
    fn date_format_has_no_fraction_or_offset() {
        let at = Utc.with_ymd_and_hms(2024, 2, 29, 6, 7, 8).unwrap();
        assert_eq!(format_date_time(at), "2024-02-29T06:07:08Z");
    }
}
