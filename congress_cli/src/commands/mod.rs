//! CLI subcommand implementations.

pub mod amendments;
pub mod bills;
pub mod members;

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Parses `--from`/`--to` values. Accepts RFC 3339 timestamps or plain
/// `YYYY-MM-DD` dates; a date becomes the start of that day, or its last
/// second when `end_of_day` is set.
pub fn parse_date_bound(value: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    let date = match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => bail!("invalid date {:?}: expected YYYY-MM-DD or RFC 3339", value),
    };
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    };
    match time {
        Some(time) => Ok(date.and_time(time).and_utc()),
        None => bail!("invalid time of day"),
    }
}

/// Page size for a capped listing: never larger than the cap itself.
pub fn page_limit(limit: i64, max: usize) -> Result<i64> {
    if !(1..=congress_api::MAX_LIMIT).contains(&limit) {
        bail!("--limit must be between 1 and {}", congress_api::MAX_LIMIT);
    }
    if max == 0 {
        bail!("--max must be at least 1");
    }
    Ok(limit.min(max as i64))
}
