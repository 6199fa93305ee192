//! Backoff arithmetic and the cancellable sleep used between retries.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use tokio_util::sync::CancellationToken;

use crate::{Error, RetryPolicy};

/// Statuses worth retrying: rate limiting and any server error.
pub(crate) fn is_transient_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Parses a `Retry-After` value, either delta-seconds or an HTTP-date.
///
/// Dates are measured from `now`; one that is not in the future yields
/// `None` so the caller falls back to exponential backoff.
pub(crate) fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    (at - now).to_std().ok().filter(|d| !d.is_zero())
}

pub(crate) fn retry_after_header(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| parse_retry_after(v, Utc::now()))
}

impl RetryPolicy {
    /// `base_delay * 2^(attempt-1)` plus `jitter_factor * unit` of that
    /// delay. `attempt` is 1 for the first retry; `unit` is a draw from `[0, 1)`.
    pub fn backoff_delay(&self, attempt: u32, unit: f64) -> Duration {
        let shift = attempt.saturating_sub(1).min(30);
        let delay = self.base_delay.saturating_mul(1u32 << shift);
        let jitter = self.jitter_factor.clamp(0.0, 1.0) * unit.clamp(0.0, 1.0);
        let extra = Duration::try_from_secs_f64(delay.as_secs_f64() * jitter).unwrap_or_default();
        delay.saturating_add(extra)
    }

    /// Delay before retry number `attempt`. A server-supplied `Retry-After`
    /// wins when the policy respects it.
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(wait) if self.respect_retry_after => wait,
            _ => self.backoff_delay(attempt, rand::thread_rng().gen::<f64>()),
        }
    }
}

/// Sleeps for `delay` unless `cancel` fires first.
pub(crate) async fn sleep_or_cancel(
    delay: Duration,
    cancel: &CancellationToken,
) -> Result<(), Error> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(Error::Cancelled),
        _ = tokio::time::sleep(delay) => {}
    }
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    Ok(())
}
