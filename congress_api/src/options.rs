//! Client configuration: base URL, retry policy, paging defaults.

use std::time::Duration;

use url::Url;

use crate::Error;

/// Production Congress.gov API root.
pub const DEFAULT_BASE_URL: &str = "https://api.congress.gov/v3/";

/// Largest page the API will serve.
pub const MAX_LIMIT: i64 = 250;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How the executor retries transient failures (429, 5xx, transport errors).
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt. `0` disables retrying.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each subsequent one.
    pub base_delay: Duration,
    /// Fraction of the backoff delay added as random jitter. Clamped to `[0, 1]`.
    pub jitter_factor: f64,
    /// Honor the server's `Retry-After` header when present.
    pub respect_retry_after: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            jitter_factor: 0.2,
            respect_retry_after: true,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Read-only settings shared by the executor and every sub-client.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    base_url: Url,
    retry: RetryPolicy,
    force_json_format: bool,
    default_limit: i64,
    request_timeout: Option<Duration>,
    user_agent_suffix: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            retry: RetryPolicy::default(),
            force_json_format: true,
            default_limit: MAX_LIMIT,
            request_timeout: Some(DEFAULT_TIMEOUT),
            user_agent_suffix: None,
        }
    }
}

impl ClientOptions {
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::default()
    }

    /// Defaults overlaid with `CONGRESS_*` environment variables.
    ///
    /// Unparsable values fall back to the default; a bad base URL or an
    /// out-of-range limit is still rejected by the builder.
    pub fn from_env() -> Result<Self, Error> {
        let defaults = RetryPolicy::default();
        let mut builder = Self::builder().retry(RetryPolicy {
            max_retries: env_parse("CONGRESS_RETRY_MAX", defaults.max_retries),
            base_delay: Duration::from_millis(env_parse(
                "CONGRESS_RETRY_BASE_MS",
                defaults.base_delay.as_millis() as u64,
            )),
            jitter_factor: env_parse("CONGRESS_RETRY_JITTER", defaults.jitter_factor),
            respect_retry_after: env_parse(
                "CONGRESS_RETRY_RESPECT_AFTER",
                defaults.respect_retry_after,
            ),
        });
        if let Ok(base_url) = std::env::var("CONGRESS_API_BASE_URL") {
            builder = builder.base_url(&base_url);
        }
        builder = builder.default_limit(env_parse("CONGRESS_DEFAULT_LIMIT", MAX_LIMIT));
        if let Some(secs) = env_opt::<u64>("CONGRESS_REQUEST_TIMEOUT_SECS") {
            builder = builder.request_timeout(Some(Duration::from_secs(secs)));
        }
        builder.build()
    }

    /// API root. Always ends with `/` so relative paths join beneath it.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Whether `format=json` is forced onto every request.
    pub fn force_json_format(&self) -> bool {
        self.force_json_format
    }

    /// Page size used by streaming helpers when a query sets none.
    pub fn default_limit(&self) -> i64 {
        self.default_limit
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn user_agent_suffix(&self) -> Option<&str> {
        self.user_agent_suffix.as_deref()
    }
}

/// Builder for [`ClientOptions`]. Validation happens in [`build`](Self::build).
#[derive(Default)]
pub struct ClientOptionsBuilder {
    base_url: Option<String>,
    retry: Option<RetryPolicy>,
    force_json_format: Option<bool>,
    default_limit: Option<i64>,
    request_timeout: Option<Option<Duration>>,
    user_agent_suffix: Option<String>,
}

impl ClientOptionsBuilder {
    /// API root. A missing trailing `/` is added.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn force_json_format(mut self, force: bool) -> Self {
        self.force_json_format = Some(force);
        self
    }

    /// Page size for streaming helpers, `1..=250`.
    pub fn default_limit(mut self, limit: i64) -> Self {
        self.default_limit = Some(limit);
        self
    }

    /// Per-request transport timeout. `None` disables it.
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Appended to the default `User-Agent`.
    pub fn user_agent_suffix(mut self, suffix: &str) -> Self {
        self.user_agent_suffix = Some(suffix.to_string());
        self
    }

    pub fn build(self) -> Result<ClientOptions, Error> {
        let defaults = ClientOptions::default();

        let base_url = match self.base_url {
            Some(raw) => parse_base_url(&raw)?,
            None => defaults.base_url,
        };

        let default_limit = self.default_limit.unwrap_or(defaults.default_limit);
        if !(1..=MAX_LIMIT).contains(&default_limit) {
            return Err(Error::InvalidArgument(format!(
                "default limit must be between 1 and {MAX_LIMIT}, got {default_limit}"
            )));
        }

        Ok(ClientOptions {
            base_url,
            retry: self.retry.unwrap_or(defaults.retry),
            force_json_format: self.force_json_format.unwrap_or(defaults.force_json_format),
            default_limit,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            user_agent_suffix: self.user_agent_suffix,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| Error::InvalidArgument(format!("invalid base URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidArgument(format!(
            "base URL {raw:?} cannot have relative paths joined to it"
        )));
    }
    Ok(url)
}

fn env_opt<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.parse::<T>().ok())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_opt(key).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let opts = ClientOptions::default();
        assert_eq!(opts.base_url().as_str(), DEFAULT_BASE_URL);
        assert!(opts.force_json_format());
        assert_eq!(opts.default_limit(), 250);
        assert_eq!(opts.retry().max_retries, 3);
        assert_eq!(opts.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn trailing_slash_is_added() {
        let opts = ClientOptions::builder()
            .base_url("http://127.0.0.1:8080/v3")
            .build()
            .unwrap();
        assert_eq!(opts.base_url().as_str(), "http://127.0.0.1:8080/v3/");
        assert_eq!(
            opts.base_url().join("bill/118").unwrap().as_str(),
            "http://127.0.0.1:8080/v3/bill/118"
        );
    }

    #[test]
    fn rejects_out_of_range_limit() {
        for limit in [0, -5, 251] {
            let err = ClientOptions::builder().default_limit(limit).build();
            assert!(matches!(err, Err(Error::InvalidArgument(_))), "{limit}");
        }
    }

    #[test]
    fn rejects_garbage_base_url() {
        let err = ClientOptions::builder().base_url("not a url").build();
        assert!(matches!(err, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn builder_overrides() {
        let opts = ClientOptions::builder()
            .retry(RetryPolicy::none())
            .force_json_format(false)
            .default_limit(20)
            .request_timeout(None)
            .user_agent_suffix("my-app/1.0")
            .build()
            .unwrap();
        assert_eq!(opts.retry().max_retries, 0);
        assert!(!opts.force_json_format());
        assert_eq!(opts.default_limit(), 20);
        assert_eq!(opts.request_timeout(), None);
        assert_eq!(opts.user_agent_suffix(), Some("my-app/1.0"));
    }
}
