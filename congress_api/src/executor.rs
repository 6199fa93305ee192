//! Authenticated request execution with retry and backoff.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::errors::truncate_body;
use crate::params::{self, QueryParams};
use crate::retry::{self, sleep_or_cancel};
use crate::types::KnownFields;
use crate::user_agent::user_agent;
use crate::{ClientOptions, Error};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// One outbound request before auth injection.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Sends requests to the API, guaranteeing `api_key` (and `format=json`
/// when configured) on every URL and retrying transient failures.
///
/// Immutable after construction; share it behind an `Arc` across tasks.
pub struct RequestExecutor {
    http: reqwest::Client,
    options: Arc<ClientOptions>,
    api_key: String,
}

impl RequestExecutor {
    /// Builds an executor with its own connection pool, configured with the
    /// options' timeout and user agent.
    pub fn new(api_key: impl Into<String>, options: Arc<ClientOptions>) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent(options.user_agent_suffix()));
        if let Some(timeout) = options.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::Transport(e)
        })?;
        Ok(Self::with_http_client(http, api_key, options))
    }

    /// Uses a caller-provided transport as is.
    pub fn with_http_client(
        http: reqwest::Client,
        api_key: impl Into<String>,
        options: Arc<ClientOptions>,
    ) -> Self {
        Self {
            http,
            options,
            api_key: api_key.into(),
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Absolute URL for `relative_path` under the base URL, with `query`
    /// merged over any parameters already in the path.
    pub fn url_for(&self, relative_path: &str, query: &QueryParams) -> Result<Url, Error> {
        let mut url = self
            .options
            .base_url()
            .join(relative_path.trim_start_matches('/'))
            .map_err(|e| {
                Error::InvalidArgument(format!("invalid request path {relative_path:?}: {e}"))
            })?;
        let mut merged = QueryParams::from_url(&url);
        merged.merge(query);
        merged.apply_to(&mut url);
        Ok(url)
    }

    /// Sends `request`, retrying 429/5xx responses and transport failures
    /// per the retry policy. Returns the first 2xx response.
    pub async fn send(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Response, Error> {
        let ApiRequest {
            method,
            mut url,
            headers,
        } = request;
        params::inject_auth(&mut url, &self.api_key, self.options.force_json_format());
        let shown = params::redact(&url);
        let policy = self.options.retry();

        let mut attempt: u32 = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            attempt += 1;
            tracing::debug!("{} {} (attempt {})", method, shown, attempt);

            let pending = self
                .http
                .request(method.clone(), url.clone())
                .header(ACCEPT, "application/json")
                .headers(headers.clone())
                .send();
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                outcome = pending => outcome,
            };

            let can_retry = attempt <= policy.max_retries;
            let delay = match outcome {
                Ok(resp) if resp.status().is_success() => return Ok(resp),
                Ok(resp) if can_retry && retry::is_transient_status(resp.status().as_u16()) => {
                    let retry_after = retry::retry_after_header(resp.headers());
                    let status = resp.status();
                    drop(resp);
                    let delay = policy.delay_for(attempt, retry_after);
                    tracing::warn!(
                        "{} {} returned {} (attempt {}/{}), retrying in {:.1}s",
                        method,
                        shown,
                        status,
                        attempt,
                        policy.max_retries + 1,
                        delay.as_secs_f64()
                    );
                    delay
                }
                Ok(resp) => return Err(http_failure(&method, &shown, resp, cancel).await),
                Err(e) if can_retry => {
                    let delay = policy.delay_for(attempt, None);
                    tracing::warn!(
                        "{} {} failed (attempt {}/{}): {}, retrying in {:.1}s",
                        method,
                        shown,
                        attempt,
                        policy.max_retries + 1,
                        e.without_url(),
                        delay.as_secs_f64()
                    );
                    delay
                }
                Err(e) => return Err(Error::Transport(e.without_url())),
            };
            sleep_or_cancel(delay, cancel).await?;
        }
    }

    /// GETs `relative_path` with `query` and deserializes the JSON body.
    /// Known fields of `T` match regardless of key case.
    pub async fn get_json<T: DeserializeOwned + KnownFields>(
        &self,
        relative_path: &str,
        query: &QueryParams,
        cancel: &CancellationToken,
    ) -> Result<T, Error> {
        let url = self.url_for(relative_path, query)?;
        let resp = self.send(ApiRequest::get(url), cancel).await?;
        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            body = resp.text() => body.map_err(|e| Error::Transport(e.without_url()))?,
        };
        decode_json(&body)
    }
}

/// Parses a response body, rejecting empty bodies and a bare `null`.
pub(crate) fn decode_json<T: DeserializeOwned + KnownFields>(body: &str) -> Result<T, Error> {
    if body.trim().is_empty() {
        return Err(Error::Deserialization("empty response body".to_string()));
    }
    let mut value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        tracing::debug!("Malformed JSON: {} | body: {}", e, truncate_body(body));
        Error::Deserialization(e.to_string())
    })?;
    if value.is_null() {
        return Err(Error::Deserialization("response body was null".to_string()));
    }
    T::normalize_keys(&mut value);
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!("Unexpected shape: {} | body: {}", e, truncate_body(body));
        Error::Deserialization(e.to_string())
    })
}

async fn http_failure(
    method: &Method,
    url: &str,
    resp: Response,
    cancel: &CancellationToken,
) -> Error {
    let status = resp.status();
    let request_id = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Error::Cancelled,
        body = resp.text() => match body {
            Ok(body) => body,
            Err(e) => {
                let e = e.without_url();
                tracing::debug!("Failed to read error body from {}: {}", url, e);
                format!("<body unavailable: {}>", e)
            }
        },
    };
    Error::HttpStatus {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        method: method.to_string(),
        url: url.to_string(),
        request_id,
        body: truncate_body(&body),
    }
}
