//! Error types for the API client.

/// Maximum number of body characters kept on an [`Error::HttpStatus`].
pub(crate) const MAX_BODY_CHARS: usize = 2000;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A caller-supplied argument was rejected before any network activity.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The API returned a non-success status that was not retried, or was
    /// retried until the policy gave up.
    #[error(
        "{method} {url} failed with status {status} {reason}{}{}",
        request_id_suffix(.request_id),
        body_suffix(.body)
    )]
    HttpStatus {
        status: u16,
        reason: String,
        method: String,
        /// Final request URL with the API key redacted.
        url: String,
        /// Upstream `x-request-id`, when the server sent one.
        request_id: Option<String>,
        /// Response body, truncated for diagnostics.
        body: String,
    },
    /// No response was obtained (connect failure, timeout, broken body).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response body could not be parsed into the expected shape.
    #[error("Failed to parse response: {0}")]
    Deserialization(String),
    /// The caller's cancellation token fired.
    #[error("Operation cancelled")]
    Cancelled,
}

impl Error {
    /// Whether this error came from a response the retry loop classifies as
    /// transient (429 or 5xx) or from the transport layer.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::HttpStatus { status, .. } => crate::retry::is_transient_status(*status),
            Error::Transport(_) => true,
            _ => false,
        }
    }

    /// HTTP status code for [`Error::HttpStatus`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

fn request_id_suffix(request_id: &Option<String>) -> String {
    match request_id {
        Some(id) => format!(" (request id {id})"),
        None => String::new(),
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// Truncates a response body to [`MAX_BODY_CHARS`] characters.
pub(crate) fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_CHARS) {
        None => body.to_string(),
        Some((idx, _)) => format!("{}...[truncated]", &body[..idx]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "é".repeat(MAX_BODY_CHARS + 10);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("...[truncated]"));
        assert_eq!(
            cut.trim_end_matches("...[truncated]").chars().count(),
            MAX_BODY_CHARS
        );
    }

    #[test]
    fn http_status_message_includes_request_id() {
        let err = Error::HttpStatus {
            status: 404,
            reason: "Not Found".to_string(),
            method: "GET".to_string(),
            url: "https://api.congress.gov/v3/bill?api_key=REDACTED".to_string(),
            request_id: Some("abc-123".to_string()),
            body: "missing".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404 Not Found"));
        assert!(msg.contains("request id abc-123"));
        assert!(msg.ends_with(": missing"));
        assert!(!err.is_transient());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn rate_limited_is_transient() {
        let err = Error::HttpStatus {
            status: 429,
            reason: String::new(),
            method: "GET".to_string(),
            url: String::new(),
            request_id: None,
            body: String::new(),
        };
        assert!(err.is_transient());
        assert!(!Error::Cancelled.is_transient());
        assert!(Error::Cancelled.is_cancelled());
    }
}
