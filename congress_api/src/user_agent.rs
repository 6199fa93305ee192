//! `User-Agent` header value sent with every request.

const BASE: &str = concat!("congress_api/", env!("CARGO_PKG_VERSION"));

/// Crate name and version, followed by the caller's suffix when set.
pub(crate) fn user_agent(suffix: Option<&str>) -> String {
    match suffix.map(str::trim).filter(|s| !s.is_empty()) {
        Some(suffix) => format!("{BASE} {suffix}"),
        None => BASE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_appended() {
        assert!(user_agent(None).starts_with("congress_api/"));
        assert!(user_agent(Some("my-app/2.0")).ends_with(" my-app/2.0"));
        assert_eq!(user_agent(Some("  ")), user_agent(None));
    }
}
