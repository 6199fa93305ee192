//! Query-string parameters with case-insensitive keys.

use url::Url;

/// Query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "api_key";
/// Query parameter selecting the response format.
pub const FORMAT_PARAM: &str = "format";

/// Ordered query parameters. Keys compare case-insensitively and the last
/// write for a key wins. A `None` value keeps the key out of the final URL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`, keeping the position of an existing entry.
    pub fn set(&mut self, key: &str, value: impl Into<Option<String>>) -> &mut Self {
        let value = value.into();
        match self
            .pairs
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some(slot) => *slot = (key.to_string(), value),
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.set(key, Some(value.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
    }

    /// Merges `other` into `self`; values from `other` win.
    pub fn merge(&mut self, other: &QueryParams) {
        for (k, v) in &other.pairs {
            self.set(k, v.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.iter().all(|(_, v)| v.is_none())
    }

    /// Pairs that will actually be sent, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    /// Parses the query string already present on `url`.
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::new();
        for (k, v) in url.query_pairs() {
            params.set(&k, Some(v.into_owned()));
        }
        params
    }

    /// Replaces the query string of `url` with these parameters.
    pub fn apply_to(&self, url: &mut Url) {
        url.set_query(None);
        if self.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (k, v) in self.iter() {
            pairs.append_pair(k, v);
        }
    }
}

/// Rewrites `url` so it carries `api_key` and, when `force_json` is set,
/// `format=json`. Caller-supplied values for those keys, in any letter case,
/// are dropped; every other parameter is kept in order.
pub(crate) fn inject_auth(url: &mut Url, api_key: &str, force_json: bool) {
    let mut params = QueryParams::from_url(url);
    params.remove(API_KEY_PARAM);
    if force_json {
        params.remove(FORMAT_PARAM);
    }
    params.set(API_KEY_PARAM, Some(api_key.to_string()));
    if force_json {
        params.set(FORMAT_PARAM, Some("json".to_string()));
    }
    params.apply_to(url);
}

/// `url` as a string with the API key value masked, for logs and errors.
pub(crate) fn redact(url: &Url) -> String {
    let mut params = QueryParams::from_url(url);
    if params.get(API_KEY_PARAM).is_none() {
        return url.to_string();
    }
    params.set(API_KEY_PARAM, Some("REDACTED".to_string()));
    let mut redacted = url.clone();
    params.apply_to(&mut redacted);
    redacted.to_string()
}

impl<K: AsRef<str>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.set(k.as_ref(), Some(v.to_string()));
        }
        params
    }
}
