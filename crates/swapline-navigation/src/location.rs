//! Location helpers
//!
//! The navigation state machine compares locations as `path + search`
//! strings, with the hash kept alongside but ignored for the comparison.

use url::Url;

/// `path + search + hash` of a location, as the address bar shows it
/// relative to the origin. An empty hash is dropped, matching `location.hash`.
pub fn relative(url: &Url) -> String {
    let mut out = path_and_search(url);
    if let Some(fragment) = url.fragment().filter(|f| !f.is_empty()) {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// `path + search` of a location
pub fn path_and_search(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Portion of a relative location before the first `#`
pub fn strip_hash(location: &str) -> &str {
    location.split('#').next().unwrap_or(location)
}

/// Non-empty hash fragment of a location, without the leading `#`
pub fn hash(url: &Url) -> Option<&str> {
    url.fragment().filter(|f| !f.is_empty())
}

pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}
