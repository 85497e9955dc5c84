//! Fragment request description

use serde::{Deserialize, Serialize};
use url::Url;

/// A GET for an HTML fragment: the page URL plus extra query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentRequest {
    /// Absolute page URL, hash removed
    pub url: Url,
    /// Query parameters appended after any search already in `url`
    pub query: Vec<(String, String)>,
}

impl FragmentRequest {
    pub fn new(mut url: Url) -> Self {
        url.set_fragment(None);
        Self {
            url,
            query: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// URL actually requested on the wire
    pub fn target(&self) -> Url {
        let mut target = self.url.clone();
        if !self.query.is_empty() {
            let mut pairs = target.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        target
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }
}
