//! HTTP transport configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum redirects followed per fetch
    pub max_redirects: usize,
    pub user_agent: String,
    /// Send `X-Requested-With: XMLHttpRequest` so servers render a fragment
    pub mark_partial_requests: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_redirects: 5,
            user_agent: concat!("swapline/", env!("CARGO_PKG_VERSION")).to_string(),
            mark_partial_requests: true,
        }
    }
}
