//! Fetch error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        if err.is_timeout() {
            FetchError::Timeout(url)
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
                url,
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
