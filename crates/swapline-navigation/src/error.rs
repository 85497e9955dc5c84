//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] swapline_transport::FetchError),

    #[error("DOM error: {0}")]
    Dom(#[from] swapline_dom::DomError),

    #[error("History state error: {0}")]
    State(#[from] serde_json::Error),

    #[error("Navigation abandoned before it settled")]
    Abandoned,
}
