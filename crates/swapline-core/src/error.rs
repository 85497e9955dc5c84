//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Navigation error: {0}")]
    Navigation(#[from] swapline_navigation::NavigationError),

    #[error("Transport error: {0}")]
    Transport(#[from] swapline_transport::FetchError),

    #[error("DOM error: {0}")]
    Dom(#[from] swapline_dom::DomError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
