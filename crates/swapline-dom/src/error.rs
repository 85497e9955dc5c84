//! DOM error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
