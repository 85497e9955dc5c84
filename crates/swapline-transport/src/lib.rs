//! Swapline fragment transport
//!
//! A real navigation issues one GET for an HTML fragment (not a full
//! document). [`Transport`] is the seam; [`HttpTransport`] performs the
//! request with `reqwest`, [`MemoryTransport`] serves fragments from an
//! in-memory route table.

mod config;
mod error;
mod http;
mod memory;
mod request;

pub use config::HttpConfig;
pub use error::FetchError;
pub use http::HttpTransport;
pub use memory::{MemoryTransport, Release};
pub use request::FragmentRequest;

use futures_util::future::BoxFuture;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Fetches HTML fragments for real navigations
pub trait Transport: Send + Sync {
    /// Issue the GET described by `request` and resolve to the response body.
    fn fetch(&self, request: FragmentRequest) -> BoxFuture<'static, Result<String>>;
}
