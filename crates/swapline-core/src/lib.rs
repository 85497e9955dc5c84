//! Swapline Core
//!
//! Wires the host surface, the fragment transport and the navigation state
//! machine into one [`Navigator`] per page.

mod config;
mod error;
mod navigator;

pub use config::Config;
pub use error::CoreError;
pub use navigator::Navigator;

// Re-export the pieces callers hold on to
pub use swapline_dom::{
    ClickEvent, Document, DomError, Element, MemoryDocument, MemoryWindow, Window,
};
pub use swapline_navigation::{
    LifecycleEvent, NavigationConfig, NavigationDescriptor, NavigationError, NavigationHandle,
    NavigationOutcome, Restore,
};
pub use swapline_transport::{
    FetchError, FragmentRequest, HttpConfig, HttpTransport, MemoryTransport, Transport,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
