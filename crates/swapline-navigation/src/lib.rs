//! Swapline navigation
//!
//! Turns clicks on marked anchors into partial page loads while keeping the
//! session history consistent:
//! - [`LinkInterceptor`]: delegated click handling for `a[data-ajax]`
//! - [`HistoryStateManager`]: `pushState` entry point, commits through a
//!   [`CommitStrategy`] chosen once from the window's capabilities
//! - [`NavigationExecutor`]: restore handler doing fetch + swap, hash-only
//!   adjustment, or nothing
//! - [`EventBus`]: `beforePageLoad` / `pageLoaded` lifecycle events
//!
//! ```text
//! click → LinkInterceptor → HistoryStateManager → push + synthetic restore
//!                                                        ↓
//! back/forward ──────────────────────────────→ NavigationExecutor → EventBus
//! ```

mod completion;
mod config;
mod descriptor;
mod entry;
mod error;
mod events;
mod executor;
mod history;
mod interceptor;
pub mod location;
mod session;

pub use completion::{Completion, NavigationHandle, NavigationOutcome};
pub use config::NavigationConfig;
pub use descriptor::{Callback, NavigationDescriptor};
pub use entry::HistoryEntry;
pub use error::NavigationError;
pub use events::{EventBus, LifecycleEvent};
pub use executor::{NavigationExecutor, Restore};
pub use history::{CommitStrategy, FullReload, HistoryStateManager, PushHistory};
pub use interceptor::LinkInterceptor;
pub use session::NavigationSession;

pub type Result<T> = std::result::Result<T, NavigationError>;

#[cfg(test)]
mod testing;
