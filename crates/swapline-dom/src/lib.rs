//! Swapline host surface
//!
//! The navigation core never touches a real DOM or browser window directly.
//! It talks to the two traits exported here:
//! - [`Document`]: container replacement, root namespace classes, scroll
//! - [`Window`]: location, session history, hash reassignment, real page loads
//!
//! [`MemoryDocument`] and [`MemoryWindow`] are headless implementations used
//! for tests and offline hosts.

mod document;
mod element;
mod error;
mod window;

pub use document::{Document, MemoryDocument};
pub use element::{ClickEvent, Element};
pub use error::DomError;
pub use window::{MemoryWindow, Window};

pub type Result<T> = std::result::Result<T, DomError>;
