//! Navigation requests

use serde_json::{Map, Value};
use std::fmt;

use crate::completion::NavigationOutcome;
use crate::config::NavigationConfig;
use crate::entry::HistoryEntry;

/// Invoked once with the outcome of the navigation it was registered for
pub type Callback = Box<dyn FnOnce(&NavigationOutcome) + Send + 'static>;

/// A requested navigation.
///
/// Built per click or per `pushState` call and consumed when the history
/// entry is committed. Unset fields resolve against [`NavigationConfig`]
/// and the current document at commit time.
#[derive(Default)]
pub struct NavigationDescriptor {
    /// Target URL, absolute or relative to the current location. Empty means
    /// "do nothing".
    pub url: String,
    /// Selector of the container to replace
    pub container: Option<String>,
    /// Extra request parameters, persisted in the history entry
    pub data: Map<String, Value>,
    /// History entry title; the current document title when unset
    pub title: Option<String>,
    pub layout: Option<String>,
    /// Force a scroll reset after the swap
    pub scroll: bool,
    pub callback: Option<Callback>,
}

impl NavigationDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn container(mut self, selector: impl Into<String>) -> Self {
        self.container = Some(selector.into());
        self
    }

    pub fn layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn scroll(mut self, scroll: bool) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&NavigationOutcome) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Container selector, falling back to the layout's default
    pub fn resolved_container(&self, config: &NavigationConfig) -> String {
        self.container
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| config.container_for(self.layout.as_deref()).to_string())
    }

    /// The part of this request persisted into session history
    pub fn to_entry(&self, config: &NavigationConfig) -> HistoryEntry {
        HistoryEntry::new(
            self.resolved_container(config),
            self.layout.clone(),
            self.scroll,
            self.data.clone(),
        )
    }
}

impl fmt::Debug for NavigationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationDescriptor")
            .field("url", &self.url)
            .field("container", &self.container)
            .field("data", &self.data)
            .field("title", &self.title)
            .field("layout", &self.layout)
            .field("scroll", &self.scroll)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl From<&str> for NavigationDescriptor {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for NavigationDescriptor {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}
