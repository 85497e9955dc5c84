//! Link interception
//!
//! Anchors opt in through markup:
//!
//! ```html
//! <a href="/dashboard" data-ajax="app">Dashboard</a>
//! <a href="/settings" data-ajax="modal" data-target="#modal">Settings</a>
//! <a href="/profile" data-ajax>Profile</a>
//! ```
//!
//! The marker value is the layout tag, kept verbatim. An empty value still
//! travels as an (empty) layout but behaves like no layout for container
//! and scroll decisions. The attributes are parsed once into a
//! [`NavigationDescriptor`].

use std::sync::Arc;

use swapline_dom::{ClickEvent, Element};

use crate::completion::NavigationHandle;
use crate::config::NavigationConfig;
use crate::descriptor::NavigationDescriptor;
use crate::history::HistoryStateManager;

/// Delegated click handler for marked anchors
pub struct LinkInterceptor {
    history: HistoryStateManager,
    config: Arc<NavigationConfig>,
}

impl LinkInterceptor {
    pub fn new(history: HistoryStateManager, config: Arc<NavigationConfig>) -> Self {
        Self { history, config }
    }

    /// Whether `element` is an anchor opted into partial navigation
    pub fn matches(&self, element: &Element) -> bool {
        element.is("a") && element.has_attribute(&self.config.marker_attribute)
    }

    /// Handle a click. Clicks that do not pass through a marked anchor are
    /// left alone; otherwise the default action is prevented and the
    /// navigation is pushed.
    pub fn handle_click(&self, event: &mut ClickEvent) -> Option<NavigationHandle> {
        let descriptor = event
            .path()
            .iter()
            .find(|element| self.matches(element))
            .map(|anchor| self.describe(anchor))?;

        event.prevent_default();
        tracing::debug!(
            url = %descriptor.url,
            layout = ?descriptor.layout,
            container = ?descriptor.container,
            "Intercepted link click"
        );

        self.history.push_state(descriptor)
    }

    /// Navigation request expressed by a marked anchor
    pub fn describe(&self, anchor: &Element) -> NavigationDescriptor {
        let href = anchor.attribute("href").unwrap_or_default();

        NavigationDescriptor {
            layout: anchor
                .attribute(&self.config.marker_attribute)
                .map(parse_layout),
            container: anchor
                .attribute(&self.config.target_attribute)
                .map(str::trim)
                .filter(|target| !target.is_empty())
                .map(str::to_string),
            ..NavigationDescriptor::new(href)
        }
    }
}

fn parse_layout(value: &str) -> String {
    value.trim().to_string()
}
