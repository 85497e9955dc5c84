//! Element snapshots and click events

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Detached snapshot of a DOM element: tag name plus attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Case-insensitive tag comparison
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

/// A click as seen by delegated listeners.
///
/// `path` runs from the clicked element up to the document root, mirroring
/// the propagation path of a bubbling DOM event.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    path: Vec<Element>,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(path: Vec<Element>) -> Self {
        Self {
            path,
            default_prevented: false,
        }
    }

    /// Click directly on a single element with no known ancestors
    pub fn on(element: Element) -> Self {
        Self::new(vec![element])
    }

    pub fn target(&self) -> Option<&Element> {
        self.path.first()
    }

    pub fn path(&self) -> &[Element] {
        &self.path
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
