//! History entries
//!
//! The subset of a [`NavigationDescriptor`](crate::NavigationDescriptor)
//! persisted into the session-history stack and read back on restore.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::NavigationConfig;
use crate::Result;

const CONTAINER: &str = "container";
const LAYOUT: &str = "layout";
const SCROLL: &str = "scroll";

/// History payload: `{container, layout, scroll, ...data}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub container: String,
    pub layout: Option<String>,
    pub scroll: bool,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl HistoryEntry {
    /// Caller data under `container`, `layout` or `scroll` is dropped; the
    /// entry's own fields own those keys.
    pub fn new(
        container: String,
        layout: Option<String>,
        scroll: bool,
        mut data: Map<String, Value>,
    ) -> Self {
        for key in [CONTAINER, LAYOUT, SCROLL] {
            data.remove(key);
        }

        Self {
            container,
            layout,
            scroll,
            data,
        }
    }

    /// Entry used for slots this system never created
    pub fn fallback(config: &NavigationConfig) -> Self {
        Self::new(config.default_container.clone(), None, false, Map::new())
    }

    /// Read an entry back from a history slot's state.
    ///
    /// Missing or non-object state yields the fallback entry. A state object
    /// without a `container` string keeps its `layout`/`scroll` but uses the
    /// default container.
    pub fn from_state(state: Option<&Value>, config: &NavigationConfig) -> Self {
        let Some(Value::Object(map)) = state else {
            return Self::fallback(config);
        };

        let container = map
            .get(CONTAINER)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| config.default_container.clone());
        let layout = map.get(LAYOUT).and_then(Value::as_str).map(str::to_string);
        let scroll = map.get(SCROLL).and_then(Value::as_bool).unwrap_or(false);

        Self::new(container, layout, scroll, map.clone())
    }

    pub fn to_state(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Whether a completed swap for this entry resets scroll to the top.
    ///
    /// Only a non-empty, non-app layout without the scroll flag keeps the
    /// current position.
    pub fn resets_scroll(&self, config: &NavigationConfig) -> bool {
        let layout = self.layout.as_deref().filter(|l| !l.is_empty());
        self.scroll || layout.is_none() || config.is_app_layout(layout)
    }

    /// Query parameters for the fragment request: caller data, then `layout`
    /// whenever one was given, even an empty one
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = self
            .data
            .iter()
            .map(|(key, value)| (key.clone(), query_value(value)))
            .collect();

        if let Some(layout) = &self.layout {
            query.push((LAYOUT.to_string(), layout.clone()));
        }

        query
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
