//! Navigation markup and container configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Anchor attribute that opts a link in; its value is the layout tag
    pub marker_attribute: String,
    /// Optional anchor attribute overriding the container selector
    pub target_attribute: String,
    /// Container replaced when no layout-specific default applies
    pub default_container: String,
    /// Container replaced for the app layout
    pub app_container: String,
    /// Layout tag selecting the app container and a scroll reset
    pub app_layout: String,
    /// Id of the element carrying the next style namespace class
    pub namespace_marker_id: String,
    /// Root data key recording the applied style namespace
    pub namespace_data_key: String,
}

impl NavigationConfig {
    /// Default container for a layout tag
    pub fn container_for(&self, layout: Option<&str>) -> &str {
        match layout {
            Some(layout) if layout == self.app_layout => &self.app_container,
            _ => &self.default_container,
        }
    }

    pub fn is_app_layout(&self, layout: Option<&str>) -> bool {
        layout == Some(self.app_layout.as_str())
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            marker_attribute: "data-ajax".to_string(),
            target_attribute: "data-target".to_string(),
            default_container: "#body".to_string(),
            app_container: "#main".to_string(),
            app_layout: "app".to_string(),
            namespace_marker_id: "css-namespace".to_string(),
            namespace_data_key: "cssnamespace".to_string(),
        }
    }
}
