//! Navigator configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use swapline_navigation::NavigationConfig;
use swapline_transport::HttpConfig;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markup contract and container defaults
    pub navigation: NavigationConfig,
    /// Fragment fetching
    pub http: HttpConfig,
    /// Lifecycle events buffered per subscriber
    pub event_capacity: usize,
}

impl Config {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        let nav = &self.navigation;
        let required = [
            ("navigation.marker_attribute", &nav.marker_attribute),
            ("navigation.default_container", &nav.default_container),
            ("navigation.app_container", &nav.app_container),
            ("navigation.namespace_marker_id", &nav.namespace_marker_id),
            ("navigation.namespace_data_key", &nav.namespace_data_key),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::Config(format!("{} cannot be empty", name)));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            navigation: NavigationConfig::default(),
            http: HttpConfig::default(),
            event_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_partial() {
        let config = Config::from_json(
            r##"{"navigation": {"app_container": "#app"}, "http": {"timeout_secs": 3}}"##,
        )
        .unwrap();

        assert_eq!(config.navigation.app_container, "#app");
        assert_eq!(config.navigation.default_container, "#body");
        assert_eq!(config.http.timeout_secs, 3);
        assert_eq!(config.http.max_redirects, 5);
        assert_eq!(config.event_capacity, 64);
    }

    #[test]
    fn test_from_json_rejects_empty_fields() {
        let err = Config::from_json(r#"{"navigation": {"marker_attribute": " "}}"#).unwrap_err();
        assert!(matches!(err, CoreError::Config(msg) if msg.contains("marker_attribute")));

        assert!(matches!(
            Config::from_json("not json"),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/swapline.json"),
            Err(CoreError::Io(_))
        ));
    }
}
