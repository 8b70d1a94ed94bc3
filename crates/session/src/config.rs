//! Session configuration.

use std::path::Path;
use navigator_core::EdgePadding;
use navigator_progress::TrackerConfig;
use serde::{Deserialize, Serialize};

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for a navigation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Progress tracker settings
    pub tracker: TrackerConfig,

    /// Span in meters when centering the map on the user
    pub follow_span_m: f64,

    /// Insets when fitting a route into the viewport
    pub viewport_padding: EdgePadding,

    /// Event queue capacity
    pub queue_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            follow_span_m: 500.0,
            viewport_padding: EdgePadding::default(),
            queue_capacity: 64,
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file. Missing keys keep their defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_progress::RegionMatching;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.follow_span_m, 500.0);
        assert_eq!(config.viewport_padding, EdgePadding::uniform(16.0));
        assert_eq!(config.tracker.geofence_radius_m, 20.0);
        assert_eq!(config.tracker.region_matching, RegionMatching::Lenient);
    }

    #[test]
    fn test_partial_json() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"tracker":{"geofence_radius_m":30.0},"queue_capacity":8}"#)
                .unwrap();
        assert_eq!(config.tracker.geofence_radius_m, 30.0);
        assert_eq!(config.queue_capacity, 8);
        assert_eq!(config.follow_span_m, 500.0);
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navigator.json");
        tokio::fs::write(&path, r#"{"follow_span_m": 250.0}"#).await.unwrap();

        let config = SessionConfig::load(&path).await.unwrap();
        assert_eq!(config.follow_span_m, 250.0);

        tokio::fs::write(&path, "not json").await.unwrap();
        assert!(matches!(SessionConfig::load(&path).await, Err(ConfigError::Json(_))));
    }
}
