//! Editor configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields a working configuration.
//!
//! ```json
//! {
//!   "resize_filter": "lanczos3",
//!   "default_threshold": 128,
//!   "default_save_format": "PNG"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::encode::SaveFormat;

/// Starting position of a threshold control.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings that shape how a session edits and saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Resampling filter used by resize.
    pub resize_filter: FilterType,
    /// Value a controller seeds its threshold control with.
    pub default_threshold: u8,
    /// Format a new session starts with.
    pub default_save_format: SaveFormat,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            resize_filter: FilterType::Lanczos3,
            default_threshold: DEFAULT_THRESHOLD,
            default_save_format: SaveFormat::Jpeg,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded editor config");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.is_file() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no editor config, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();

        assert_eq!(config.resize_filter, FilterType::Lanczos3);
        assert_eq!(config.default_threshold, 128);
        assert_eq!(config.default_save_format, SaveFormat::Jpeg);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = EditorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let text = r#"{ "default_save_format": "PNG", "resize_filter": "bilinear" }"#;
        let config = EditorConfig::from_json_str(text).unwrap();

        assert_eq!(config.default_save_format, SaveFormat::Png);
        assert_eq!(config.resize_filter, FilterType::Bilinear);
        assert_eq!(config.default_threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let result = EditorConfig::from_json_str(r#"{ "default_threshold": 300 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = EditorConfig::from_json_str(r#"{ "default_save_format": "GIF" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixelsmith.json");
        fs::write(&path, r#"{ "default_threshold": 90 }"#).unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.default_threshold, 90);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = EditorConfig::load(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load_or_default(&dir.path().join("missing.json")).unwrap();

        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_or_default_bad_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(EditorConfig::load_or_default(&path).is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = EditorConfig {
            resize_filter: FilterType::Nearest,
            default_threshold: 10,
            default_save_format: SaveFormat::Bmp,
        };
        let text = serde_json::to_string(&config).unwrap();

        assert_eq!(EditorConfig::from_json_str(&text).unwrap(), config);
    }
}
