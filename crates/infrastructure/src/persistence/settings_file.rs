//! User settings backing `${config:key}`.
//!
//! Settings are read from a JSON or YAML document. When no path is given the
//! platform-specific config directory is used:
//! - Linux/macOS: ~/.config/qvars/settings.json
//! - Windows: %APPDATA%/qvars/settings.json

use std::path::{Path, PathBuf};

use qvars_application::ports::ConfigAccessor;
use qvars_domain::ConfigValue;
use serde_json::{Map, Value};
use tokio::fs;

use crate::serialization::{DocumentFormat, SerializationError};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error reading '{path}': {source}")]
    Io {
        /// The settings file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// The document root is not an object.
    #[error("settings in '{0}' must be an object")]
    NotAnObject(PathBuf),
}

/// Settings loaded from a document.
///
/// Keys are looked up verbatim first (`"qvars.shots": 10`), then as a dotted
/// path into nested objects (`{"qvars": {"shots": 10}}`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsFile {
    root: Map<String, Value>,
}

impl SettingsFile {
    /// Creates settings from an already parsed object.
    #[must_use]
    pub const fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    /// Returns the path to the qvars config directory.
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("qvars"))
    }

    /// Returns the default settings path, if the platform has a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Loads settings from `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not an object document.
    pub async fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read(path).await.map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match DocumentFormat::from_path(path).parse::<Value>(&content)? {
            Value::Object(root) => {
                tracing::info!(path = %path.display(), keys = root.len(), "settings loaded");
                Ok(Self { root })
            }
            Value::Null => Ok(Self::default()),
            _ => Err(SettingsError::NotAnObject(path.to_path_buf())),
        }
    }

    /// Loads settings from the default location.
    ///
    /// Returns empty settings if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be loaded.
    pub async fn load_default() -> Result<Self, SettingsError> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if fs::metadata(&path).await.is_err() {
            tracing::debug!(path = %path.display(), "no settings file");
            return Ok(Self::default());
        }

        Self::load(&path).await
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns true if there are no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.root.get(key) {
            return Some(value);
        }

        let mut parts = key.split('.');
        let mut current = self.root.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

impl ConfigAccessor for SettingsFile {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.lookup(key).cloned().and_then(ConfigValue::from_json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn settings(value: Value) -> SettingsFile {
        match value {
            Value::Object(map) => SettingsFile::from_map(map),
            _ => SettingsFile::default(),
        }
    }

    #[test]
    fn settings_path_is_valid() {
        if let Some(p) = SettingsFile::default_path() {
            assert!(p.ends_with("qvars/settings.json"));
        }
    }

    #[test]
    fn flat_key_wins_over_nested() {
        let s = settings(json!({"qvars.backend": "flat", "qvars": {"backend": "nested"}}));
        assert_eq!(s.get("qvars.backend"), Some(ConfigValue::from("flat")));
    }

    #[test]
    fn nested_lookup() {
        let s = settings(json!({"qvars": {"run": {"shots": 256, "dryRun": false}}}));
        assert_eq!(s.get("qvars.run.shots"), Some(ConfigValue::from(256_i64)));
        assert_eq!(s.get("qvars.run.dryRun"), Some(ConfigValue::from(false)));
        assert!(s.get("qvars.run").unwrap().is_structured());
        assert_eq!(s.get("qvars.run.missing"), None);
        assert_eq!(s.get("qvars.run.shots.deeper"), None);
    }

    #[test]
    fn null_is_absent() {
        let s = settings(json!({"qvars": {"backend": null}}));
        assert_eq!(s.get("qvars.backend"), None);
    }

    #[tokio::test]
    async fn load_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"qvars": {"backend": "aer"}}"#).unwrap();

        let s = SettingsFile::load(&path).await.unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.get("qvars.backend"), Some(ConfigValue::from("aer")));
    }

    #[tokio::test]
    async fn load_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "qvars.shots: 10\nqvars:\n  backend: ibmq\n").unwrap();

        let s = SettingsFile::load(&path).await.unwrap();
        assert_eq!(s.get("qvars.shots"), Some(ConfigValue::from(10_i64)));
        assert_eq!(s.get("qvars.backend"), Some(ConfigValue::from("ibmq")));
    }

    #[tokio::test]
    async fn load_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = SettingsFile::load(&path).await.unwrap_err();
        assert!(matches!(err, SettingsError::NotAnObject(_)));
    }

    #[tokio::test]
    async fn load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = SettingsFile::load(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
