//! JSON and YAML document helpers.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// JSON (the default).
    #[default]
    Json,
    /// YAML, for `.yaml` and `.yml` files.
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    /// Deserializes `bytes` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is invalid or doesn't match the expected type.
    pub fn parse<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, SerializationError> {
        match self {
            Self::Json => from_json_bytes(bytes),
            Self::Yaml => Ok(serde_yaml::from_slice(bytes)?),
        }
    }
}

/// Serializes a value to pretty JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Object keys in insertion order
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a/settings.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a/settings.YML")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a/session.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a/session")), DocumentFormat::Json);
    }

    #[test]
    fn test_parse_yaml() {
        let value: Value = DocumentFormat::Yaml
            .parse(b"qvars:\n  shots: 100\n  backend: aer\n")
            .unwrap();
        assert_eq!(value, json!({"qvars": {"shots": 100, "backend": "aer"}}));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result: Result<Value, _> = DocumentFormat::Json.parse(b"{not json");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }

    #[test]
    fn test_pretty_output() {
        let json = to_json_pretty(&json!({"b": 1, "a": [true]})).unwrap();
        assert_eq!(json, "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}\n");
    }
}
