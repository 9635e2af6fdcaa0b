//! Configuration values
//!
//! Settings are free-form documents; only scalars can be substituted into a
//! string, structured values are reported as such.

use serde_json::Value;

/// A value read from a settings source.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// A string setting.
    String(String),
    /// A numeric setting.
    Number(serde_json::Number),
    /// A boolean setting.
    Bool(bool),
    /// An object or array setting.
    Structured(Value),
}

impl ConfigValue {
    /// Converts a JSON value; `null` is treated as absent.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::String(s)),
            Value::Number(n) => Some(Self::Number(n)),
            Value::Bool(b) => Some(Self::Bool(b)),
            structured @ (Value::Array(_) | Value::Object(_)) => Some(Self::Structured(structured)),
        }
    }

    /// Renders a scalar as substitution text. Returns `None` for structured values.
    #[must_use]
    pub fn as_scalar_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Structured(_) => None,
        }
    }

    /// Returns true for objects and arrays.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_absent() {
        assert_eq!(ConfigValue::from_json(Value::Null), None);
    }

    #[test]
    fn test_scalars_render() {
        assert_eq!(
            ConfigValue::from_json(json!("python3")).and_then(|v| v.as_scalar_text()),
            Some("python3".to_string())
        );
        assert_eq!(ConfigValue::from(4_i64).as_scalar_text(), Some("4".to_string()));
        assert_eq!(ConfigValue::from(false).as_scalar_text(), Some("false".to_string()));
    }

    #[test]
    fn test_structured_values() {
        let value = ConfigValue::from_json(json!({"shots": 1024}));
        assert!(value.as_ref().is_some_and(ConfigValue::is_structured));
        assert_eq!(value.and_then(|v| v.as_scalar_text()), None);

        let value = ConfigValue::from_json(json!([1, 2]));
        assert!(value.is_some_and(|v| v.is_structured()));
    }
}
