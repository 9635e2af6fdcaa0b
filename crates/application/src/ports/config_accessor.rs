//! Configuration accessor port

use std::collections::HashMap;

use qvars_domain::ConfigValue;

/// Read access to host settings for `${config:key}`.
pub trait ConfigAccessor: Send + Sync {
    /// Returns the value stored under `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<ConfigValue>;
}

/// In-memory settings, keyed by full setting name.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, ConfigValue>,
}

impl StaticConfig {
    /// Creates an empty set of settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a setting.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Sets a setting in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigAccessor for StaticConfig {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.values.get(key).cloned()
    }
}
