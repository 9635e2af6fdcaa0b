//! Environment variable snapshot
//!
//! Captured once per session; keys are folded at construction on
//! case-insensitive platforms so lookups never depend on the caller's casing.

use std::collections::HashMap;

use crate::platform::Platform;

/// Folded, read-only view of the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    platform: Platform,
    variables: HashMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Creates an empty snapshot for `platform`.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            variables: HashMap::new(),
        }
    }

    /// Creates a snapshot from raw name/value pairs, folding keys as needed.
    #[must_use]
    pub fn from_vars<I, K, V>(platform: Platform, raw: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            platform,
            variables: platform.normalize_env_keys(raw),
        }
    }

    /// Looks up a variable, folding `name` the same way keys were folded.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = if self.platform.is_case_insensitive() {
            self.variables.get(&self.platform.fold_key(name))
        } else {
            self.variables.get(name)
        };
        value.map(String::as_str)
    }

    /// Number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if no variables were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// The platform the keys were folded for.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive_on_windows() {
        let env = EnvironmentSnapshot::from_vars(Platform::Windows, [("UserProfile", "C:\\Users\\q")]);
        assert_eq!(env.get("USERPROFILE"), Some("C:\\Users\\q"));
        assert_eq!(env.get("userprofile"), Some("C:\\Users\\q"));
    }

    #[test]
    fn test_lookup_is_exact_on_posix() {
        let env = EnvironmentSnapshot::from_vars(Platform::Posix, [("HOME", "/home/q")]);
        assert_eq!(env.get("HOME"), Some("/home/q"));
        assert_eq!(env.get("home"), None);
    }

    #[test]
    fn test_empty_snapshot() {
        let env = EnvironmentSnapshot::new(Platform::Posix);
        assert!(env.is_empty());
        assert_eq!(env.get("PATH"), None);
    }
}
