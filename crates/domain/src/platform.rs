//! Platform rules for environment lookup and path casing
//!
//! Windows-style hosts look up environment variables case-insensitively and
//! report drive letters in either case. Everything else is case-sensitive.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How the resolution host treats names and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Case-sensitive environment, `/` separated paths.
    #[default]
    Posix,
    /// Case-insensitive environment, drive letters, `\` or `/` separators.
    Windows,
}

impl Platform {
    /// Returns the platform the process was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Posix }
    }

    /// Whether environment lookups ignore case on this platform.
    #[must_use]
    pub const fn is_case_insensitive(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// The separator used when building paths.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Posix => '/',
            Self::Windows => '\\',
        }
    }

    /// Whether `c` separates path components on this platform.
    #[must_use]
    pub const fn is_separator(self, c: char) -> bool {
        match self {
            Self::Posix => c == '/',
            Self::Windows => c == '/' || c == '\\',
        }
    }

    /// Folds an environment variable name for lookup.
    #[must_use]
    pub fn fold_key(self, key: &str) -> String {
        if self.is_case_insensitive() {
            key.to_lowercase()
        } else {
            key.to_string()
        }
    }

    /// Folds every key of a raw environment map.
    ///
    /// Entries with an empty value are dropped; a lookup of such a variable
    /// yields the empty string either way.
    #[must_use]
    pub fn normalize_env_keys<I, K, V>(self, raw: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        raw.into_iter()
            .filter_map(|(key, value)| {
                let value = value.into();
                (!value.is_empty()).then(|| (self.fold_key(key.as_ref()), value))
            })
            .collect()
    }

    /// Upper-cases a leading `x:` drive letter on case-insensitive platforms.
    #[must_use]
    pub fn normalize_drive_letter(self, path: &str) -> String {
        if self.has_drive_letter(path) {
            let mut chars = path.chars();
            if let Some(first) = chars.next() {
                let mut out = String::with_capacity(path.len());
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
                return out;
            }
        }
        path.to_string()
    }

    fn has_drive_letter(self, path: &str) -> bool {
        let bytes = path.as_bytes();
        self.is_case_insensitive()
            && bytes.len() >= 2
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == b':'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_key_windows() {
        assert_eq!(Platform::Windows.fold_key("Path"), "path");
        assert_eq!(Platform::Posix.fold_key("Path"), "Path");
    }

    #[test]
    fn test_normalize_env_keys_folds_on_windows() {
        let folded = Platform::Windows.normalize_env_keys([("HOME", "/h"), ("Temp", "/t")]);
        assert_eq!(folded.get("home").map(String::as_str), Some("/h"));
        assert_eq!(folded.get("temp").map(String::as_str), Some("/t"));
        assert!(!folded.contains_key("HOME"));
    }

    #[test]
    fn test_normalize_env_keys_keeps_case_on_posix() {
        let kept = Platform::Posix.normalize_env_keys([("HOME", "/h")]);
        assert!(kept.contains_key("HOME"));
        assert!(!kept.contains_key("home"));
    }

    #[test]
    fn test_normalize_env_keys_drops_empty_values() {
        let kept = Platform::Posix.normalize_env_keys([("EMPTY", ""), ("SET", "1")]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_drive_letter_upper_cased_on_windows() {
        assert_eq!(Platform::Windows.normalize_drive_letter("c:\\proj"), "C:\\proj");
        assert_eq!(Platform::Windows.normalize_drive_letter("D:\\proj"), "D:\\proj");
    }

    #[test]
    fn test_drive_letter_untouched_elsewhere() {
        assert_eq!(Platform::Posix.normalize_drive_letter("c:\\proj"), "c:\\proj");
        assert_eq!(Platform::Windows.normalize_drive_letter("\\\\share\\x"), "\\\\share\\x");
        assert_eq!(Platform::Windows.normalize_drive_letter("c"), "c");
        assert_eq!(Platform::Windows.normalize_drive_letter(""), "");
    }
}
