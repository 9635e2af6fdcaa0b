//! Placeholder discovery in nested values
//!
//! Walks strings, arrays and objects and collects the captured text of every
//! match of a pattern, first appearance first, without duplicates.

use regex::Regex;
use serde_json::Value;

/// Collects group 1 of every `pattern` match found anywhere inside `value`.
///
/// Entries already in `out` are not added again. Object values are visited
/// in the map's iteration order; object keys are not scanned.
pub fn scan(pattern: &Regex, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => scan_str(pattern, s, out),
        Value::Array(items) => {
            for item in items {
                scan(pattern, item, out);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                scan(pattern, item, out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Like [`scan`], but also scans object keys.
///
/// Each entry's key is visited before its value, so a key placeholder counts
/// as appearing ahead of the value it labels.
pub fn scan_with_keys(pattern: &Regex, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => scan_str(pattern, s, out),
        Value::Array(items) => {
            for item in items {
                scan_with_keys(pattern, item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                scan_str(pattern, key, out);
                scan_with_keys(pattern, item, out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Same as [`scan`] for a plain string.
pub fn scan_str(pattern: &Regex, input: &str, out: &mut Vec<String>) {
    for caps in pattern.captures_iter(input) {
        if let Some(found) = caps.get(1) {
            let found = found.as_str();
            if !out.iter().any(|existing| existing == found) {
                out.push(found.to_string());
            }
        }
    }
}
