//! Document serialization for settings, session and run configuration files.
//!
//! Files are JSON unless their extension says YAML. Output is always
//! pretty-printed JSON with 2-space indentation and a trailing newline.

mod document;

pub use document::*;
