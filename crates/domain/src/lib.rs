//! Qvars Domain - Core resolution types
//!
//! This crate defines the snapshots a placeholder resolution runs against:
//! workspace folders, the active document, the environment and settings
//! values, plus the platform rules for case folding and path handling.
//! All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod environment;
pub mod error;
mod path;
pub mod platform;
pub mod run_config;
pub mod workspace;

pub use config::ConfigValue;
pub use environment::EnvironmentSnapshot;
pub use error::{DomainError, DomainResult};
pub use platform::Platform;
pub use run_config::RunConfiguration;
pub use workspace::{ActiveFile, Selection, WorkspaceFolder};
