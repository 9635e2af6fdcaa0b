//! Qvars Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: settings and session files, the
//! process environment and locally registered commands.

pub mod adapters;
pub mod commands;
pub mod persistence;
pub mod serialization;

pub use adapters::ProcessEnvironment;
pub use commands::{CommandHandler, CommandRegistry, FixedValue, ShellCommand, StdinPrompt};
pub use persistence::{SessionError, SessionSnapshot, SettingsError, SettingsFile};
pub use serialization::{DocumentFormat, SerializationError, from_json_bytes, to_json_pretty};
