//! Command provider port
//!
//! Defines the interface to the host's registry of named commands that
//! back `${command:id}` placeholders.

use async_trait::async_trait;
use serde_json::Value;

/// Errors a command provider can reject an invocation with.
#[derive(Debug, thiserror::Error)]
pub enum CommandProviderError {
    /// No command is registered under the identifier.
    #[error("command '{0}' not found")]
    NotFound(String),

    /// The command ran and failed.
    #[error("command '{command}' failed: {message}")]
    Failed {
        /// The command identifier.
        command: String,
        /// What went wrong.
        message: String,
    },

    /// I/O error while running the command.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Registry of externally provided commands.
///
/// Implementations may have visible side effects (prompts, dialogs), so
/// callers must not invoke them concurrently within one resolution.
#[async_trait]
pub trait CommandProvider: Send + Sync {
    /// Runs the command registered under `command_id`.
    ///
    /// # Arguments
    /// * `command_id` - Identifier taken from `${command:<id>}`
    /// * `context` - The raw, unresolved value being resolved
    ///
    /// # Returns
    /// The command's result. `None`, `null`, `false` and `0` mean the user
    /// cancelled; a string is the substitution value; anything else is
    /// rejected by the resolver.
    ///
    /// # Errors
    /// Returns an error if the command is unknown or fails.
    async fn execute(
        &self,
        command_id: &str,
        context: &Value,
    ) -> Result<Option<Value>, CommandProviderError>;
}

/// Provider with no registered commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCommands;

#[async_trait]
impl CommandProvider for NoCommands {
    async fn execute(
        &self,
        command_id: &str,
        _context: &Value,
    ) -> Result<Option<Value>, CommandProviderError> {
        Err(CommandProviderError::NotFound(command_id.to_string()))
    }
}
