//! Command registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use qvars_application::ports::{CommandProvider, CommandProviderError};
use serde_json::Value;

/// Produces the value of one registered command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs the command.
    ///
    /// # Arguments
    /// * `command_id` - The identifier the handler is registered under
    /// * `context` - The raw value being resolved
    ///
    /// # Errors
    /// Returns an error if the command fails to run.
    async fn run(
        &self,
        command_id: &str,
        context: &Value,
    ) -> Result<Option<Value>, CommandProviderError>;
}

/// Named command handlers.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `command_id`, replacing any previous one.
    pub fn register(&mut self, command_id: impl Into<String>, handler: impl CommandHandler + 'static) {
        self.handlers.insert(command_id.into(), Arc::new(handler));
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, command_id: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        self.register(command_id, handler);
        self
    }

    /// Returns true if `command_id` has a handler.
    #[must_use]
    pub fn contains(&self, command_id: &str) -> bool {
        self.handlers.contains_key(command_id)
    }

    /// Registered identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.ids())
            .finish()
    }
}

#[async_trait]
impl CommandProvider for CommandRegistry {
    async fn execute(
        &self,
        command_id: &str,
        context: &Value,
    ) -> Result<Option<Value>, CommandProviderError> {
        let Some(handler) = self.handlers.get(command_id) else {
            return Err(CommandProviderError::NotFound(command_id.to_string()));
        };
        tracing::debug!(command = %command_id, "running command handler");
        handler.run(command_id, context).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::FixedValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_dispatch_to_handler() {
        let registry = CommandRegistry::new().with("pickBackend", FixedValue::new("aer"));
        let result = registry.execute("pickBackend", &json!("${command:pickBackend}")).await.unwrap();
        assert_eq!(result, Some(json!("aer")));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let registry = CommandRegistry::new();
        let err = registry.execute("nope", &Value::Null).await.unwrap_err();
        assert!(matches!(err, CommandProviderError::NotFound(ref id) if id == "nope"));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = CommandRegistry::new();
        registry.register("b", FixedValue::new("1"));
        registry.register("a", FixedValue::new("2"));
        registry.register("b", FixedValue::new("3"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec!["a", "b"]);
        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
    }
}
