//! Command sequencer
//!
//! Runs every distinct `${command:<id>}` found in a value through the
//! command provider, one at a time and in first-appearance order, before
//! any substitution takes place.

use std::collections::{HashMap, VecDeque};

use serde_json::Value;

use super::parser::COMMAND_PATTERN;
use super::scanner::scan_with_keys;
use crate::error::{ResolveError, ResolveResult};
use crate::ports::CommandProvider;

/// Values produced by commands, keyed by `command:<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandValueMap {
    values: HashMap<String, String>,
}

impl CommandValueMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(command_id: &str) -> String {
        format!("command:{command_id}")
    }

    /// Records the value produced by `command_id`.
    pub fn insert(&mut self, command_id: &str, value: impl Into<String>) {
        self.values.insert(Self::key(command_id), value.into());
    }

    /// Returns the value produced by `command_id`.
    #[must_use]
    pub fn get(&self, command_id: &str) -> Option<&str> {
        self.values.get(&Self::key(command_id)).map(String::as_str)
    }

    /// Number of recorded values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Outcome of running the command pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The value contains no command placeholders.
    NoCommands,
    /// Every command produced a string.
    Completed(CommandValueMap),
    /// At least one command was cancelled.
    Cancelled,
}

impl CommandOutcome {
    /// The value map, if the pass completed.
    #[must_use]
    pub const fn map(&self) -> Option<&CommandValueMap> {
        match self {
            Self::Completed(map) => Some(map),
            Self::NoCommands | Self::Cancelled => None,
        }
    }
}

/// What a single command invocation amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CommandResult {
    Value(String),
    Cancelled,
    NotAString,
}

impl CommandResult {
    /// Strings are values; `None`, `null`, `false` and zero cancel; the rest are rejected.
    fn classify(result: Option<Value>) -> Self {
        match result {
            Some(Value::String(s)) => Self::Value(s),
            None | Some(Value::Null | Value::Bool(false)) => Self::Cancelled,
            Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => {
                Self::Cancelled
            }
            Some(_) => Self::NotAString,
        }
    }
}

/// Drives the command provider for one resolution.
pub struct CommandSequencer<'a> {
    provider: &'a dyn CommandProvider,
}

impl<'a> CommandSequencer<'a> {
    /// Creates a sequencer over `provider`.
    #[must_use]
    pub fn new(provider: &'a dyn CommandProvider) -> Self {
        Self { provider }
    }

    /// Command identifiers in `raw`, first appearance first, without duplicates.
    ///
    /// Object keys count, since substitution rewrites them too.
    #[must_use]
    pub fn command_ids(raw: &Value) -> Vec<String> {
        let mut ids = Vec::new();
        scan_with_keys(&COMMAND_PATTERN, raw, &mut ids);
        ids
    }

    /// Runs every command referenced in `raw`.
    ///
    /// Commands are queued in first-appearance order and drained one at a
    /// time; the next invocation starts only after the previous one settled.
    /// A cancelled command does not stop the queue, but the outcome is
    /// [`CommandOutcome::Cancelled`].
    ///
    /// # Errors
    /// Returns `ResolveError::StringsOnlySupported` as soon as a command
    /// returns a non-string value, and propagates provider failures as is.
    /// Remaining commands are not invoked in either case.
    pub async fn run(&self, raw: &Value) -> ResolveResult<CommandOutcome> {
        let mut queue: VecDeque<String> = Self::command_ids(raw).into();
        if queue.is_empty() {
            return Ok(CommandOutcome::NoCommands);
        }

        let mut values = CommandValueMap::new();
        let mut cancelled = false;

        while let Some(command_id) = queue.pop_front() {
            tracing::debug!(command = %command_id, "invoking command");
            let result = self.provider.execute(&command_id, raw).await?;

            match CommandResult::classify(result) {
                CommandResult::Value(value) => values.insert(&command_id, value),
                CommandResult::Cancelled => {
                    tracing::debug!(command = %command_id, "command cancelled");
                    cancelled = true;
                }
                CommandResult::NotAString => {
                    return Err(ResolveError::StringsOnlySupported {
                        command: command_id,
                    });
                }
            }
        }

        tracing::debug!(commands = values.len(), cancelled, "command pass finished");
        if cancelled {
            Ok(CommandOutcome::Cancelled)
        } else {
            Ok(CommandOutcome::Completed(values))
        }
    }
}
