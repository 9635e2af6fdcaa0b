//! Run configuration domain model
//!
//! A launchable program description whose string fields may carry
//! `${scope:argument}` placeholders until resolved.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A program launch description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfiguration {
    /// Display name.
    pub name: String,

    /// Program to execute.
    pub program: String,

    /// Program arguments, in order.
    #[serde(default)]
    pub args: Vec<String>,

    /// Working directory; the host default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Extra environment variables, in file order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub env: IndexMap<String, String>,
}

impl RunConfiguration {
    /// Creates a configuration with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: IndexMap::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Adds an environment variable; an existing key keeps its position.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Checks that the configuration can be launched.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidRunConfiguration` if the program is blank.
    pub fn validate(&self) -> DomainResult<()> {
        if self.program.trim().is_empty() {
            return Err(DomainError::InvalidRunConfiguration(format!(
                "'{}' has no program",
                self.name
            )));
        }
        Ok(())
    }
}
