//! Substitution engine
//!
//! Resolves `${scope:argument}` placeholders: first the command pass, then a
//! single synchronous left-to-right substitution over the input.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::commands::{CommandOutcome, CommandSequencer, CommandValueMap};
use super::context::ResolutionContext;
use super::parser::parse_tokens;
use super::scopes::{ScopeInput, ScopeRegistry};
use crate::error::{ResolveError, ResolveResult};
use crate::ports::{CommandProvider, NoCommands};

/// Outcome of a resolution that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// Every placeholder was substituted.
    Resolved(T),
    /// A command was cancelled; nothing was substituted.
    Cancelled,
}

impl<T> Resolution<T> {
    /// Returns the resolved value, or `None` if cancelled.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Cancelled => None,
        }
    }

    /// Returns true if the resolution was cancelled.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Maps the resolved value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::Resolved(value) => Resolution::Resolved(f(value)),
            Self::Cancelled => Resolution::Cancelled,
        }
    }
}

/// The placeholder resolution engine.
///
/// Holds the session context, the command provider and the scope registry.
/// `resolve` takes `&self`; independent resolutions may run concurrently
/// against the same resolver.
#[derive(Clone)]
pub struct VariableResolver {
    context: Arc<ResolutionContext>,
    provider: Arc<dyn CommandProvider>,
    scopes: ScopeRegistry,
}

impl VariableResolver {
    /// Creates a resolver with the standard scopes and no commands.
    #[must_use]
    pub fn new(context: ResolutionContext) -> Self {
        Self {
            context: Arc::new(context),
            provider: Arc::new(NoCommands),
            scopes: ScopeRegistry::standard(),
        }
    }

    /// Sets the command provider.
    #[must_use]
    pub fn with_provider(mut self, provider: impl CommandProvider + 'static) -> Self {
        self.provider = Arc::new(provider);
        self
    }

    /// Sets a shared command provider.
    #[must_use]
    pub fn with_shared_provider(mut self, provider: Arc<dyn CommandProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Replaces the scope registry.
    #[must_use]
    pub fn with_scopes(mut self, scopes: ScopeRegistry) -> Self {
        self.scopes = scopes;
        self
    }

    /// Returns a reference to the context.
    #[must_use]
    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    /// Returns a reference to the scope registry.
    #[must_use]
    pub const fn scopes(&self) -> &ScopeRegistry {
        &self.scopes
    }

    /// Resolves all placeholders in `input`.
    ///
    /// # Errors
    /// Returns the first `ResolveError` raised by a command or a scope;
    /// no partial output is produced.
    pub async fn resolve(&self, input: &str) -> ResolveResult<Resolution<String>> {
        let raw = Value::String(input.to_string());
        let outcome = self.run_commands(&raw).await?;
        if outcome == CommandOutcome::Cancelled {
            return Ok(Resolution::Cancelled);
        }
        self.substitute(input, outcome.map()).map(Resolution::Resolved)
    }

    /// Resolves every string inside `value`, including object keys.
    ///
    /// Commands are collected across the whole value, keys included, and run once.
    ///
    /// # Errors
    /// Returns the first `ResolveError` raised by a command or a scope, or
    /// `ResolveError::DuplicateKey` when two keys of one object resolve to
    /// the same text.
    pub async fn resolve_value(&self, value: &Value) -> ResolveResult<Resolution<Value>> {
        let outcome = self.run_commands(value).await?;
        if outcome == CommandOutcome::Cancelled {
            return Ok(Resolution::Cancelled);
        }
        self.substitute_value(value, outcome.map())
            .map(Resolution::Resolved)
    }

    /// Placeholders whose scope has no registered resolver.
    #[must_use]
    pub fn find_unknown(&self, input: &str) -> Vec<String> {
        let mut unknown: Vec<String> = Vec::new();
        for token in parse_tokens(input) {
            if !self.scopes.is_known(&token.scope) && !unknown.contains(&token.match_text) {
                unknown.push(token.match_text);
            }
        }
        unknown
    }

    async fn run_commands(&self, raw: &Value) -> ResolveResult<CommandOutcome> {
        CommandSequencer::new(self.provider.as_ref()).run(raw).await
    }

    /// Replaces every placeholder in `input`; unknown scopes are kept verbatim.
    fn substitute(&self, input: &str, commands: Option<&CommandValueMap>) -> ResolveResult<String> {
        let tokens = parse_tokens(input);
        if tokens.is_empty() {
            return Ok(input.to_string());
        }

        let scope_input = ScopeInput {
            context: &self.context,
            commands,
        };
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for token in &tokens {
            result.push_str(&input[last_end..token.span.start]);

            if let Some(resolver) = self.scopes.get(&token.scope) {
                result.push_str(&resolver.resolve(token, &scope_input)?);
            } else {
                tracing::warn!(placeholder = %token.match_text, "unknown scope, leaving placeholder as is");
                result.push_str(&token.match_text);
            }

            last_end = token.span.end;
        }

        result.push_str(&input[last_end..]);
        Ok(result)
    }

    fn substitute_value(&self, value: &Value, commands: Option<&CommandValueMap>) -> ResolveResult<Value> {
        Ok(match value {
            Value::String(s) => Value::String(self.substitute(s, commands)?),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.substitute_value(item, commands))
                    .collect::<ResolveResult<_>>()?,
            ),
            Value::Object(map) => {
                let mut resolved = Map::with_capacity(map.len());
                for (key, item) in map {
                    let resolved_key = self.substitute(key, commands)?;
                    if resolved.contains_key(&resolved_key) {
                        return Err(ResolveError::DuplicateKey {
                            token: key.clone(),
                            key: resolved_key,
                        });
                    }
                    resolved.insert(resolved_key, self.substitute_value(item, commands)?);
                }
                Value::Object(resolved)
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        })
    }
}

impl std::fmt::Debug for VariableResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableResolver")
            .field("context", &self.context)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}
