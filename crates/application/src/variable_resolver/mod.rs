//! Variable resolution
//!
//! Resolves `${scope}` and `${scope:argument}` placeholders in strings and
//! JSON-like values.
//!
//! Resolution runs in two phases:
//! 1. every distinct `${command:<id>}` is executed once, sequentially, in
//!    order of first appearance;
//! 2. the input is rewritten left to right, each token handed to the
//!    resolver registered for its scope.
//!
//! A cancelled command makes the whole resolution [`Resolution::Cancelled`];
//! the first failing token aborts it with a [`ResolveError`](crate::error::ResolveError).

pub mod commands;
pub mod context;
pub mod engine;
pub mod parser;
pub mod scanner;
pub mod scopes;

pub use commands::{CommandOutcome, CommandSequencer, CommandValueMap};
pub use context::ResolutionContext;
pub use engine::{Resolution, VariableResolver};
pub use parser::{Token, has_tokens, parse_tokens, scope_names};
pub use scopes::{ScopeInput, ScopeRegistry, ScopeResolver};
