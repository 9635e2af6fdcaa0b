//! Qvars Application - Resolution engine and ports
//!
//! This crate defines the application layer with:
//! - Port traits for the host services (commands, settings)
//! - The placeholder resolution engine
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult, ResolveError, ResolveResult};
pub use ports::{CommandProvider, CommandProviderError, ConfigAccessor, NoCommands, StaticConfig};
pub use use_cases::{ResolveRunConfiguration, ResolveRunConfigurationOutput};
pub use variable_resolver::{Resolution, ResolutionContext, ScopeRegistry, VariableResolver};
