//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the resolution engine and the host.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod command_provider;
mod config_accessor;

pub use command_provider::{CommandProvider, CommandProviderError, NoCommands};
pub use config_accessor::{ConfigAccessor, StaticConfig};
