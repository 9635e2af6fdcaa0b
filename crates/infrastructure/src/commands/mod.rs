//! Command provider backed by locally registered handlers.
//!
//! Each `${command:<id>}` is looked up in a [`CommandRegistry`] and handed to
//! its [`CommandHandler`]: a fixed value, a shell command line or an
//! interactive prompt.

mod handlers;
mod registry;

pub use handlers::{FixedValue, ShellCommand, StdinPrompt, read_answer};
pub use registry::{CommandHandler, CommandRegistry};
