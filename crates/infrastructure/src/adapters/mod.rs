//! Adapters over the running process.

mod process_environment;

pub use process_environment::ProcessEnvironment;
