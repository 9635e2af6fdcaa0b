//! Application use cases (business logic orchestration).

mod resolve_run_configuration;

pub use resolve_run_configuration::*;
