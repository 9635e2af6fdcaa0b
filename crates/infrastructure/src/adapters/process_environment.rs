//! Process environment adapter

use std::env;

use qvars_application::ResolutionContext;
use qvars_domain::Platform;

/// Captures the current process's environment and working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment {
    platform: Platform,
}

impl ProcessEnvironment {
    /// Creates an adapter applying the rules of the platform this binary runs on.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            platform: Platform::current(),
        }
    }

    /// Creates an adapter applying `platform`'s rules instead.
    #[must_use]
    pub const fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }

    /// Environment variables that are valid UTF-8.
    #[must_use]
    pub fn variables() -> Vec<(String, String)> {
        env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// The working directory, or an empty string if it cannot be read.
    #[must_use]
    pub fn working_directory() -> String {
        match env::current_dir() {
            Ok(dir) => dir.to_string_lossy().into_owned(),
            Err(e) => {
                tracing::warn!(error = %e, "cannot read working directory");
                String::new()
            }
        }
    }

    /// Builds a context seeded with the environment and working directory.
    #[must_use]
    pub fn capture(&self) -> ResolutionContext {
        let variables = Self::variables();
        tracing::debug!(count = variables.len(), platform = ?self.platform, "captured environment");
        ResolutionContext::new(self.platform)
            .with_environment(variables)
            .with_cwd(Self::working_directory())
    }
}
