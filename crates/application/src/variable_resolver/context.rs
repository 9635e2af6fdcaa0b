//! Resolution context
//!
//! Immutable snapshot of everything a scope resolver may read: environment,
//! workspace folders, active document, settings and working directory.

use std::fmt;
use std::sync::Arc;

use qvars_domain::{ActiveFile, ConfigValue, EnvironmentSnapshot, Platform, WorkspaceFolder};

use crate::ports::ConfigAccessor;

/// Holds all sources for one resolve session.
///
/// Built once with the `with_*` methods and then only read; it can be shared
/// between concurrent resolutions behind an `Arc`.
#[derive(Clone, Default)]
pub struct ResolutionContext {
    platform: Platform,
    environment: EnvironmentSnapshot,
    workspace_folders: Vec<WorkspaceFolder>,
    active_file: Option<ActiveFile>,
    config: Option<Arc<dyn ConfigAccessor>>,
    cwd: String,
}

impl ResolutionContext {
    /// Creates an empty context for `platform`.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            environment: EnvironmentSnapshot::new(platform),
            ..Self::default()
        }
    }

    /// Sets the environment, folding keys for the context's platform.
    #[must_use]
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.environment = EnvironmentSnapshot::from_vars(self.platform, vars);
        self
    }

    /// Appends a workspace folder.
    #[must_use]
    pub fn with_workspace_folder(mut self, folder: WorkspaceFolder) -> Self {
        self.workspace_folders.push(folder);
        self
    }

    /// Replaces the workspace folders.
    #[must_use]
    pub fn with_workspace_folders(mut self, folders: Vec<WorkspaceFolder>) -> Self {
        self.workspace_folders = folders;
        self
    }

    /// Sets the active document.
    #[must_use]
    pub fn with_active_file(mut self, file: ActiveFile) -> Self {
        self.active_file = Some(file);
        self
    }

    /// Sets the settings source.
    #[must_use]
    pub fn with_config(mut self, config: impl ConfigAccessor + 'static) -> Self {
        self.config = Some(Arc::new(config));
        self
    }

    /// Sets a shared settings source.
    #[must_use]
    pub fn with_shared_config(mut self, config: Arc<dyn ConfigAccessor>) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the working directory used when no folder applies.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// The platform rules in effect.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// The folded environment.
    #[must_use]
    pub const fn environment(&self) -> &EnvironmentSnapshot {
        &self.environment
    }

    /// Open workspace folders, in host order.
    #[must_use]
    pub fn workspace_folders(&self) -> &[WorkspaceFolder] {
        &self.workspace_folders
    }

    /// The focused document, if any.
    #[must_use]
    pub const fn active_file(&self) -> Option<&ActiveFile> {
        self.active_file.as_ref()
    }

    /// Reads a setting. Always `None` when no settings source is attached.
    #[must_use]
    pub fn config_value(&self, key: &str) -> Option<ConfigValue> {
        self.config.as_ref().and_then(|config| config.get(key))
    }

    /// The captured working directory.
    #[must_use]
    pub fn cwd(&self) -> &str {
        &self.cwd
    }
}

impl fmt::Debug for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("platform", &self.platform)
            .field("environment", &self.environment.len())
            .field("workspace_folders", &self.workspace_folders)
            .field("active_file", &self.active_file)
            .field("config", &self.config.is_some())
            .field("cwd", &self.cwd)
            .finish()
    }
}
