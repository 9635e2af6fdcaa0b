//! Editor session snapshot.
//!
//! A session file describes what a host editor would report: the open
//! workspace folders and the focused document.
//!
//! ```text
//! {
//!   "folders": [{"name": "bell", "rootPath": "/home/q/bell"}],
//!   "activeFile": {"path": "/home/q/bell/bell.qasm", "selection": {"line": 3, "text": "h q[0];"}}
//! }
//! ```

use std::path::{Path, PathBuf};

use qvars_application::ResolutionContext;
use qvars_domain::{ActiveFile, DomainError, WorkspaceFolder};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::serialization::{DocumentFormat, SerializationError};

/// Error type for session file operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// IO error during file operations.
    #[error("IO error reading '{path}': {source}")]
    Io {
        /// The session file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// The snapshot describes an invalid folder or document.
    #[error("invalid session: {0}")]
    Invalid(#[from] DomainError),
}

/// Folders and focused document of an editor session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Open workspace folders, in order.
    #[serde(default)]
    pub folders: Vec<WorkspaceFolder>,

    /// The focused document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_file: Option<ActiveFile>,
}

impl SessionSnapshot {
    /// Loads and validates a snapshot from `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub async fn load(path: &Path) -> Result<Self, SessionError> {
        let content = fs::read(path).await.map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot: Self = DocumentFormat::from_path(path).parse(&content)?;
        snapshot.validate()?;

        tracing::info!(
            path = %path.display(),
            folders = snapshot.folders.len(),
            active_file = snapshot.active_file.is_some(),
            "session loaded"
        );
        Ok(snapshot)
    }

    /// Checks every folder and the active document.
    ///
    /// # Errors
    /// Returns the first `DomainError` found.
    pub fn validate(&self) -> Result<(), DomainError> {
        for folder in &self.folders {
            folder.validate()?;
        }
        if let Some(file) = &self.active_file {
            file.validate()?;
        }
        Ok(())
    }

    /// Adds the snapshot's folders and document to `context`.
    ///
    /// Folders are appended after any already present; the active file
    /// replaces the context's one only if the snapshot has one.
    #[must_use]
    pub fn apply(self, mut context: ResolutionContext) -> ResolutionContext {
        for folder in self.folders {
            context = context.with_workspace_folder(folder);
        }
        match self.active_file {
            Some(file) => context.with_active_file(file),
            None => context,
        }
    }
}
