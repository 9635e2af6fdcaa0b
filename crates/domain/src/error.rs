//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A workspace folder has no name.
    #[error("invalid workspace folder: {0}")]
    InvalidWorkspaceFolder(String),

    /// An active-file snapshot has no path.
    #[error("invalid active file: {0}")]
    InvalidActiveFile(String),

    /// A run configuration cannot be launched as given.
    #[error("invalid run configuration: {0}")]
    InvalidRunConfiguration(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
