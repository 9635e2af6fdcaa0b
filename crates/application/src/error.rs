//! Application error types

use thiserror::Error;
use qvars_domain::DomainError;

use crate::ports::CommandProviderError;

/// Reasons a placeholder resolution is abandoned.
///
/// Every variant carries the placeholder text it was raised for.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// `${env}` was used without a variable name.
    #[error("'{token}' cannot be resolved because no environment variable name is given")]
    MissingEnvVarName {
        /// The offending placeholder.
        token: String,
    },

    /// `${config}` was used without a setting name.
    #[error("'{token}' cannot be resolved because no settings name is given")]
    MissingConfigName {
        /// The offending placeholder.
        token: String,
    },

    /// The setting does not exist.
    #[error("'{token}' cannot be resolved because setting '{key}' not found")]
    ConfigNotFound {
        /// The offending placeholder.
        token: String,
        /// The setting that was looked up.
        key: String,
    },

    /// The setting is an object or array.
    #[error("'{token}' cannot be resolved because '{key}' is a structured value")]
    ConfigNotString {
        /// The offending placeholder.
        token: String,
        /// The setting that was looked up.
        key: String,
    },

    /// A command placeholder was found but no command values were computed.
    #[error("'{token}' cannot be resolved because command values were not computed")]
    CommandNoMapping {
        /// The offending placeholder.
        token: String,
    },

    /// The command ran but produced no value for this placeholder.
    #[error("'{token}' can not be resolved because the command has no value")]
    NoValueForCommand {
        /// The offending placeholder.
        token: String,
    },

    /// The scope is recognised but not supported.
    #[error("'{token}' not implemented")]
    NotImplemented {
        /// The offending placeholder.
        token: String,
    },

    /// A folder was named but there are no workspace folders at all.
    #[error("'{token}' can not be resolved. No such folder '{folder}'")]
    CanNotFindFolder {
        /// The offending placeholder.
        token: String,
        /// The requested folder name.
        folder: String,
    },

    /// No single workspace folder could be chosen.
    #[error(
        "'{token}' cannot resolve workspace. Please open a single folder, or specify a root path name"
    )]
    CanNotResolveWorkspace {
        /// The offending placeholder.
        token: String,
    },

    /// There is no active document or selection.
    #[error(
        "'{token}' cannot be resolved. Make sure to have a line selected in the active editor"
    )]
    CanNotResolveLineNumber {
        /// The offending placeholder.
        token: String,
    },

    /// There is no non-empty selection.
    #[error(
        "'{token}' can not be resolved. Make sure to have some text selected in the active editor"
    )]
    CanNotResolveSelectedText {
        /// The offending placeholder.
        token: String,
    },

    /// A command returned something other than a string.
    #[error(
        "command '{command}' did not return a string result. Only strings are supported as results for commands used for variable substitution"
    )]
    StringsOnlySupported {
        /// The command identifier.
        command: String,
    },

    /// Two object keys resolved to the same text.
    #[error("'{token}' resolves to '{key}', which another key in the same object already produced")]
    DuplicateKey {
        /// The key that collided, before resolution.
        token: String,
        /// The resolved key.
        key: String,
    },

    /// The command provider rejected the invocation.
    #[error(transparent)]
    Provider(#[from] CommandProviderError),
}

/// Result type alias for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Placeholder resolution failed.
    #[error("resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// A value could not be converted to or from its document form.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
