//! File-backed sources for a resolve session.

mod session_file;
mod settings_file;

pub use session_file::{SessionError, SessionSnapshot};
pub use settings_file::{SettingsError, SettingsFile};
