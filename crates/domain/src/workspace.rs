//! Workspace and editor snapshots
//!
//! Read-only views of the host's open folders and focused document, taken
//! once per resolve session.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// An open workspace folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceFolder {
    /// Display name, used by `${workspaceFolder:name}` selection.
    pub name: String,

    /// Absolute path of the folder root.
    pub root_path: String,
}

impl WorkspaceFolder {
    /// Creates a new workspace folder.
    #[must_use]
    pub fn new(name: impl Into<String>, root_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_path: root_path.into(),
        }
    }

    /// Parses a `NAME=PATH` pair.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidWorkspaceFolder` if either side is empty
    /// or the separator is missing.
    pub fn parse_pair(pair: &str) -> DomainResult<Self> {
        match pair.split_once('=') {
            Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
                Ok(Self::new(name.trim(), path.trim()))
            }
            _ => Err(DomainError::InvalidWorkspaceFolder(format!(
                "expected NAME=PATH, got '{pair}'"
            ))),
        }
    }

    /// Validates the folder.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidWorkspaceFolder` if name or path is empty.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.is_empty() {
            return Err(DomainError::InvalidWorkspaceFolder(
                "folder name is empty".to_string(),
            ));
        }
        if self.root_path.is_empty() {
            return Err(DomainError::InvalidWorkspaceFolder(format!(
                "folder '{}' has no root path",
                self.name
            )));
        }
        Ok(())
    }
}

/// The current selection in the active document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Zero-based line of the selection's active position.
    pub line: u32,

    /// Selected text; empty when nothing is selected.
    #[serde(default)]
    pub text: String,
}

impl Selection {
    /// Creates a selection.
    #[must_use]
    pub fn new(line: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

/// Snapshot of the focused editable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFile {
    /// Absolute path of the document.
    pub path: String,

    /// Current selection, if the host reports one.
    #[serde(default)]
    pub selection: Option<Selection>,
}

impl ActiveFile {
    /// Creates a snapshot with no selection.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            selection: None,
        }
    }

    /// Sets the selection.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Returns the selected text if it is non-empty.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        self.selection
            .as_ref()
            .map(|s| s.text.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Validates the snapshot.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidActiveFile` if the path is empty.
    pub fn validate(&self) -> DomainResult<()> {
        if self.path.is_empty() {
            return Err(DomainError::InvalidActiveFile("path is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        let folder = WorkspaceFolder::parse_pair("circuits=/home/q/circuits").unwrap();
        assert_eq!(folder.name, "circuits");
        assert_eq!(folder.root_path, "/home/q/circuits");
    }

    #[test]
    fn test_parse_pair_keeps_later_equals_in_path() {
        let folder = WorkspaceFolder::parse_pair("odd=/tmp/a=b").unwrap();
        assert_eq!(folder.root_path, "/tmp/a=b");
    }

    #[test]
    fn test_parse_pair_rejects_malformed() {
        assert!(WorkspaceFolder::parse_pair("no-separator").is_err());
        assert!(WorkspaceFolder::parse_pair("=/path").is_err());
        assert!(WorkspaceFolder::parse_pair("name=").is_err());
    }

    #[test]
    fn test_validate_folder() {
        assert!(WorkspaceFolder::new("a", "/a").validate().is_ok());
        assert!(WorkspaceFolder::new("", "/a").validate().is_err());
        assert!(WorkspaceFolder::new("a", "").validate().is_err());
    }

    #[test]
    fn test_selected_text_filters_empty() {
        let file = ActiveFile::new("/a.qasm").with_selection(Selection::new(3, ""));
        assert_eq!(file.selected_text(), None);

        let file = ActiveFile::new("/a.qasm").with_selection(Selection::new(3, "h q[0];"));
        assert_eq!(file.selected_text(), Some("h q[0];"));
    }

    #[test]
    fn test_active_file_deserializes_without_selection() {
        let file: ActiveFile = serde_json::from_str(r#"{"path": "/a.qasm"}"#).unwrap();
        assert_eq!(file, ActiveFile::new("/a.qasm"));
    }

    #[test]
    fn test_folder_uses_camel_case() {
        let folder: WorkspaceFolder =
            serde_json::from_str(r#"{"name": "p", "rootPath": "/p"}"#).unwrap();
        assert_eq!(folder.root_path, "/p");
    }
}
