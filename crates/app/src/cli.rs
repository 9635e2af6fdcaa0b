//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use qvars_domain::WorkspaceFolder;

#[derive(Parser, Debug)]
#[command(
    name = "qvars",
    version,
    about = "Expand ${scope:argument} placeholders",
    long_about = "Resolves ${env:NAME}, ${config:key}, ${command:id}, ${workspaceFolder}, ${file} and \
                  related placeholders against the process environment, a settings file and an \
                  editor session. Exits with 0 when resolved, 1 on error and 2 when a command \
                  was cancelled."
)]
pub struct Cli {
    #[command(flatten)]
    pub session: SessionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve placeholders in a string
    Resolve {
        /// Text containing placeholders
        #[arg(value_name = "INPUT")]
        input: String,

        /// Treat INPUT as a JSON document and resolve every string in it
        #[arg(long)]
        json: bool,
    },
    /// Resolve a run configuration file (JSON or YAML) and print it as JSON
    RunConfig {
        /// Path to the run configuration
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// List the placeholder scopes that are understood
    Scopes,
}

/// Where the resolution sources come from.
#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    /// Settings file for ${config:key} (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Session file with workspace folders and the active file
    #[arg(long, global = true, value_name = "PATH")]
    pub session: Option<PathBuf>,

    /// Add a workspace folder
    #[arg(long = "folder", global = true, value_name = "NAME=PATH", value_parser = parse_folder)]
    pub folders: Vec<WorkspaceFolder>,

    /// Active file path
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<String>,

    /// Selected line in the active file
    #[arg(long, global = true, value_name = "N", requires = "file")]
    pub line: Option<u32>,

    /// Selected text in the active file
    #[arg(long, global = true, value_name = "TEXT", requires = "file")]
    pub selected_text: Option<String>,

    /// Register a command answering a fixed value
    #[arg(long = "command", global = true, value_name = "ID=VALUE", value_parser = parse_assignment)]
    pub commands: Vec<(String, String)>,

    /// Register a command answering a shell command's output
    #[arg(long = "shell", global = true, value_name = "ID=CMDLINE", value_parser = parse_assignment)]
    pub shells: Vec<(String, String)>,

    /// Register a command that asks on the terminal
    #[arg(long = "prompt", global = true, value_name = "ID=MESSAGE", value_parser = parse_assignment)]
    pub prompts: Vec<(String, String)>,

    /// Apply Windows rules (case-insensitive env names, drive letters, backslashes)
    #[arg(long, global = true)]
    pub windows: bool,
}

fn parse_folder(raw: &str) -> Result<WorkspaceFolder, String> {
    WorkspaceFolder::parse_pair(raw).map_err(|e| e.to_string())
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => Ok((id.trim().to_string(), value.to_string())),
        _ => Err(format!("expected ID=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve_with_session_flags() {
        let cli = Cli::try_parse_from([
            "qvars",
            "--folder",
            "bell=/q/bell",
            "--file",
            "/q/bell/bell.qasm",
            "--line",
            "7",
            "resolve",
            "${file}",
            "--command",
            "pick=aer",
            "--windows",
        ])
        .unwrap();

        assert_eq!(cli.session.folders, vec![WorkspaceFolder::new("bell", "/q/bell")]);
        assert_eq!(cli.session.file.as_deref(), Some("/q/bell/bell.qasm"));
        assert_eq!(cli.session.line, Some(7));
        assert_eq!(cli.session.commands, vec![("pick".to_string(), "aer".to_string())]);
        assert!(cli.session.windows);
        match cli.command {
            Commands::Resolve { input, json } => {
                assert_eq!(input, "${file}");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_line_requires_file() {
        assert!(Cli::try_parse_from(["qvars", "--line", "3", "scopes"]).is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("when=date +%F").unwrap(),
            ("when".to_string(), "date +%F".to_string())
        );
        assert_eq!(parse_assignment("empty=").unwrap(), ("empty".to_string(), String::new()));
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_bad_folder_rejected() {
        assert!(Cli::try_parse_from(["qvars", "--folder", "nopath", "scopes"]).is_err());
    }
}
