//! Assembles the resolution context and command provider from the command line.

use anyhow::Context;
use qvars_application::ResolutionContext;
use qvars_domain::{ActiveFile, Platform, Selection};
use qvars_infrastructure::{
    CommandRegistry, FixedValue, ProcessEnvironment, SessionSnapshot, SettingsFile, ShellCommand,
    StdinPrompt,
};

use crate::cli::SessionArgs;

/// Platform rules selected on the command line.
pub const fn platform(args: &SessionArgs) -> Platform {
    if args.windows {
        Platform::Windows
    } else {
        Platform::current()
    }
}

/// Builds the context: process environment, then the session file, then flags.
pub async fn build_context(args: &SessionArgs) -> anyhow::Result<ResolutionContext> {
    let mut context = ProcessEnvironment::for_platform(platform(args)).capture();

    if let Some(path) = &args.session {
        let snapshot = SessionSnapshot::load(path)
            .await
            .with_context(|| format!("failed to load session '{}'", path.display()))?;
        context = snapshot.apply(context);
    }

    for folder in &args.folders {
        context = context.with_workspace_folder(folder.clone());
    }

    if let Some(path) = &args.file {
        let mut file = ActiveFile::new(path.clone());
        if args.line.is_some() || args.selected_text.is_some() {
            file = file.with_selection(Selection::new(
                args.line.unwrap_or_default(),
                args.selected_text.clone().unwrap_or_default(),
            ));
        }
        context = context.with_active_file(file);
    }

    let settings = match &args.settings {
        Some(path) => SettingsFile::load(path)
            .await
            .with_context(|| format!("failed to load settings '{}'", path.display()))?,
        None => SettingsFile::load_default()
            .await
            .context("failed to load default settings")?,
    };

    Ok(context.with_config(settings))
}

/// Registers every command given on the command line.
pub fn build_commands(args: &SessionArgs) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for (id, value) in &args.commands {
        registry.register(id.clone(), FixedValue::new(value.clone()));
    }
    for (id, command_line) in &args.shells {
        registry.register(id.clone(), ShellCommand::new(command_line.clone()));
    }
    for (id, message) in &args.prompts {
        registry.register(id.clone(), StdinPrompt::new(message.clone()));
    }
    tracing::debug!(commands = ?registry.ids(), "commands registered");
    registry
}
