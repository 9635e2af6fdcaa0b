//! qvars - Main Entry Point
//!
//! Resolves `${scope:argument}` placeholders from the command line.
//! Resolved output goes to stdout; diagnostics go to stderr.

mod cli;
mod logging;
mod session;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use qvars_application::{Resolution, ResolveRunConfiguration, ScopeRegistry, VariableResolver};
use qvars_domain::RunConfiguration;
use qvars_infrastructure::{DocumentFormat, to_json_pretty};
use serde_json::Value;

use crate::cli::{Cli, Commands};

/// Exit status when a command was cancelled.
const EXIT_CANCELLED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(Resolution::Resolved(())) => ExitCode::SUCCESS,
        Ok(Resolution::Cancelled) => {
            eprintln!("cancelled");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<Resolution<()>> {
    if matches!(cli.command, Commands::Scopes) {
        for name in ScopeRegistry::standard().names() {
            println!("{name}");
        }
        return Ok(Resolution::Resolved(()));
    }

    let context = session::build_context(&cli.session).await?;
    let commands = session::build_commands(&cli.session);
    let resolver = VariableResolver::new(context).with_shared_provider(Arc::new(commands));

    match cli.command {
        Commands::Resolve { input, json: false } => {
            let resolution = resolver.resolve(&input).await?;
            Ok(resolution.map(|text| println!("{text}")))
        }
        Commands::Resolve { input, json: true } => {
            let value: Value = serde_json::from_str(&input).context("INPUT is not valid JSON")?;
            let resolution = resolver.resolve_value(&value).await?;
            print_json(resolution)
        }
        Commands::RunConfig { path } => {
            let configuration = load_run_configuration(&path).await?;
            let output = ResolveRunConfiguration::new(resolver)
                .execute(&configuration)
                .await?;
            print_json(output.resolution)
        }
        Commands::Scopes => Ok(Resolution::Resolved(())),
    }
}

async fn load_run_configuration(path: &Path) -> anyhow::Result<RunConfiguration> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let configuration = DocumentFormat::from_path(path)
        .parse(&content)
        .with_context(|| format!("'{}' is not a run configuration", path.display()))?;
    Ok(configuration)
}

fn print_json<T: serde::Serialize>(resolution: Resolution<T>) -> anyhow::Result<Resolution<()>> {
    match resolution {
        Resolution::Resolved(value) => {
            print!("{}", to_json_pretty(&value)?);
            Ok(Resolution::Resolved(()))
        }
        Resolution::Cancelled => Ok(Resolution::Cancelled),
    }
}
