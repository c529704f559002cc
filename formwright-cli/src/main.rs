//! Formwright CLI - build form templates, validate and store submissions.
//!
//! Commands:
//! - `formwright template create|list|show|update|delete`
//! - `formwright section add|rename|move|delete`
//! - `formwright field add|update|delete|move`
//! - `formwright form validate|submit <template> <values.json>`
//! - `formwright submission list|delete`
//!
//! Templates, sections and fields can be referenced by id or by name.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use formwright::commands;
use formwright::Cli;
use formwright_config::{ConfigProvider, FormwrightConfig};
use formwright_store::{FormsContext, StoreError};

/// Pick the tracing filter: `--debug`, then `RUST_LOG`, then configuration.
fn log_filter(debug: bool, config: Option<&FormwrightConfig>) -> EnvFilter {
    if debug {
        return EnvFilter::new("formwright=debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = config
            .map(|c| c.log.filter.as_str())
            .unwrap_or(formwright_config::DEFAULT_LOG_FILTER);
        EnvFilter::new(directive)
    })
}

/// Whether the failure came from the request itself rather than the system.
fn is_user_error(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<StoreError>()
        .is_some_and(StoreError::is_user_error)
}

fn run(cli: Cli, config: FormwrightConfig) -> Result<()> {
    let config = match cli.data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    };

    let mut ctx = FormsContext::open(&config.storage.dir)
        .with_format(config.storage.format)
        .build()
        .with_context(|| format!("failed to open {}", config.storage.dir.display()))?;

    commands::dispatch(cli.command, &mut ctx, cli.json)
}

fn main() {
    let cli = Cli::parse();

    let config = ConfigProvider::new().load();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.debug, config.as_ref().ok()))
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match config
        .context("failed to load configuration")
        .and_then(|config| run(cli, config))
    {
        Ok(()) => 0,
        Err(e) => {
            if !is_user_error(&e) {
                tracing::error!(error = %format!("{e:#}"), "command failed");
            }
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}
