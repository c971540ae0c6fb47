// SPDX-License-Identifier: Apache-2.0

//! gitgrab - good first issues that match a GitHub profile.
//!
//! Profiles a user's recent repositories by language and recommends open
//! "good first issue" items, formatted by an AI model or locally.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use gitgrab_core::ai::registry;
use gitgrab_core::config::{self, AppConfig};
use tracing::debug;

use crate::cli::{Cli, OutputContext};

/// Loads configuration and applies the global CLI overrides.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    if let Some(provider) = &cli.provider {
        registry::get_provider(provider)
            .ok_or_else(|| anyhow::anyhow!("Unknown AI provider: {provider}"))?;
        config.ai.provider.clone_from(provider);
        debug!("Overriding AI provider to: {provider}");
    }

    if let Some(model) = &cli.model {
        config.ai.model.clone_from(model);
        debug!("Overriding AI model to: {model}");
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);
    commands::run(cli.command, output_ctx, config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), errors::format_error(&e));
            ExitCode::FAILURE
        }
    }
}
