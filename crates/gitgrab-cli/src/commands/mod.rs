// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the gitgrab CLI.

pub mod completion;
pub mod issues;
pub mod languages;
pub mod providers;
pub mod recommend;
pub mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use gitgrab_core::{AppConfig, DigestFields};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::cli::{Commands, OutputContext, SearchArgs};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if !ctx.is_interactive() {
        return None;
    }
    let s = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        s.set_style(style);
    }
    s.set_message(message.to_string());
    s.enable_steady_tick(Duration::from_millis(100));
    Some(s)
}

/// Applies per-command search flags on top of the loaded configuration.
fn apply_search_args(config: &mut AppConfig, args: &SearchArgs) {
    if let Some(limit) = args.limit {
        config.search.result_limit = limit;
    }
    if let Some(label) = &args.label {
        config.search.label.clone_from(label);
    }
    if let Some(sort) = &args.sort {
        config.search.sort.clone_from(sort);
    }
    if args.detailed {
        config.search.fields = DigestFields::Detailed;
    }
}

/// Dispatch to the appropriate command handler.
pub async fn run(command: Commands, ctx: OutputContext, mut config: AppConfig) -> Result<()> {
    match command {
        Commands::Recommend {
            username,
            offline,
            search,
        } => {
            apply_search_args(&mut config, &search);
            config.validate().context("Invalid configuration")?;
            let advisor = recommend::advisor(&config, offline)?;

            let spinner = maybe_spinner(&ctx, &format!("Finding issues for {username}..."));
            let result = recommend::run(&config, &username, advisor).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            output::render(&result?, &ctx)
        }

        Commands::Languages { username } => {
            config.validate().context("Invalid configuration")?;
            let spinner = maybe_spinner(&ctx, "Fetching repositories...");
            let result = languages::run(&config, &username).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            output::render(&result?, &ctx)
        }

        Commands::Issues { languages, search } => {
            apply_search_args(&mut config, &search);
            config.validate().context("Invalid configuration")?;
            debug!(languages = ?languages, "Searching issues");

            let spinner = maybe_spinner(&ctx, "Searching issues...");
            let result = issues::run(&config, languages).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            output::render(&result?, &ctx)
        }

        Commands::Providers => output::render(&providers::run(&config), &ctx),

        Commands::Completion { shell } => completion::run_generate(shell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_search_args_overrides_only_given_flags() {
        let mut config = AppConfig::default();
        let args = SearchArgs {
            limit: Some(5),
            label: None,
            sort: Some("created".to_string()),
            detailed: true,
        };

        apply_search_args(&mut config, &args);

        assert_eq!(config.search.result_limit, 5);
        assert_eq!(config.search.label, "good first issue");
        assert_eq!(config.search.sort, "created");
        assert_eq!(config.search.fields, DigestFields::Detailed);
    }

    #[test]
    fn test_zero_limit_fails_validation() {
        let mut config = AppConfig::default();
        let args = SearchArgs {
            limit: Some(0),
            ..SearchArgs::default()
        };

        apply_search_args(&mut config, &args);

        assert!(config.validate().is_err());
    }
}
