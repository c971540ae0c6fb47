// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for gitgrab.
//!
//! Uses clap's derive API for declarative CLI parsing.

use std::io::IsTerminal;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Extended help text for the completion subcommand with shell-specific examples.
const COMPLETION_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc or ~/.bash_profile:
      eval "$(gitgrab completion bash)"

  zsh
    Generate completion file:
      mkdir -p ~/.zsh/completions
      gitgrab completion zsh > ~/.zsh/completions/_gitgrab

    Add to ~/.zshrc (before compinit):
      fpath=(~/.zsh/completions $fpath)
      autoload -U compinit && compinit -i

  fish
    gitgrab completion fish > ~/.config/fish/completions/gitgrab.fish
"#;

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
    /// Markdown output
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress)
    pub quiet: bool,
    /// Show extra details such as model usage
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// gitgrab - good first issues that match your GitHub profile.
///
/// Looks at a user's recently updated repositories, works out their main
/// languages and recommends open "good first issue" items in those languages.
#[derive(Parser)]
#[command(name = "gitgrab")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json, yaml, markdown)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, progress)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Show extra details such as model usage
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Override configured AI provider (e.g., groq, openrouter)
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Override configured AI model (e.g., qwen/qwen3-32b)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Search options shared by `recommend` and `issues`.
#[derive(Args, Clone, Default)]
pub struct SearchArgs {
    /// Number of issues to return (1-100)
    #[arg(long, short = 'n')]
    pub limit: Option<u8>,

    /// Issue label to filter on
    #[arg(long, short = 'l')]
    pub label: Option<String>,

    /// Sort key (updated, created, comments)
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Include state, assignees and repository for each issue
    #[arg(long)]
    pub detailed: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Recommend good first issues for a GitHub user
    Recommend {
        /// GitHub username
        username: String,

        /// Render the report locally instead of with an AI model
        #[arg(long)]
        offline: bool,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Show a user's top languages
    Languages {
        /// GitHub username
        username: String,
    },

    /// Search good first issues for one or more languages
    Issues {
        /// Languages, most important first
        #[arg(value_name = "LANGUAGE")]
        languages: Vec<String>,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// List available AI providers and models
    Providers,

    /// Generate a shell completion script (output to stdout)
    #[command(after_long_help = COMPLETION_HELP)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
