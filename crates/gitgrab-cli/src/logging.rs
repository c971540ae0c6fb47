// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the gitgrab CLI.
//!
//! Uses `tracing` with `tracing-subscriber`, writing to stderr so that
//! structured output on stdout stays clean. The level is controlled with the
//! `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Request details and retries
//! RUST_LOG=gitgrab=debug gitgrab recommend octocat
//!
//! # Include octocrab internals
//! RUST_LOG=gitgrab=debug,octocrab=debug gitgrab languages octocat
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Directives used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "gitgrab=warn,octocrab=error,reqwest=error";

/// Initialize the logging subsystem.
///
/// User-facing verbosity (`-v`) is handled by `OutputContext`; tracing
/// output is driven only by `RUST_LOG`.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
