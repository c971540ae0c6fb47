// SPDX-License-Identifier: Apache-2.0

//! Error types for gitgrab.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! The `Display` output of the GitHub variants doubles as the text handed to
//! the report writer, so keep those messages stable.

use thiserror::Error;

/// Errors that can occur during gitgrab operations.
#[derive(Error, Debug)]
pub enum GrabError {
    /// The repository listing for a user returned a non-success status.
    #[error("Error: Could not find user {username}.")]
    UserNotFound {
        /// Username that was looked up.
        username: String,
        /// HTTP status returned by GitHub.
        status: u16,
    },

    /// The issue search returned a non-success status.
    #[error("Error: GitHub API returned {status}")]
    SearchFailed {
        /// HTTP status returned by GitHub.
        status: u16,
    },

    /// GitHub transport or decoding failure (no HTTP status available).
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Error message.
        message: String,
    },

    /// Username was blank.
    #[error("Invalid GitHub username: {username:?}")]
    InvalidUsername {
        /// The rejected input.
        username: String,
    },

    /// AI provider error.
    #[error("AI provider error: {message}")]
    AI {
        /// Error message from the AI provider.
        message: String,
        /// Optional HTTP status code from the provider.
        status: Option<u16>,
        /// Name of the AI provider (e.g., `groq`).
        provider: String,
    },

    /// Rate limit exceeded from an AI provider.
    #[error("Rate limit exceeded on {provider}, retry after {retry_after}s")]
    RateLimited {
        /// Name of the provider that rate limited.
        provider: String,
        /// Number of seconds to wait before retrying.
        retry_after: u64,
    },

    /// No API key configured for the selected AI provider.
    #[error("Missing API key for {provider}: set the {env} environment variable")]
    MissingApiKey {
        /// Provider name.
        provider: String,
        /// Environment variable that should hold the key.
        env: String,
    },

    /// Configuration file or value error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Circuit breaker is open - AI provider is unavailable.
    #[error("Circuit breaker is open - AI provider is temporarily unavailable")]
    CircuitOpen,

    /// The advisor never reached a report.
    #[error("Recommendation did not finish within {steps} steps")]
    AgentStalled {
        /// Number of steps taken before giving up.
        steps: usize,
    },
}

impl GrabError {
    /// HTTP status attached to the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            GrabError::UserNotFound { status, .. } | GrabError::SearchFailed { status } => {
                Some(*status)
            }
            GrabError::AI { status, .. } => *status,
            GrabError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<octocrab::Error> for GrabError {
    fn from(err: octocrab::Error) -> Self {
        // octocrab appends a backtrace after the first line
        let message = err.to_string();
        GrabError::GitHub {
            message: message.lines().next().unwrap_or_default().to_string(),
        }
    }
}

impl From<config::ConfigError> for GrabError {
    fn from(err: config::ConfigError) -> Self {
        GrabError::Config {
            message: err.to_string(),
        }
    }
}
