// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.
//!
//! Command handlers return data instead of printing directly; the `output`
//! module renders them.

use gitgrab_core::{IssueRecord, Recommendation};
use serde::Serialize;

/// Result from the recommend command.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RecommendResult {
    /// The finished recommendation.
    pub recommendation: Recommendation,
}

/// Result from the languages command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LanguagesResult {
    /// GitHub username.
    pub username: String,
    /// Top languages, most frequent first.
    pub languages: Vec<String>,
}

/// Result from the issues command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IssuesResult {
    /// Languages searched for.
    pub languages: Vec<String>,
    /// Search query sent to GitHub.
    pub query: String,
    /// Matching issues.
    pub issues: Vec<IssueRecord>,
    /// Digest text of the issues.
    pub digest: String,
}

/// One entry of the providers command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderSummary {
    /// Provider name used in config and `--provider`.
    pub name: String,
    /// Human readable name.
    pub display_name: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Known model identifiers, default first.
    pub models: Vec<String>,
    /// Whether this is the configured provider.
    pub active: bool,
}

/// Result from the providers command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProvidersResult {
    /// Registered providers.
    pub providers: Vec<ProviderSummary>,
}
