// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # gitgrab Core
//!
//! Core library for gitgrab - good first issue recommendations from a
//! GitHub profile.
//!
//! This crate provides:
//! - Language profiling from a user's recent repositories
//! - Good-first-issue search with a plain text digest
//! - Report writing via an OpenAI-compatible model, or locally
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gitgrab_core::{LocalAdvisor, Recommender, load_config};
//!
//! # async fn example() -> gitgrab_core::Result<()> {
//! let config = load_config()?;
//! config.validate()?;
//!
//! let recommender = Recommender::from_config(&config, Box::new(LocalAdvisor::new()))?;
//! let recommendation = recommender.run("octocat").await?;
//! println!("{}", recommendation.report);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`agent`] - Recommendation runs and advisors
//! - [`ai`] - AI providers and the report prompt
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub REST access
//! - [`profiler`] - Language profiles
//! - [`searcher`] - Issue search and digests

// ============================================================================
// Error Handling
// ============================================================================

pub use error::GrabError;

/// Convenience Result type for gitgrab operations.
///
/// This is equivalent to `std::result::Result<T, GrabError>`.
pub type Result<T> = std::result::Result<T, GrabError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AiConfig, AppConfig, DigestFields, GitHubConfig, SearchConfig, config_dir, config_file_path,
    load_config,
};

// ============================================================================
// Profiling and Search
// ============================================================================

pub use github::repos::RepositorySummary;
pub use profiler::{RepoLanguageProfiler, rank_languages};
pub use searcher::{IssueRecord, IssueSearcher, NO_ISSUES, build_query, short_body};

// ============================================================================
// AI Integration
// ============================================================================

pub use ai::{AiClient, AiProvider, AiStats, ProviderConfig, all_providers, get_provider};

// ============================================================================
// Recommendation Runs
// ============================================================================

pub use agent::{
    Action, Advisor, LlmAdvisor, LocalAdvisor, MAX_STEPS, Recommendation, Recommender, Report,
    ReportInput, Session, Toolbox,
};

// ============================================================================
// Modules
// ============================================================================

pub mod agent;
pub mod ai;
pub mod config;
pub mod error;
pub mod github;
pub mod profiler;
pub mod retry;
pub mod searcher;
