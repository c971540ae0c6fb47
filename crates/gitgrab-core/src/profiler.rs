// SPDX-License-Identifier: Apache-2.0

//! Language profile of a GitHub user.
//!
//! Reads the user's most recently updated owned repositories and ranks
//! their primary languages by frequency.

use octocrab::Octocrab;
use tracing::{debug, instrument};

use crate::config::GitHubConfig;
use crate::error::GrabError;
use crate::github::create_client;
use crate::github::repos::{RepositorySummary, fetch_owned_repos};

/// Separator between languages in a profile string.
pub const LANGUAGE_SEPARATOR: &str = ", ";

/// Ranks repository languages by how often they occur.
///
/// Repositories without a language are skipped. Ties keep the order in
/// which the languages were first seen. At most `limit` languages are
/// returned, without duplicates.
///
/// # Examples
///
/// ```
/// use gitgrab_core::github::repos::RepositorySummary;
/// use gitgrab_core::profiler::rank_languages;
///
/// let repo = |lang: Option<&str>| RepositorySummary {
///     name: "r".to_string(),
///     language: lang.map(ToString::to_string),
/// };
/// let repos = [repo(Some("Go")), repo(None), repo(Some("Rust")), repo(Some("Rust"))];
/// assert_eq!(rank_languages(&repos, 5), vec!["Rust", "Go"]);
/// ```
#[must_use]
pub fn rank_languages(repos: &[RepositorySummary], limit: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for language in repos
        .iter()
        .filter_map(|r| r.language.as_deref())
        .filter(|l| !l.trim().is_empty())
    {
        match counts.iter_mut().find(|(seen, _)| *seen == language) {
            Some((_, count)) => *count += 1,
            None => counts.push((language, 1)),
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(language, _)| language.to_string())
        .collect()
}

/// Builds language profiles from a user's repositories.
#[derive(Debug, Clone)]
pub struct RepoLanguageProfiler {
    client: Octocrab,
    config: GitHubConfig,
}

impl RepoLanguageProfiler {
    /// Creates a profiler with its own anonymous GitHub client.
    ///
    /// # Errors
    ///
    /// Returns an error if the GitHub client cannot be built.
    pub fn new(config: &GitHubConfig) -> crate::Result<Self> {
        Ok(Self::with_client(create_client(config)?, config.clone()))
    }

    /// Creates a profiler around an existing client.
    #[must_use]
    pub fn with_client(client: Octocrab, config: GitHubConfig) -> Self {
        Self { client, config }
    }

    /// Returns the user's top languages, most frequent first.
    ///
    /// # Errors
    ///
    /// Returns [`GrabError::InvalidUsername`] for a blank username, or
    /// [`GrabError::UserNotFound`] if GitHub rejects the repository listing.
    #[instrument(skip(self))]
    pub async fn languages(&self, username: &str) -> crate::Result<Vec<String>> {
        if username.trim().is_empty() {
            return Err(GrabError::InvalidUsername {
                username: username.to_string(),
            });
        }
        let repos = fetch_owned_repos(&self.client, username, self.config.repo_limit).await?;
        let languages = rank_languages(&repos, self.config.language_limit);
        debug!(repos = repos.len(), languages = ?languages, "Ranked languages");
        Ok(languages)
    }

    /// Returns the user's top languages as one comma separated string.
    ///
    /// An empty string means none of the repositories has a language.
    ///
    /// # Errors
    ///
    /// Same as [`RepoLanguageProfiler::languages`].
    pub async fn profile(&self, username: &str) -> crate::Result<String> {
        Ok(self.languages(username).await?.join(LANGUAGE_SEPARATOR))
    }
}
