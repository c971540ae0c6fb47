// SPDX-License-Identifier: Apache-2.0

//! Good-first-issue search and digest rendering.
//!
//! The digest is a plain text block per issue. It is the exact text the
//! report writer receives, so its field labels are part of the contract.

use std::fmt::Write as _;

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::{DigestFields, GitHubConfig, SearchConfig};
use crate::github::create_client;
use crate::github::search::{IssueItem, search_issues};

/// Digest returned when the search has no hits.
pub const NO_ISSUES: &str = "No open issues found for these languages.";

/// Placeholder for an absent field.
pub const NONE: &str = "None";

/// An open issue as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Issue title.
    pub title: String,
    /// Web link of the issue.
    pub html_url: String,
    /// Creation timestamp exactly as GitHub returned it.
    pub created_at: String,
    /// Label names.
    pub labels: Vec<String>,
    /// Issue body.
    pub body: Option<String>,
    /// Web link of the repository.
    pub repository_url: String,
    /// Issue state.
    pub state: String,
    /// Assignee logins.
    pub assignees: Vec<String>,
}

impl IssueRecord {
    /// Converts a search item, rewriting the repository API link to its web
    /// form.
    #[must_use]
    pub fn from_item(item: IssueItem, github: &GitHubConfig) -> Self {
        Self {
            repository_url: rewrite_repository_url(
                &item.repository_url,
                &github.repos_api_prefix(),
                &github.web_prefix(),
            ),
            title: item.title,
            html_url: item.html_url,
            created_at: item.created_at,
            labels: item.labels.into_iter().map(|l| l.name).collect(),
            body: item.body,
            state: item.state,
            assignees: item.assignees.into_iter().map(|u| u.login).collect(),
        }
    }

    /// Label names joined with `", "`, or `None`.
    #[must_use]
    pub fn labels_display(&self) -> String {
        join_or_none(&self.labels)
    }

    /// Assignee logins joined with `", "`, or `None`.
    #[must_use]
    pub fn assignees_display(&self) -> String {
        join_or_none(&self.assignees)
    }

    /// Body cut to `limit` characters, or `None`.
    #[must_use]
    pub fn short_body(&self, limit: usize) -> String {
        short_body(self.body.as_deref(), limit)
    }
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        NONE.to_string()
    } else {
        values.join(", ")
    }
}

fn or_none(value: &str) -> &str {
    if value.trim().is_empty() { NONE } else { value }
}

/// Cuts a body to at most `limit` characters.
///
/// Counts characters, not bytes. Absent or empty bodies become `None`.
///
/// # Examples
///
/// ```
/// use gitgrab_core::searcher::short_body;
///
/// assert_eq!(short_body(Some("héllo"), 2), "hé");
/// assert_eq!(short_body(Some(""), 500), "None");
/// assert_eq!(short_body(None, 500), "None");
/// ```
#[must_use]
pub fn short_body(body: Option<&str>, limit: usize) -> String {
    match body {
        Some(text) if !text.is_empty() => text.chars().take(limit).collect(),
        _ => NONE.to_string(),
    }
}

/// Replaces the API prefix of a repository link with the web prefix.
///
/// Links that do not start with the API prefix are returned unchanged.
#[must_use]
pub fn rewrite_repository_url(url: &str, api_prefix: &str, web_prefix: &str) -> String {
    match url.strip_prefix(api_prefix) {
        Some(rest) => format!("{web_prefix}{rest}"),
        None => url.to_string(),
    }
}

fn language_qualifier(language: &str) -> String {
    if language.contains(char::is_whitespace) {
        format!("language:\"{language}\"")
    } else {
        format!("language:{language}")
    }
}

/// Builds the issue search query.
///
/// All languages are listed as free text and the first one becomes the
/// `language:` qualifier. The qualifier is left out when there is no
/// primary language.
///
/// # Examples
///
/// ```
/// use gitgrab_core::searcher::build_query;
///
/// let langs = vec!["Python".to_string(), "Go".to_string()];
/// assert_eq!(
///     build_query(&langs, "good first issue"),
///     "Python Go language:Python is:issue state:open label:\"good first issue\""
/// );
/// assert_eq!(
///     build_query(&[], "good first issue"),
///     "is:issue state:open label:\"good first issue\""
/// );
/// ```
#[must_use]
pub fn build_query(languages: &[String], label: &str) -> String {
    let languages: Vec<&str> = languages
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut parts: Vec<String> = languages.iter().map(ToString::to_string).collect();
    if let Some(primary) = languages.first() {
        parts.push(language_qualifier(primary));
    }
    parts.push("is:issue".to_string());
    parts.push("state:open".to_string());
    parts.push(format!("label:\"{}\"", label.trim()));
    parts.join(" ")
}

/// Renders one digest block, terminated by `---`.
#[must_use]
pub fn format_issue_block(issue: &IssueRecord, fields: DigestFields, body_limit: usize) -> String {
    let mut block = String::new();
    let _ = writeln!(block, "Title: {}", or_none(&issue.title));
    let _ = writeln!(block, "Created On: {}", or_none(&issue.created_at));
    let _ = writeln!(block, "Issue Link: {}", or_none(&issue.html_url));
    if fields == DigestFields::Detailed {
        let _ = writeln!(block, "Repository: {}", or_none(&issue.repository_url));
    }
    let _ = writeln!(block, "Labels: {}", issue.labels_display());
    if fields == DigestFields::Detailed {
        let _ = writeln!(block, "State: {}", or_none(&issue.state));
        let _ = writeln!(block, "Assignees: {}", issue.assignees_display());
    }
    let _ = writeln!(block, "Body: {}", issue.short_body(body_limit));
    block.push_str("---");
    block
}

/// Searches open good-first-issues for a set of languages.
#[derive(Debug, Clone)]
pub struct IssueSearcher {
    client: Octocrab,
    github: GitHubConfig,
    search: SearchConfig,
}

impl IssueSearcher {
    /// Creates a searcher with its own anonymous GitHub client.
    ///
    /// # Errors
    ///
    /// Returns an error if the GitHub client cannot be built.
    pub fn new(github: &GitHubConfig, search: &SearchConfig) -> crate::Result<Self> {
        Ok(Self::with_client(
            create_client(github)?,
            github.clone(),
            search.clone(),
        ))
    }

    /// Creates a searcher around an existing client.
    #[must_use]
    pub fn with_client(client: Octocrab, github: GitHubConfig, search: SearchConfig) -> Self {
        Self {
            client,
            github,
            search,
        }
    }

    /// Search settings in use.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.search
    }

    /// Fetches matching issues.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GrabError::SearchFailed`] if GitHub rejects the
    /// search.
    #[instrument(skip(self), fields(label = %self.search.label, limit = self.search.result_limit))]
    pub async fn fetch(&self, languages: &[String]) -> crate::Result<Vec<IssueRecord>> {
        let query = build_query(languages, &self.search.label);
        debug!(query = %query, "Searching issues");

        let items = search_issues(
            &self.client,
            &query,
            &self.search.sort,
            self.search.result_limit,
        )
        .await?;

        Ok(items
            .into_iter()
            .map(|item| IssueRecord::from_item(item, &self.github))
            .collect())
    }

    /// Renders issues as a digest, or the no-issues sentinel.
    #[must_use]
    pub fn render_digest(&self, issues: &[IssueRecord]) -> String {
        if issues.is_empty() {
            return NO_ISSUES.to_string();
        }
        issues
            .iter()
            .map(|issue| format_issue_block(issue, self.search.fields, self.search.body_limit))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Fetches matching issues and renders them as a digest.
    ///
    /// # Errors
    ///
    /// Same as [`IssueSearcher::fetch`].
    pub async fn search(&self, languages: &[String]) -> crate::Result<String> {
        let issues = self.fetch(languages).await?;
        Ok(self.render_digest(&issues))
    }
}
