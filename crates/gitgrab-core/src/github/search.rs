// SPDX-License-Identifier: Apache-2.0

//! Issue search endpoint.

use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{get_json, with_query};
use crate::error::GrabError;

/// One item of a `/search/issues` response, as returned by GitHub.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueItem {
    /// Issue title.
    pub title: String,
    /// Web link of the issue.
    pub html_url: String,
    /// Creation timestamp, ISO-8601.
    pub created_at: String,
    /// Attached labels.
    pub labels: Vec<LabelItem>,
    /// Issue body, absent for empty descriptions.
    pub body: Option<String>,
    /// API link of the repository.
    pub repository_url: String,
    /// `open` or `closed`.
    pub state: String,
    /// Assigned users.
    pub assignees: Vec<UserItem>,
}

/// Label reference inside an issue.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabelItem {
    /// Label name.
    pub name: String,
}

/// User reference inside an issue.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserItem {
    /// User login.
    pub login: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    total_count: u64,
    items: Vec<IssueItem>,
}

/// Runs one issue search and returns the first page of items.
///
/// # Errors
///
/// Returns [`GrabError::SearchFailed`] on a non-success status, whatever the
/// body, or [`GrabError::GitHub`] when no response could be read or decoded.
#[instrument(skip(client))]
pub async fn search_issues(
    client: &Octocrab,
    query: &str,
    sort: &str,
    per_page: u8,
) -> crate::Result<Vec<IssueItem>> {
    let per_page = per_page.to_string();
    let uri = with_query(
        "/search/issues",
        &[
            ("q", query),
            ("sort", sort),
            ("per_page", per_page.as_str()),
            ("type", "public"),
        ],
    );

    let response: SearchResponse = get_json(client, &uri)
        .await
        .map_err(|e| e.into_grab(|status| GrabError::SearchFailed { status }))?;

    debug!(
        total_count = response.total_count,
        returned = response.items.len(),
        "Issue search finished"
    );
    Ok(response.items)
}
