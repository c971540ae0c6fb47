// SPDX-License-Identifier: Apache-2.0

//! Owned repository listing.

use octocrab::Octocrab;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{get_json, with_query};
use crate::error::GrabError;

/// Characters escaped when a username is placed in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The two fields of a repository that language profiling needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Repository name.
    pub name: String,
    /// Primary language as detected by GitHub.
    #[serde(default)]
    pub language: Option<String>,
}

/// Builds the API route for a user's repositories.
#[must_use]
pub fn user_repos_route(username: &str) -> String {
    format!("/users/{}/repos", utf8_percent_encode(username, PATH_SEGMENT))
}

/// Fetches the most recently updated repositories owned by `username`.
///
/// # Errors
///
/// Returns [`GrabError::UserNotFound`] when GitHub answers with a non-success
/// status, whatever the body, or [`GrabError::GitHub`] when no response could
/// be read or decoded.
#[instrument(skip(client))]
pub async fn fetch_owned_repos(
    client: &Octocrab,
    username: &str,
    per_page: u8,
) -> crate::Result<Vec<RepositorySummary>> {
    let per_page = per_page.to_string();
    let uri = with_query(
        &user_repos_route(username),
        &[("type", "owner"), ("sort", "updated"), ("per_page", per_page.as_str())],
    );

    let repos: Vec<RepositorySummary> = get_json(client, &uri).await.map_err(|e| {
        e.into_grab(|status| GrabError::UserNotFound {
            username: username.to_string(),
            status,
        })
    })?;

    debug!(count = repos.len(), "Fetched owned repositories");
    Ok(repos)
}
