// SPDX-License-Identifier: Apache-2.0

//! Issue search for explicit languages.

use anyhow::Result;
use gitgrab_core::{AppConfig, IssueSearcher, build_query};

use super::types::IssuesResult;

/// Searches good first issues for `languages`.
pub async fn run(config: &AppConfig, languages: Vec<String>) -> Result<IssuesResult> {
    let searcher = IssueSearcher::new(&config.github, &config.search)?;
    let issues = searcher.fetch(&languages).await?;
    let digest = searcher.render_digest(&issues);
    Ok(IssuesResult {
        query: build_query(&languages, &config.search.label),
        languages,
        issues,
        digest,
    })
}
