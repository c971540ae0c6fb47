// SPDX-License-Identifier: Apache-2.0

//! Language profile of a user.

use anyhow::Result;
use gitgrab_core::{AppConfig, RepoLanguageProfiler};

use super::types::LanguagesResult;

/// Fetches the top languages of `username`.
pub async fn run(config: &AppConfig, username: &str) -> Result<LanguagesResult> {
    let username = username.trim();
    let profiler = RepoLanguageProfiler::new(&config.github)?;
    let languages = profiler.languages(username).await?;
    Ok(LanguagesResult {
        username: username.to_string(),
        languages,
    })
}
