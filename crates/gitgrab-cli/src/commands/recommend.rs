// SPDX-License-Identifier: Apache-2.0

//! Full recommendation pipeline.

use anyhow::Result;
use gitgrab_core::{Advisor, AiClient, AppConfig, LlmAdvisor, LocalAdvisor, Recommender};
use tracing::debug;

use super::types::RecommendResult;

/// Picks the report writer: local when offline, the configured model otherwise.
pub fn advisor(config: &AppConfig, offline: bool) -> Result<Box<dyn Advisor>> {
    if offline {
        debug!("Using local report renderer");
        return Ok(Box::new(LocalAdvisor::new()));
    }
    let client = AiClient::new(&config.ai)?;
    debug!(provider = %config.ai.provider, model = %config.ai.model, "Using AI report writer");
    Ok(Box::new(LlmAdvisor::new(client)))
}

/// Runs profile, search and report for `username`.
pub async fn run(
    config: &AppConfig,
    username: &str,
    advisor: Box<dyn Advisor>,
) -> Result<RecommendResult> {
    let recommender = Recommender::from_config(config, advisor)?;
    let recommendation = recommender.run(username).await?;
    Ok(RecommendResult { recommendation })
}
