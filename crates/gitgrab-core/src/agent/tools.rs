// SPDX-License-Identifier: Apache-2.0

//! Tool surface of a recommendation run.
//!
//! Tool results are always text: a failure becomes its error message so the
//! report writer can state it instead of the run aborting.

use tracing::warn;

use crate::profiler::RepoLanguageProfiler;
use crate::searcher::{IssueRecord, IssueSearcher};

/// Converts a tool result into the text handed to the report writer.
#[must_use]
pub fn tool_output(result: crate::Result<String>) -> String {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "Tool call failed");
        e.to_string()
    })
}

/// The profiler and searcher a run works with.
#[derive(Debug, Clone)]
pub struct Toolbox {
    profiler: RepoLanguageProfiler,
    searcher: IssueSearcher,
}

impl Toolbox {
    /// Bundles a profiler and a searcher.
    #[must_use]
    pub fn new(profiler: RepoLanguageProfiler, searcher: IssueSearcher) -> Self {
        Self { profiler, searcher }
    }

    /// The language profiler.
    #[must_use]
    pub fn profiler(&self) -> &RepoLanguageProfiler {
        &self.profiler
    }

    /// The issue searcher.
    #[must_use]
    pub fn searcher(&self) -> &IssueSearcher {
        &self.searcher
    }

    /// Issues and digest for `languages`.
    ///
    /// On failure the issue list is empty and the digest carries the error
    /// message.
    pub async fn search_records(&self, languages: &[String]) -> (Vec<IssueRecord>, String) {
        match self.searcher.fetch(languages).await {
            Ok(issues) => {
                let digest = self.searcher.render_digest(&issues);
                (issues, digest)
            }
            Err(e) => (Vec::new(), tool_output(Err(e))),
        }
    }
}
