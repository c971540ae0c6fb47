// SPDX-License-Identifier: Apache-2.0

//! The decision-making collaborator of a recommendation run.

use async_trait::async_trait;
use serde::Serialize;

use super::{Action, Session};
use crate::ai::AiStats;
use crate::config::DigestFields;
use crate::profiler::LANGUAGE_SEPARATOR;
use crate::searcher::IssueRecord;

/// Everything a report is written from.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    /// GitHub username.
    pub username: &'a str,
    /// Language profile string (may be empty).
    pub profile: &'a str,
    /// Languages the search ran with.
    pub languages: &'a [String],
    /// Structured search results; empty when the search failed.
    pub issues: &'a [IssueRecord],
    /// Digest text, the no-issues sentinel, or a search error message.
    pub digest: &'a str,
    /// Field set of each issue.
    pub fields: DigestFields,
    /// Body characters available to a summary.
    pub body_limit: usize,
}

/// A composed report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report text.
    pub text: String,
    /// Model usage, when a model wrote the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<AiStats>,
}

/// Drives a recommendation run.
///
/// The defaults implement the fixed profile, search, report workflow, so an
/// implementation usually only supplies [`Advisor::compose_report`].
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Extracts the languages to search for from a profile string.
    fn summarize_languages(&self, profile: &str) -> Vec<String> {
        profile
            .split(LANGUAGE_SEPARATOR.trim())
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Picks the next step from the state gathered so far.
    fn decide_next_action(&self, session: &Session) -> Action {
        if session.profile.is_none() {
            Action::ProfileUser {
                username: session.username.clone(),
            }
        } else if session.digest.is_none() {
            Action::SearchIssues {
                languages: session.languages.clone(),
            }
        } else {
            Action::ComposeReport
        }
    }

    /// Writes the final two-section report.
    async fn compose_report(&self, input: &ReportInput<'_>) -> crate::Result<Report>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    #[async_trait]
    impl Advisor for Plain {
        fn name(&self) -> &str {
            "plain"
        }

        async fn compose_report(&self, _input: &ReportInput<'_>) -> crate::Result<Report> {
            Ok(Report {
                text: String::new(),
                stats: None,
            })
        }
    }

    #[test]
    fn test_summarize_languages_splits_profile() {
        assert_eq!(
            Plain.summarize_languages("Python, Go,Rust"),
            vec!["Python", "Go", "Rust"]
        );
        assert!(Plain.summarize_languages("").is_empty());
    }

    #[test]
    fn test_default_workflow() {
        let mut session = Session::new("octocat");
        assert_eq!(
            Plain.decide_next_action(&session),
            Action::ProfileUser {
                username: "octocat".to_string()
            }
        );

        session.profile = Some("Rust".to_string());
        session.languages = vec!["Rust".to_string()];
        assert_eq!(
            Plain.decide_next_action(&session),
            Action::SearchIssues {
                languages: vec!["Rust".to_string()]
            }
        );

        session.digest = Some("No open issues found for these languages.".to_string());
        assert_eq!(Plain.decide_next_action(&session), Action::ComposeReport);
    }

    #[test]
    fn test_empty_profile_still_searches() {
        let mut session = Session::new("octocat");
        session.profile = Some(String::new());
        assert_eq!(
            Plain.decide_next_action(&session),
            Action::SearchIssues { languages: vec![] }
        );
    }
}
