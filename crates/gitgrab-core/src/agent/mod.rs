// SPDX-License-Identifier: Apache-2.0

//! Recommendation runs.
//!
//! A run alternates between asking the [`Advisor`] for the next [`Action`]
//! and executing it with the [`Toolbox`], until a report is composed or the
//! step limit is hit.
//!
//! ```text
//! username → ProfileUser → SearchIssues → ComposeReport → Recommendation
//! ```

use bon::Builder;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::ai::AiStats;
use crate::config::AppConfig;
use crate::error::GrabError;
use crate::profiler::RepoLanguageProfiler;
use crate::searcher::{IssueRecord, IssueSearcher};

pub mod advisor;
pub mod llm;
pub mod local;
pub mod tools;

pub use advisor::{Advisor, Report, ReportInput};
pub use llm::LlmAdvisor;
pub use local::LocalAdvisor;
pub use tools::{Toolbox, tool_output};

/// Maximum number of actions in one run.
pub const MAX_STEPS: usize = 6;

/// State gathered during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// GitHub username being analyzed.
    pub username: String,
    /// Language profile string, once profiled.
    pub profile: Option<String>,
    /// Languages extracted from the profile.
    pub languages: Vec<String>,
    /// Structured search results, once searched.
    pub issues: Option<Vec<IssueRecord>>,
    /// Digest text, once searched.
    pub digest: Option<String>,
}

impl Session {
    /// Starts an empty session for `username`.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }
}

/// Next step of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Build the language profile.
    ProfileUser {
        /// User to profile.
        username: String,
    },
    /// Search issues for the given languages.
    SearchIssues {
        /// Languages to search for.
        languages: Vec<String>,
    },
    /// Write the report and finish.
    ComposeReport,
}

/// Result of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// GitHub username.
    pub username: String,
    /// Top languages of the user.
    pub languages: Vec<String>,
    /// Recommended issues.
    pub issues: Vec<IssueRecord>,
    /// Digest the report was written from.
    pub digest: String,
    /// Final report.
    pub report: String,
    /// Model usage, when a model wrote the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<AiStats>,
}

/// Runs the profile, search and report workflow for a user.
#[derive(Builder)]
pub struct Recommender {
    advisor: Box<dyn Advisor>,
    toolbox: Toolbox,
    #[builder(default = MAX_STEPS)]
    max_steps: usize,
}

impl Recommender {
    /// Creates a recommender with GitHub clients built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a GitHub client cannot be built.
    pub fn from_config(config: &AppConfig, advisor: Box<dyn Advisor>) -> crate::Result<Self> {
        let toolbox = Toolbox::new(
            RepoLanguageProfiler::new(&config.github)?,
            IssueSearcher::new(&config.github, &config.search)?,
        );
        Ok(Self::builder().advisor(advisor).toolbox(toolbox).build())
    }

    /// Produces a recommendation for `username`.
    ///
    /// # Errors
    ///
    /// - [`GrabError::InvalidUsername`] for a blank username
    /// - [`GrabError::UserNotFound`] when the profile cannot be built
    /// - [`GrabError::AgentStalled`] when no report is composed in time
    /// - any error of [`Advisor::compose_report`]
    ///
    /// A failed search does not fail the run; its message becomes the digest.
    #[instrument(skip(self), fields(advisor = self.advisor.name()))]
    pub async fn run(&self, username: &str) -> crate::Result<Recommendation> {
        let username = username.trim();
        if username.is_empty() {
            return Err(GrabError::InvalidUsername {
                username: username.to_string(),
            });
        }

        let mut session = Session::new(username);
        for step in 1..=self.max_steps {
            let action = self.advisor.decide_next_action(&session);
            debug!(step, ?action, "Next action");

            match action {
                Action::ProfileUser { username } => {
                    let profile = self.toolbox.profiler().profile(&username).await?;
                    session.languages = self.advisor.summarize_languages(&profile);
                    session.profile = Some(profile);
                }
                Action::SearchIssues { languages } => {
                    let (issues, digest) = self.toolbox.search_records(&languages).await;
                    session.languages = languages;
                    session.issues = Some(issues);
                    session.digest = Some(digest);
                }
                Action::ComposeReport => return self.finish(session).await,
            }
        }

        Err(GrabError::AgentStalled {
            steps: self.max_steps,
        })
    }

    async fn finish(&self, session: Session) -> crate::Result<Recommendation> {
        let Session {
            username,
            profile,
            languages,
            issues,
            digest,
        } = session;
        let issues = issues.unwrap_or_default();
        let digest = digest.unwrap_or_default();
        let config = self.toolbox.searcher().config();

        let report = self
            .advisor
            .compose_report(&ReportInput {
                username: &username,
                profile: profile.as_deref().unwrap_or_default(),
                languages: &languages,
                issues: &issues,
                digest: &digest,
                fields: config.fields,
                body_limit: config.body_limit,
            })
            .await?;

        info!(
            languages = languages.len(),
            issues = issues.len(),
            "Recommendation ready"
        );

        Ok(Recommendation {
            username,
            languages,
            issues,
            digest,
            report: report.text,
            stats: report.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> AppConfig {
        let mut config = AppConfig::default();
        config.github.api_url = server.uri();
        config
    }

    async fn mount_repos(server: &MockServer, languages: &[Option<&str>]) {
        let repos: Vec<_> = languages
            .iter()
            .enumerate()
            .map(|(i, l)| json!({"name": format!("repo{i}"), "language": l}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(repos)))
            .mount(server)
            .await;
    }

    /// Keeps searching and never asks for a report.
    struct Restless;

    #[async_trait]
    impl Advisor for Restless {
        fn name(&self) -> &str {
            "restless"
        }

        fn decide_next_action(&self, session: &Session) -> Action {
            Action::SearchIssues {
                languages: session.languages.clone(),
            }
        }

        async fn compose_report(&self, _input: &ReportInput<'_>) -> crate::Result<Report> {
            unreachable!("never composes")
        }
    }

    #[tokio::test]
    async fn test_run_end_to_end_with_local_advisor() {
        let server = MockServer::start().await;
        mount_repos(&server, &[Some("Python"), Some("Python"), Some("Go")]).await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param(
                "q",
                "Python Go language:Python is:issue state:open label:\"good first issue\"",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 1,
                "items": [{
                    "title": "Fix bug",
                    "html_url": "https://github.com/foo/bar/issues/1",
                    "created_at": "2024-03-05T10:00:00Z",
                    "labels": [],
                    "body": null,
                    "repository_url": "https://api.github.com/repos/foo/bar",
                    "state": "open",
                    "assignees": []
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let recommender =
            Recommender::from_config(&config(&server), Box::new(LocalAdvisor::new())).unwrap();
        let rec = recommender.run("octocat").await.unwrap();

        assert_eq!(rec.languages, vec!["Python", "Go"]);
        assert_eq!(rec.issues.len(), 1);
        assert!(rec.digest.contains("Labels: None"));
        assert!(rec.digest.contains("Body: None"));
        assert!(rec.report.contains("1. Title: Fix bug"));
        assert!(rec.report.contains("Date: 05-03-2024"));
        assert!(rec.stats.is_none());
    }

    #[tokio::test]
    async fn test_run_without_languages_still_searches() {
        let server = MockServer::start().await;
        mount_repos(&server, &[None, None]).await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("q", "is:issue state:open label:\"good first issue\""))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"total_count": 0, "items": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let recommender =
            Recommender::from_config(&config(&server), Box::new(LocalAdvisor::new())).unwrap();
        let rec = recommender.run("octocat").await.unwrap();

        assert!(rec.languages.is_empty());
        assert_eq!(rec.digest, crate::searcher::NO_ISSUES);
        assert!(rec.report.contains(crate::searcher::NO_ISSUES));
    }

    #[tokio::test]
    async fn test_run_search_failure_becomes_digest() {
        let server = MockServer::start().await;
        mount_repos(&server, &[Some("Rust")]).await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "Validation Failed",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let recommender =
            Recommender::from_config(&config(&server), Box::new(LocalAdvisor::new())).unwrap();
        let rec = recommender.run("octocat").await.unwrap();

        assert_eq!(rec.digest, "Error: GitHub API returned 422");
        assert!(rec.report.contains("Error: GitHub API returned 422"));
    }

    #[tokio::test]
    async fn test_run_unknown_user_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let recommender =
            Recommender::from_config(&config(&server), Box::new(LocalAdvisor::new())).unwrap();
        let err = recommender.run("octocat").await.unwrap_err();

        assert!(matches!(err, GrabError::UserNotFound { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_run_rejects_blank_username() {
        let server = MockServer::start().await;
        let recommender =
            Recommender::from_config(&config(&server), Box::new(LocalAdvisor::new())).unwrap();

        let err = recommender.run("   ").await.unwrap_err();

        assert!(matches!(err, GrabError::InvalidUsername { .. }));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_run_stalls_after_step_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"total_count": 0, "items": []})),
            )
            .expect(3)
            .mount(&server)
            .await;

        let app = config(&server);
        let toolbox = Toolbox::new(
            RepoLanguageProfiler::new(&app.github).unwrap(),
            IssueSearcher::new(&app.github, &app.search).unwrap(),
        );
        let recommender = Recommender::builder()
            .advisor(Box::new(Restless))
            .toolbox(toolbox)
            .max_steps(3)
            .build();

        let err = recommender.run("octocat").await.unwrap_err();

        assert!(matches!(err, GrabError::AgentStalled { steps: 3 }));
    }
}
