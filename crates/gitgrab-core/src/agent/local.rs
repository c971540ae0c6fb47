// SPDX-License-Identifier: Apache-2.0

//! Report rendering without a language model.

use std::fmt::Write as _;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};

use super::advisor::{Advisor, Report, ReportInput};
use crate::ai::prompt::{ISSUES_HEADING, LANGUAGES_HEADING, NO_DESCRIPTION};
use crate::config::DigestFields;
use crate::searcher::{IssueRecord, NONE};

/// Maximum number of summary lines per issue.
const SUMMARY_LINES: usize = 5;

/// Deterministic advisor that renders the report locally.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAdvisor;

impl LocalAdvisor {
    /// Creates a local advisor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Formats an ISO-8601 timestamp as `DD-MM-YYYY`.
///
/// Unparseable input is returned as is; empty input becomes `None`.
///
/// ```
/// use gitgrab_core::agent::local::format_issue_date;
///
/// assert_eq!(format_issue_date("2024-03-05T10:00:00Z"), "05-03-2024");
/// assert_eq!(format_issue_date(""), "None");
/// ```
#[must_use]
pub fn format_issue_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return NONE.to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d-%m-%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d") {
        return date.format("%d-%m-%Y").to_string();
    }
    raw.to_string()
}

/// Up to five non-empty lines of the short body, without code fences.
fn summary_lines(issue: &IssueRecord, body_limit: usize) -> Vec<String> {
    let body = issue.short_body(body_limit);
    if body == NONE {
        return vec![NO_DESCRIPTION.to_string()];
    }
    let lines: Vec<String> = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("```"))
        .take(SUMMARY_LINES)
        .map(ToString::to_string)
        .collect();
    if lines.is_empty() {
        vec![NO_DESCRIPTION.to_string()]
    } else {
        lines
    }
}

fn field(value: &str) -> &str {
    if value.trim().is_empty() { NONE } else { value }
}

fn render_issue(out: &mut String, index: usize, issue: &IssueRecord, input: &ReportInput<'_>) {
    let _ = writeln!(out, "{index}. Title: {}", field(&issue.title));
    let _ = writeln!(out, "   Date: {}", format_issue_date(&issue.created_at));
    let _ = writeln!(out, "   Issue Link: {}", field(&issue.html_url));
    let _ = writeln!(out, "   Labels: {}", issue.labels_display());
    let _ = writeln!(out, "   Issue Summary:");
    for line in summary_lines(issue, input.body_limit) {
        let _ = writeln!(out, "   {line}");
    }
    if input.fields == DigestFields::Detailed {
        let _ = writeln!(out, "   State: {}", field(&issue.state));
        let _ = writeln!(out, "   Assignees: {}", issue.assignees_display());
        let _ = writeln!(out, "   Repository: {}", field(&issue.repository_url));
    }
}

/// Renders the two-section report.
#[must_use]
pub fn render_report(input: &ReportInput<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{LANGUAGES_HEADING}");
    if input.languages.is_empty() {
        let _ = writeln!(out, "- {NONE}");
    }
    for language in input.languages {
        let _ = writeln!(out, "- {language}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{ISSUES_HEADING}");
    if input.issues.is_empty() {
        let _ = writeln!(out, "{}", input.digest.trim());
    }
    for (i, issue) in input.issues.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out, "---");
        }
        render_issue(&mut out, i + 1, issue, input);
    }

    out
}

#[async_trait]
impl Advisor for LocalAdvisor {
    fn name(&self) -> &str {
        "local"
    }

    async fn compose_report(&self, input: &ReportInput<'_>) -> crate::Result<Report> {
        Ok(Report {
            text: render_report(input),
            stats: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searcher::NO_ISSUES;

    fn issue(title: &str, body: Option<&str>) -> IssueRecord {
        IssueRecord {
            title: title.to_string(),
            html_url: format!("https://github.com/foo/bar/issues/{}", title.len()),
            created_at: "2024-03-05T10:00:00Z".to_string(),
            labels: vec![],
            body: body.map(ToString::to_string),
            repository_url: "https://github.com/foo/bar".to_string(),
            state: "open".to_string(),
            assignees: vec![],
        }
    }

    fn input<'a>(
        languages: &'a [String],
        issues: &'a [IssueRecord],
        digest: &'a str,
    ) -> ReportInput<'a> {
        ReportInput {
            username: "octocat",
            profile: "",
            languages,
            issues,
            digest,
            fields: DigestFields::Compact,
            body_limit: 500,
        }
    }

    #[test]
    fn test_format_issue_date_variants() {
        assert_eq!(format_issue_date("2023-12-31T23:59:59+00:00"), "31-12-2023");
        assert_eq!(format_issue_date("2024-01-02"), "02-01-2024");
        assert_eq!(format_issue_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_report_sections_and_numbering() {
        let languages = vec!["Python".to_string(), "Go".to_string()];
        let issues = vec![
            issue("Fix bug", None),
            issue("Add docs", Some("First line\n\n```rust\nlet x = 1;\n```\nSecond line")),
        ];
        let report = render_report(&input(&languages, &issues, "ignored"));

        assert!(report.starts_with("User's Interested Programming Languages\n- Python\n- Go\n\n"));
        assert!(report.contains("Recommended Open Source Issues\n1. Title: Fix bug\n"));
        assert!(report.contains("   Date: 05-03-2024\n"));
        assert!(report.contains("   Labels: None\n"));
        let first_summary = format!("   Issue Summary:\n   {NO_DESCRIPTION}\n---\n2. Title: Add docs");
        assert!(report.contains(&first_summary));
        assert!(report.contains("   First line\n   let x = 1;\n   Second line\n"));
        assert!(!report.contains("```"));
        assert!(!report.contains("ignored"));
    }

    #[test]
    fn test_report_without_issues_shows_digest() {
        let report = render_report(&input(&[], &[], NO_ISSUES));
        assert!(report.contains("- None\n"));
        assert!(report.ends_with(&format!("Recommended Open Source Issues\n{NO_ISSUES}\n")));
    }

    #[test]
    fn test_summary_is_capped() {
        let body = (1..=8).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let record = issue("Long", Some(&body));
        let lines = summary_lines(&record, 500);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4], "line 5");
    }

    #[test]
    fn test_detailed_report_adds_fields() {
        let languages = vec!["Rust".to_string()];
        let mut record = issue("Fix bug", None);
        record.assignees = vec!["octocat".to_string()];
        let issues = vec![record];
        let mut report_input = input(&languages, &issues, "");
        report_input.fields = DigestFields::Detailed;

        let report = render_report(&report_input);
        assert!(report.contains("   State: open\n"));
        assert!(report.contains("   Assignees: octocat\n"));
        assert!(report.contains("   Repository: https://github.com/foo/bar\n"));
    }
}
