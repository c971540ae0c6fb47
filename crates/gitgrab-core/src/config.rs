// SPDX-License-Identifier: Apache-2.0

//! Configuration management for gitgrab.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `GITGRAB_`)
//! 2. Config file: `~/.config/gitgrab/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Return five issues instead of three
//! GITGRAB_SEARCH__RESULT_LIMIT=5 gitgrab recommend octocat
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ai::registry::get_provider;
use crate::error::GrabError;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Issue search settings.
    pub search: SearchConfig,
    /// AI provider settings.
    pub ai: AiConfig,
}

impl AppConfig {
    /// Checks value ranges once at startup.
    ///
    /// API keys are not checked here; they are resolved when an AI client
    /// is built so that offline runs never need one.
    pub fn validate(&self) -> Result<(), GrabError> {
        if self.github.repo_limit == 0 || self.github.repo_limit > 100 {
            return Err(config_error(format!(
                "github.repo_limit must be between 1 and 100, got {}",
                self.github.repo_limit
            )));
        }
        if self.github.language_limit == 0 {
            return Err(config_error("github.language_limit must be at least 1"));
        }
        if self.search.result_limit == 0 || self.search.result_limit > 100 {
            return Err(config_error(format!(
                "search.result_limit must be between 1 and 100, got {}",
                self.search.result_limit
            )));
        }
        if self.search.label.trim().is_empty() {
            return Err(config_error("search.label must not be empty"));
        }
        if get_provider(&self.ai.provider).is_none() {
            return Err(config_error(format!(
                "Unknown AI provider: {}",
                self.ai.provider
            )));
        }
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(config_error(format!(
                "ai.temperature must be between 0.0 and 2.0, got {}",
                self.ai.temperature
            )));
        }
        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> GrabError {
    GrabError::Config {
        message: message.into(),
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL.
    pub api_url: String,
    /// Public web URL used when rewriting API links.
    pub web_url: String,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// Number of recently updated repositories to inspect.
    pub repo_limit: u8,
    /// Number of languages kept in a profile.
    pub language_limit: usize,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            web_url: "https://github.com".to_string(),
            api_timeout_seconds: 10,
            repo_limit: 10,
            language_limit: 5,
        }
    }
}

impl GitHubConfig {
    /// Prefix of repository API URLs, e.g. `https://api.github.com/repos/`.
    #[must_use]
    pub fn repos_api_prefix(&self) -> String {
        format!("{}/repos/", self.api_url.trim_end_matches('/'))
    }

    /// Prefix of repository web URLs, e.g. `https://github.com/`.
    #[must_use]
    pub fn web_prefix(&self) -> String {
        format!("{}/", self.web_url.trim_end_matches('/'))
    }
}

/// Which issue fields end up in a digest block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestFields {
    /// Title, date, link, labels, body.
    #[default]
    Compact,
    /// Compact fields plus state, assignees and repository link.
    Detailed,
}

/// Issue search settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of issues requested.
    pub result_limit: u8,
    /// Maximum number of body characters kept per issue.
    pub body_limit: usize,
    /// Issue label to filter on.
    pub label: String,
    /// Search sort key (`updated`, `created`, `comments`).
    pub sort: String,
    /// Field set of each digest block.
    pub fields: DigestFields,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: 3,
            body_limit: 500,
            label: "good first issue".to_string(),
            sort: "updated".to_string(),
            fields: DigestFields::Compact,
        }
    }
}

/// AI provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// AI provider name from the registry.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Overrides the provider's chat completions URL.
    pub api_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum tokens for API responses.
    pub max_tokens: u32,
    /// Temperature for API requests.
    pub temperature: f32,
    /// Circuit breaker failure threshold before opening.
    pub circuit_breaker_threshold: u32,
    /// Circuit breaker reset timeout in seconds.
    pub circuit_breaker_reset_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "qwen/qwen3-32b".to_string(),
            api_url: None,
            timeout_seconds: 30,
            max_tokens: 1800,
            temperature: 0.1,
            circuit_breaker_threshold: 3,
            circuit_breaker_reset_seconds: 60,
        }
    }
}

/// Returns the gitgrab configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/gitgrab`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("gitgrab");
    }
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".config")
        .join("gitgrab")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `GITGRAB_` and double underscore
/// for nested keys (e.g., `GITGRAB_AI__MODEL`).
///
/// # Errors
///
/// Returns `GrabError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, GrabError> {
    let config_path = config_file_path();

    let config = Config::builder()
        // Optional: the file may not exist
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        .add_source(
            Environment::with_prefix("GITGRAB")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn from_toml(s: &str) -> AppConfig {
        Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .expect("should build config")
            .try_deserialize()
            .expect("should deserialize")
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.repo_limit, 10);
        assert_eq!(config.github.language_limit, 5);
        assert_eq!(config.search.result_limit, 3);
        assert_eq!(config.search.body_limit, 500);
        assert_eq!(config.search.label, "good first issue");
        assert_eq!(config.search.sort, "updated");
        assert_eq!(config.search.fields, DigestFields::Compact);
        assert_eq!(config.ai.provider, "groq");
        assert_eq!(config.ai.model, "qwen/qwen3-32b");
        assert_eq!(config.ai.max_tokens, 1800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
[search]
result_limit = 5
fields = "detailed"
"#,
        );

        assert_eq!(config.search.result_limit, 5);
        assert_eq!(config.search.fields, DigestFields::Detailed);
        assert_eq!(config.search.body_limit, 500);
        assert_eq!(config.ai.provider, "groq");
    }

    #[test]
    fn test_validate_rejects_zero_result_limit() {
        let config = from_toml("[search]\nresult_limit = 0\n");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("search.result_limit"));
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let config = from_toml("[ai]\nprovider = \"nonexistent\"\n");
        assert!(matches!(config.validate(), Err(GrabError::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_blank_label() {
        let config = from_toml("[search]\nlabel = \"  \"\n");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_url_prefixes_ignore_trailing_slash() {
        let github = GitHubConfig {
            api_url: "https://ghe.example.com/api/v3/".to_string(),
            web_url: "https://ghe.example.com/".to_string(),
            ..GitHubConfig::default()
        };
        assert_eq!(
            github.repos_api_prefix(),
            "https://ghe.example.com/api/v3/repos/"
        );
        assert_eq!(github.web_prefix(), "https://ghe.example.com/");
    }

    #[test]
    #[serial]
    fn test_config_dir_respects_xdg_config_home() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "/custom/config");
        }

        let dir = config_dir();
        assert_eq!(dir, PathBuf::from("/custom/config/gitgrab"));

        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_load_config_reads_file_and_env() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app_dir = dir.path().join("gitgrab");
        std::fs::create_dir_all(&app_dir).expect("create config dir");
        std::fs::write(
            app_dir.join("config.toml"),
            "[search]\nresult_limit = 5\nlabel = \"help wanted\"\n",
        )
        .expect("write config");

        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", dir.path());
            std::env::set_var("GITGRAB_AI__MODEL", "openai/gpt-oss-20b");
        }

        let config = load_config();

        unsafe {
            std::env::remove_var("GITGRAB_AI__MODEL");
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }

        let config = config.expect("should load");
        assert_eq!(config.search.result_limit, 5);
        assert_eq!(config.search.label, "help wanted");
        assert_eq!(config.ai.model, "openai/gpt-oss-20b");
    }
}
