// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `GrabError` and adds hints for the common
//! failure cases. The library keeps the structured data; presentation lives
//! here.

use std::fmt::Write;

use anyhow::Error;
use gitgrab_core::error::GrabError;

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not a `GrabError`, returns the error chain.
pub fn format_error(error: &Error) -> String {
    let Some(grab_err) = error.downcast_ref::<GrabError>() else {
        return format!("{error:#}");
    };

    match grab_err {
        GrabError::UserNotFound { username, status } => format!(
            "Could not find GitHub user {username} (HTTP {status}).\n\n\
             Tip: Check the spelling of the username."
        ),
        GrabError::SearchFailed { status } => {
            let mut msg = format!("GitHub issue search failed (HTTP {status}).");
            if matches!(status, 403 | 429) {
                msg.push_str(
                    "\n\nTip: Anonymous GitHub requests are rate limited. Wait a minute and try again.",
                );
            } else if *status == 422 {
                msg.push_str("\n\nTip: Check the label and language values.");
            }
            msg
        }
        GrabError::RateLimited {
            provider,
            retry_after,
        } => format_rate_limited_error(provider, *retry_after),
        GrabError::MissingApiKey { provider, env } => format!(
            "No API key for {provider}.\n\n\
             Tip: export {env}=<your key>, or pass --offline to render the report without a model."
        ),
        GrabError::AI {
            message,
            status,
            provider,
        } => {
            let mut msg = format!("AI provider error: {message}");
            if let Some(code) = status {
                let _ = write!(msg, " (HTTP {code})");
            }

            let api_key_env = gitgrab_core::ai::registry::get_provider(provider)
                .map_or("GROQ_API_KEY", |p| p.api_key_env);
            let _ = write!(
                msg,
                "\n\nTip: Check your {api_key_env} environment variable, or pass --offline."
            );
            msg
        }
        GrabError::Config { .. } => format!(
            "{grab_err}\n\nTip: Check your config file at {}",
            gitgrab_core::config::config_file_path().display()
        ),
        GrabError::Network(_) | GrabError::GitHub { .. } => {
            format!("{grab_err}\n\nTip: Check your internet connection and try again.")
        }
        GrabError::CircuitOpen => format!(
            "{grab_err}\n\nTip: The AI provider is temporarily unavailable. Try again in a moment, or pass --offline."
        ),
        GrabError::InvalidUsername { .. } | GrabError::AgentStalled { .. } => grab_err.to_string(),
    }
}

/// Formats a rate limit error with provider-specific hints.
fn format_rate_limited_error(provider: &str, retry_after: u64) -> String {
    let mut msg = format!("Rate limit exceeded on {provider}, retry after {retry_after}s");

    msg.push_str("\n\nTip: You've hit the rate limit for this provider.");
    let _ = write!(msg, "\n- Wait at least {retry_after} seconds before retrying.");
    if provider == "openrouter" {
        msg.push_str("\n- To increase your rate limit, upgrade your OpenRouter account:");
        msg.push_str("\n  https://openrouter.ai/account/limits");
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_user_not_found() {
        let err = anyhow::Error::new(GrabError::UserNotFound {
            username: "ghost".to_string(),
            status: 404,
        });
        let formatted = format_error(&err);

        assert!(formatted.contains("Could not find GitHub user ghost"));
        assert!(formatted.contains("HTTP 404"));
    }

    #[test]
    fn test_format_search_rate_limit_hint() {
        let err = anyhow::Error::new(GrabError::SearchFailed { status: 403 });
        let formatted = format_error(&err);

        assert!(formatted.contains("HTTP 403"));
        assert!(formatted.contains("rate limited"));
    }

    #[test]
    fn test_format_missing_api_key_suggests_offline() {
        let err = anyhow::Error::new(GrabError::MissingApiKey {
            provider: "groq".to_string(),
            env: "GROQ_API_KEY".to_string(),
        });
        let formatted = format_error(&err);

        assert!(formatted.contains("export GROQ_API_KEY"));
        assert!(formatted.contains("--offline"));
    }

    #[test]
    fn test_format_ai_error_uses_provider_key_env() {
        let err = anyhow::Error::new(GrabError::AI {
            message: "Invalid request".to_string(),
            status: Some(400),
            provider: "openrouter".to_string(),
        });
        let formatted = format_error(&err);

        assert!(formatted.contains("HTTP 400"));
        assert!(formatted.contains("OPENROUTER_API_KEY"));
    }

    #[test]
    fn test_format_rate_limited_openrouter() {
        let err = anyhow::Error::new(GrabError::RateLimited {
            provider: "openrouter".to_string(),
            retry_after: 60,
        });
        let formatted = format_error(&err);

        assert!(formatted.contains("60s"));
        assert!(formatted.contains("https://openrouter.ai/account/limits"));
    }

    #[test]
    fn test_format_non_grab_error() {
        let err = anyhow::anyhow!("Some generic error");
        assert_eq!(format_error(&err), "Some generic error");
    }
}
