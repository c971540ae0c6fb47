// SPDX-License-Identifier: Apache-2.0

//! GitHub REST access.
//!
//! Anonymous Octocrab client plus the two endpoints gitgrab reads: a user's
//! owned repositories and the issue search.
//!
//! Responses are read raw so that the status is checked before the body is
//! decoded. An error page that is not GitHub's JSON shape (an HTML 502 from
//! the edge, an empty 404) still yields its status code.

use std::time::Duration;

use backon::Retryable;
use octocrab::Octocrab;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::GitHubConfig;
use crate::error::GrabError;
use crate::retry::{is_retryable_github_status, is_retryable_octocrab, retry_backoff};

pub mod repos;
pub mod search;

/// Characters escaped in a query string value.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Creates an unauthenticated Octocrab client for the configured API.
///
/// Connect and read timeouts both use `api_timeout_seconds`. The client does
/// not retry; the endpoint functions apply [`retry_backoff`]. Must be called
/// from within a tokio runtime.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client cannot be built.
#[instrument(skip(config), fields(api_url = %config.api_url))]
pub fn create_client(config: &GitHubConfig) -> crate::Result<Octocrab> {
    let timeout = Duration::from_secs(config.api_timeout_seconds);
    let client = Octocrab::builder()
        .base_uri(config.api_url.as_str())?
        .set_connect_timeout(Some(timeout))
        .set_read_timeout(Some(timeout))
        .build()?;

    debug!("Created anonymous GitHub client");
    Ok(client)
}

/// Failure of a GitHub GET.
#[derive(Debug, Error)]
pub(crate) enum RequestError {
    /// GitHub answered with a non-success status.
    #[error("GitHub returned status {0}")]
    Status(u16),
    /// No response could be read.
    #[error(transparent)]
    Transport(#[from] octocrab::Error),
    /// The success body was not the expected JSON.
    #[error("Failed to decode GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    fn is_retryable(&self) -> bool {
        match self {
            RequestError::Status(status) => is_retryable_github_status(*status),
            RequestError::Transport(e) => is_retryable_octocrab(e),
            RequestError::Decode(_) => false,
        }
    }

    /// Converts into a [`GrabError`], letting the endpoint name the status
    /// error.
    pub(crate) fn into_grab(self, on_status: impl FnOnce(u16) -> GrabError) -> GrabError {
        match self {
            RequestError::Status(status) => on_status(status),
            RequestError::Transport(e) => GrabError::from(e),
            RequestError::Decode(e) => GrabError::GitHub {
                message: format!("Failed to decode GitHub response: {e}"),
            },
        }
    }
}

/// Appends percent-encoded query parameters to a route.
pub(crate) fn with_query(route: &str, params: &[(&str, &str)]) -> String {
    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, QUERY_VALUE)))
        .collect();
    if query.is_empty() {
        route.to_string()
    } else {
        format!("{route}?{}", query.join("&"))
    }
}

async fn fetch_body(client: &Octocrab, uri: &str) -> Result<String, RequestError> {
    let response = client._get(uri).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RequestError::Status(status.as_u16()));
    }
    Ok(client.body_to_string(response).await?)
}

/// Issues a GET request and decodes the JSON body.
///
/// Transient failures (403, 429, 5xx, connection errors) are retried with
/// [`retry_backoff`]. Any other non-success status is returned at once.
pub(crate) async fn get_json<T>(client: &Octocrab, uri: &str) -> Result<T, RequestError>
where
    T: DeserializeOwned,
{
    let body = (|| async { fetch_body(client, uri).await })
        .retry(retry_backoff())
        .when(RequestError::is_retryable)
        .notify(|err, dur| warn!(error = %err, delay = ?dur, uri, "Retrying GitHub request"))
        .await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_encodes_values() {
        assert_eq!(
            with_query(
                "/search/issues",
                &[("q", "language:Rust label:\"good first issue\""), ("per_page", "3")]
            ),
            "/search/issues?q=language%3ARust%20label%3A%22good%20first%20issue%22&per_page=3"
        );
        assert_eq!(with_query("/users/a/repos", &[]), "/users/a/repos");
    }

    #[test]
    fn test_status_errors_map_through_endpoint() {
        let err = RequestError::Status(502).into_grab(|status| GrabError::SearchFailed { status });
        assert!(matches!(err, GrabError::SearchFailed { status: 502 }));
    }

    #[test]
    fn test_decode_error_is_not_retried() {
        let decode = serde_json::from_str::<Vec<u8>>("<html>").unwrap_err();
        assert!(!RequestError::Decode(decode).is_retryable());
        assert!(RequestError::Status(503).is_retryable());
        assert!(RequestError::Status(403).is_retryable());
        assert!(!RequestError::Status(404).is_retryable());
    }
}
