// SPDX-License-Identifier: Apache-2.0

//! Retry logic with exponential backoff for transient failures.
//!
//! Every outbound call (GitHub and AI) goes through [`retry_backoff`] and is
//! retried only when one of the `is_retryable_*` predicates says so. A
//! non-success status that is not transient (404, 422, ...) is never retried.

use std::time::Duration;

use backon::ExponentialBuilder;

use crate::error::GrabError;

/// Determines if an HTTP status code is retryable.
///
/// Retryable status codes are 429 (rate limited) and 500/502/503/504.
#[must_use]
pub fn is_retryable_http(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Determines if a GitHub status code is retryable.
///
/// Same as [`is_retryable_http`] plus 403, which GitHub uses for secondary
/// rate limits.
#[must_use]
pub fn is_retryable_github_status(status: u16) -> bool {
    status == 403 || is_retryable_http(status)
}

/// Determines if an octocrab error is retryable.
///
/// GitHub errors with a transient status code, service errors and hyper
/// (network) errors are retryable.
#[must_use]
pub fn is_retryable_octocrab(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            is_retryable_github_status(source.status_code.as_u16())
        }
        octocrab::Error::Service { .. } | octocrab::Error::Hyper { .. } => true,
        _ => false,
    }
}

/// Determines if a [`GrabError`] is retryable.
#[must_use]
pub fn is_retryable_grab(e: &GrabError) -> bool {
    match e {
        GrabError::RateLimited { .. } => true,
        GrabError::AI {
            status: Some(status),
            ..
        } => is_retryable_http(*status),
        GrabError::Network(req_err) => {
            req_err.is_timeout()
                || req_err.is_connect()
                || req_err
                    .status()
                    .is_some_and(|s| is_retryable_http(s.as_u16()))
        }
        _ => false,
    }
}

/// Determines if an anyhow error is retryable.
///
/// Checks the error for an octocrab, reqwest or [`GrabError`] source.
#[must_use]
pub fn is_retryable_anyhow(e: &anyhow::Error) -> bool {
    if let Some(oct_err) = e.downcast_ref::<octocrab::Error>() {
        return is_retryable_octocrab(oct_err);
    }

    if let Some(req_err) = e.downcast_ref::<reqwest::Error>() {
        if req_err.is_timeout() || req_err.is_connect() {
            return true;
        }
        if let Some(status) = req_err.status() {
            return is_retryable_http(status.as_u16());
        }
    }

    if let Some(grab_err) = e.downcast_ref::<GrabError>() {
        return is_retryable_grab(grab_err);
    }

    false
}

/// Creates the exponential backoff used for all retries.
///
/// - Factor: 2
/// - Min delay: 1 second
/// - Max times: 3 retries
/// - Jitter: enabled
#[must_use]
pub fn retry_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_factor(2.0)
        .with_min_delay(Duration::from_secs(1))
        .with_max_times(3)
        .with_jitter()
}

/// Maximum retry-after delay honored from a provider (120 seconds).
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Extracts the capped `retry_after` of a `RateLimited` error.
///
/// Returns `None` for other errors and for a zero `retry_after`.
#[must_use]
pub fn extract_retry_after(e: &anyhow::Error) -> Option<Duration> {
    if let Some(GrabError::RateLimited { retry_after, .. }) = e.downcast_ref::<GrabError>()
        && *retry_after > 0
    {
        return Some(Duration::from_secs((*retry_after).min(MAX_RETRY_AFTER_SECS)));
    }
    None
}
