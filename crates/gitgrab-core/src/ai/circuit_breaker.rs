// SPDX-License-Identifier: Apache-2.0

//! Circuit breaker guarding the AI provider.
//!
//! After `threshold` consecutive failures the breaker opens and report
//! requests fail fast with [`GrabError::CircuitOpen`](crate::GrabError::CircuitOpen)
//! until `reset_seconds` have elapsed since the last failure. The next call
//! after that is let through; a success closes the breaker again.
//!
//! The breaker lives inside one [`AiClient`](crate::ai::AiClient), so it only
//! trips for callers that reuse a client across reports. The `gitgrab` binary
//! composes one report per process and never reaches the threshold.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Consecutive-failure circuit breaker backed by atomics.
#[derive(Debug)]
pub struct CircuitBreaker {
    failures: AtomicU32,
    /// Seconds since `UNIX_EPOCH` of the failure that tripped the breaker.
    tripped_at: AtomicU64,
    threshold: u32,
    reset_seconds: u64,
}

impl CircuitBreaker {
    /// Creates a closed breaker.
    #[must_use]
    pub fn new(threshold: u32, reset_seconds: u64) -> Self {
        Self {
            failures: AtomicU32::new(0),
            tripped_at: AtomicU64::new(0),
            threshold: threshold.max(1),
            reset_seconds,
        }
    }

    /// Returns `true` while requests should be rejected.
    #[must_use]
    pub fn is_open(&self) -> bool {
        if self.failures.load(Ordering::Relaxed) < self.threshold {
            return false;
        }
        let tripped_at = self.tripped_at.load(Ordering::Relaxed);
        now_secs() < tripped_at.saturating_add(self.reset_seconds)
    }

    /// Resets the failure count.
    pub fn record_success(&self) {
        self.failures.store(0, Ordering::Relaxed);
    }

    /// Counts a failure, tripping the breaker at the threshold.
    pub fn record_failure(&self) {
        let count = self.failures.fetch_add(1, Ordering::Relaxed) + 1;
        if count >= self.threshold {
            self.tripped_at.store(now_secs(), Ordering::Relaxed);
        }
    }

    /// Current consecutive failure count.
    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.failures.load(Ordering::Relaxed)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn starts_closed() {
        let cb = CircuitBreaker::new(3, 60);
        assert!(!cb.is_open());
        assert_eq!(cb.failure_count(), 0);
    }

    #[test]
    fn opens_at_threshold() {
        let cb = CircuitBreaker::new(3, 60);
        cb.record_failure();
        cb.record_failure();
        assert!(!cb.is_open());
        cb.record_failure();
        assert!(cb.is_open());
    }

    #[test]
    fn success_closes() {
        let cb = CircuitBreaker::new(2, 60);
        cb.record_failure();
        cb.record_failure();
        assert!(cb.is_open());
        cb.record_success();
        assert!(!cb.is_open());
        assert_eq!(cb.failure_count(), 0);
    }

    #[test]
    fn lets_a_request_through_after_reset_window() {
        let cb = CircuitBreaker::new(1, 1);
        cb.record_failure();
        assert!(cb.is_open());
        thread::sleep(Duration::from_secs(2));
        assert!(!cb.is_open());
        cb.record_failure();
        assert!(cb.is_open());
    }
}
