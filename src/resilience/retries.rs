//! Retry logic.
//!
//! # Responsibilities
//! - Bound the number of attempts for a remote call
//! - Wait a fixed delay between attempts
//!
//! # Design Decisions
//! - Fixed delay, no backoff growth and no jitter
//! - No delay after the final attempt
//! - Every `Err` from the operation is retryable. Authoritative negative
//!   answers (the remote side replied "no") must come back as `Ok` values so
//!   they end the loop immediately.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Every attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("gave up after {attempts} attempts: {last}")]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub last: E,
}

/// Attempt limit and spacing for one kind of call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Up to `max_attempts` attempts separated by `delay`. Zero is treated as one.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A single attempt.
    pub fn once() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `op` until it returns `Ok` or the attempts run out.
    ///
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, Exhausted<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_attempts => {
                    return Err(Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay = ?self.delay,
                        error = %e,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::fixed(3, Duration::from_secs(1));
        let start = Instant::now();

        let result: Result<(), _> = policy
            .run(|n| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(format!("down #{n}")) }
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 3);
        assert_eq!(err.last, "down #3");
        assert_eq!(err.to_string(), "gave up after 3 attempts: down #3");
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        // Two waits between three attempts.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_first_success() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::fixed(3, Duration::from_secs(1));

        let result = policy
            .run(|n| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err("down")
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_once_makes_single_attempt() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = RetryPolicy::once()
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("down") }
            })
            .await;

        assert_eq!(result, Err(Exhausted { attempts: 1, last: "down" }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryPolicy::fixed(0, Duration::ZERO).max_attempts(), 1);
    }
}
