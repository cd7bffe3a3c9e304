//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap remote calls with a deadline
//! - Report timeouts as a distinct error

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out after {}ms", .0.as_millis())]
pub struct DeadlineExceeded(pub Duration);

/// Run `fut`, failing with [`DeadlineExceeded`] if it outlives `deadline`.
pub async fn with_deadline<F: Future>(
    deadline: Duration,
    fut: F,
) -> Result<F::Output, DeadlineExceeded> {
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| DeadlineExceeded(deadline))
}
