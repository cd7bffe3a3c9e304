//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to a backend:
//!     → timeouts.rs (enforce a deadline per attempt)
//!     → On failure: retries.rs (wait fixed delay, try again)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Only transport failures reach the retry loop; replies are never retried
//! - Write and read paths use separately named policies

pub mod retries;
pub mod timeouts;

pub use retries::{Exhausted, RetryPolicy};
pub use timeouts::{with_deadline, DeadlineExceeded};
