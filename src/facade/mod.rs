//! Aggregation facade.
//!
//! # Data Flow
//! ```text
//! POST /messages
//!     → validate `msg` (400 on failure, no backend call)
//!     → fresh UUID v4
//!     → store_client.rs LogMessage under the write retry policy
//!     → ack check (success=false or success+error are final, never retried)
//!
//! GET /messages
//!     → store_client.rs GetMessages (read retry policy, one attempt by default)
//!     → secondary.rs GET (3s timeout)          } issued concurrently
//!     → merge ("a, b | c", or "c" when the store is empty)
//! ```
//!
//! # Design Decisions
//! - The facade owns no state; every request stands alone
//! - Any backend trouble surfaces as 502 with the failing backend named
//! - Writes retry transport errors, reads do not, each behind its own policy

pub mod error;
pub mod secondary;
pub mod store_client;

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::observability::metrics;
use crate::resilience::RetryPolicy;

pub use error::{FacadeError, SecondaryError, SetupError, TransportError};
pub use secondary::{HttpSecondarySource, SecondarySource};
pub use store_client::{GrpcStoreClient, LogAck, StoreClient};

/// Default attempts for `LogMessage`.
pub const MAX_RETRIES: u32 = 3;

/// Default pause between `LogMessage` attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Request-scoped orchestrator over the log store and the secondary source.
#[derive(Clone)]
pub struct Facade {
    store: Arc<dyn StoreClient>,
    secondary: Arc<dyn SecondarySource>,
    write_retry: RetryPolicy,
    read_retry: RetryPolicy,
}

impl Facade {
    /// Facade with the reference policies: 3 write attempts 1s apart, one read
    /// attempt.
    pub fn new(store: Arc<dyn StoreClient>, secondary: Arc<dyn SecondarySource>) -> Self {
        Self {
            store,
            secondary,
            write_retry: RetryPolicy::fixed(MAX_RETRIES, RETRY_DELAY),
            read_retry: RetryPolicy::once(),
        }
    }

    /// Build gRPC and HTTP clients from configuration.
    pub fn from_config(config: &RelayConfig) -> Result<Self, SetupError> {
        let timeout = config.facade.call_timeout();
        let store = GrpcStoreClient::new(config.facade.store_uri(), timeout)
            .map_err(SetupError::Store)?;
        let secondary = HttpSecondarySource::new(config.facade.secondary_url.clone(), timeout)?;

        Ok(Self::new(Arc::new(store), Arc::new(secondary))
            .with_write_retry(RetryPolicy::fixed(
                config.retries.max_attempts,
                config.retries.delay(),
            ))
            .with_read_retry(RetryPolicy::fixed(
                config.retries.read_max_attempts,
                config.retries.delay(),
            )))
    }

    pub fn with_write_retry(mut self, policy: RetryPolicy) -> Self {
        self.write_retry = policy;
        self
    }

    pub fn with_read_retry(mut self, policy: RetryPolicy) -> Self {
        self.read_retry = policy;
        self
    }

    pub fn write_retry(&self) -> RetryPolicy {
        self.write_retry
    }

    pub fn read_retry(&self) -> RetryPolicy {
        self.read_retry
    }

    /// Store `msg` under a newly generated id and return that id.
    pub async fn post_message(&self, msg: &str) -> Result<String, FacadeError> {
        if msg.is_empty() {
            return Err(FacadeError::MissingMessage);
        }

        let id = Uuid::new_v4().to_string();
        let ack = self
            .write_retry
            .run(|attempt| {
                let id = id.as_str();
                async move {
                    tracing::debug!(id = %id, attempt, "Sending LogMessage");
                    let result = self.store.log_message(id, msg).await;
                    let outcome = if result.is_ok() { "completed" } else { "transport_error" };
                    metrics::record_store_attempt(outcome);
                    result
                }
            })
            .await
            .map_err(|e| FacadeError::StoreUnreachable {
                attempts: e.attempts,
                source: e.last,
            })?;

        if !ack.success {
            return Err(FacadeError::Rejected(ack.error));
        }
        if !ack.error.is_empty() {
            return Err(FacadeError::InconsistentAck(ack.error));
        }

        tracing::info!(id = %id, "LogMessage succeeded");
        Ok(id)
    }

    /// Stored messages merged with the secondary source's text.
    pub async fn get_messages(&self) -> Result<String, FacadeError> {
        let stored = self.read_retry.run(|_| self.store.get_messages());
        let secondary = self.secondary.fetch();
        let (stored, secondary) = tokio::join!(stored, secondary);

        let stored = stored.map_err(|e| FacadeError::StoreRead(e.last))?;
        tracing::debug!(count = stored.len(), "Received messages from log store");

        let secondary = secondary.map_err(FacadeError::Secondary)?;
        tracing::debug!(text = %secondary, "Received text from secondary source");

        Ok(merge_messages(&stored, &secondary))
    }
}

/// `"a, b | c"` for stored `["a", "b"]` and secondary `"c"`; just `"c"` when
/// nothing is stored.
pub fn merge_messages(stored: &[String], secondary: &str) -> String {
    if stored.is_empty() {
        secondary.to_string()
    } else {
        format!("{} | {}", stored.join(", "), secondary)
    }
}
