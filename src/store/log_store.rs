//! In-memory, deduplicating message log.

use indexmap::IndexMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::observability::metrics;

/// Error text returned when a write is missing its id or text.
pub const MISSING_FIELDS: &str = "Missing 'id' or 'msg' in request";

/// Result of a single write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new record was inserted.
    Stored,
    /// A record with this id already exists; nothing was written.
    Duplicate,
    /// The id or text was empty; nothing was written.
    Invalid(&'static str),
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, WriteOutcome::Invalid(_))
    }

    /// Error text for the wire response; empty on success.
    pub fn error(&self) -> &'static str {
        match self {
            WriteOutcome::Invalid(reason) => *reason,
            _ => "",
        }
    }
}

/// Append-only record store keyed by message id.
///
/// Every read and write goes through one mutex. Critical sections only touch
/// the map; callers never hold the lock across I/O.
#[derive(Debug, Default)]
pub struct LogStore {
    records: Mutex<IndexMap<String, String>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` under `id` unless that id has been seen before.
    pub fn log_message(&self, id: &str, text: &str) -> WriteOutcome {
        if id.is_empty() || text.is_empty() {
            tracing::warn!(id = %id, "Rejected message with missing fields");
            metrics::record_store_write("invalid");
            return WriteOutcome::Invalid(MISSING_FIELDS);
        }

        let outcome = {
            let mut records = self.lock();
            if records.contains_key(id) {
                WriteOutcome::Duplicate
            } else {
                records.insert(id.to_string(), text.to_string());
                WriteOutcome::Stored
            }
        };

        match outcome {
            WriteOutcome::Duplicate => {
                tracing::info!(id = %id, "Duplicate detected, skipping storage");
                metrics::record_store_write("duplicate");
            }
            _ => {
                tracing::info!(id = %id, msg = %text, "Stored new message");
                metrics::record_store_write("stored");
            }
        }
        outcome
    }

    /// Snapshot of every stored text in insertion order.
    pub fn messages(&self) -> Vec<String> {
        let messages: Vec<String> = self.lock().values().cloned().collect();
        tracing::debug!(count = messages.len(), "Returning all messages");
        metrics::record_store_read(messages.len());
        messages
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave the map half-written
    // (single insert), so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, IndexMap<String, String>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
