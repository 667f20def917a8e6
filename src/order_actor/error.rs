//! Error types for the Order actor.

use thiserror::Error;

/// Errors raised inside the order store actor.
#[derive(Debug, Error)]
pub enum OrderRecordError {
    /// The record breaks the job-id/status invariant and was not stored.
    #[error("Invalid order record {order_id}: {reason}")]
    InvalidRecord { order_id: String, reason: String },

    /// The journal could not be written; the record was not stored.
    #[error("Order journal write failed: {0}")]
    JournalWrite(#[source] std::io::Error),

    /// The journal could not be read at start-up.
    #[error("Order journal read failed: {0}")]
    JournalRead(#[source] std::io::Error),

    /// A journal line is not a valid order record.
    #[error("Corrupt order journal at line {line}: {source}")]
    CorruptJournal {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// No `local_<n>` id is left to hand out.
    #[error("Order ids exhausted: {highest} is already in use")]
    IdsExhausted { highest: String },
}
