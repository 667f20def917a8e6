//! Error types for the submission pipeline.

use crate::clients::{ProviderError, StoreError};
use crate::model::{JobStatusName, PrintJobId, PrintJobStatus};
use crate::payload::PayloadError;
use thiserror::Error;

/// Creating the provider job did not produce a usable job.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmissionError {
    #[error("Print provider answered HTTP {status}: {response}")]
    UnexpectedHttpStatus { status: u16, response: String },

    #[error("Print job {job_id} was created in status {status}, expected CREATED")]
    UnexpectedJobStatus {
        job_id: PrintJobId,
        status: JobStatusName,
    },

    #[error(transparent)]
    Transport(#[from] ProviderError),
}

/// Why a single order did not reach a recorded outcome.
///
/// Returned by the per-order handler; the batch logs it and moves on.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order was fetched in status {status} and is not eligible for submission")]
    Ineligible {
        order_id: String,
        status: PrintJobStatus,
    },

    #[error("Failed to build print job payload: {0}")]
    PayloadBuild(#[from] PayloadError),

    #[error("Failed to submit print job for order {order_id}: {source}")]
    Submission {
        order_id: String,
        #[source]
        source: SubmissionError,
    },

    /// The provider job exists but the order does not know about it.
    #[error(
        "Failed to persist print job {job_id} on order {order_id} after {attempts} attempts{}",
        .last_error.as_ref().map(|e| format!(": {e}")).unwrap_or_default()
    )]
    LinkagePersistence {
        order_id: String,
        job_id: PrintJobId,
        attempts: u32,
        last_error: Option<StoreError>,
    },

    #[error("Verification poll for print job {job_id} failed{}: {response}",
        .http_status.map(|s| format!(" with HTTP {s}")).unwrap_or_default()
    )]
    VerificationPoll {
        order_id: String,
        job_id: PrintJobId,
        /// `None` when the provider could not be reached at all.
        http_status: Option<u16>,
        response: String,
    },

    #[error("Failed to persist status {status} for order {order_id}: {source}")]
    OutcomePersistence {
        order_id: String,
        job_id: PrintJobId,
        status: PrintJobStatus,
        #[source]
        source: StoreError,
    },
}

impl OrderError {
    /// Whether the provider job exists but the store does not hold its
    /// decision, so someone has to reconcile the two by hand.
    ///
    /// Drives both the `manual_intervention` log field and
    /// `BatchReport::needs_attention`.
    pub fn requires_manual_intervention(&self) -> bool {
        matches!(
            self,
            OrderError::LinkagePersistence { .. }
                | OrderError::VerificationPoll { .. }
                | OrderError::OutcomePersistence { .. }
        )
    }
}

/// Errors that end the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to retrieve orders awaiting submission: {0}")]
    Retrieval(#[source] StoreError),
}
