//! Provider-side print job as observed by the pipeline.

use crate::model::PrintJobPayload;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier assigned to a print job by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrintJobId(pub u64);

impl Display for PrintJobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Provider vocabulary for job states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatusName {
    Created,
    InReview,
    Unpaid,
    PaymentInProgress,
    ProductionReady,
    ProductionDelayed,
    InProduction,
    Shipped,
    Error,
    Canceled,
    Rejected,
}

impl JobStatusName {
    /// States in which the provider will never print the job.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Error | Self::Canceled | Self::Rejected)
    }
}

impl Display for JobStatusName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Created => "CREATED",
            Self::InReview => "IN_REVIEW",
            Self::Unpaid => "UNPAID",
            Self::PaymentInProgress => "PAYMENT_IN_PROGRESS",
            Self::ProductionReady => "PRODUCTION_READY",
            Self::ProductionDelayed => "PRODUCTION_DELAYED",
            Self::InProduction => "IN_PRODUCTION",
            Self::Shipped => "SHIPPED",
            Self::Error => "ERROR",
            Self::Canceled => "CANCELED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub name: JobStatusName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JobStatus {
    pub fn new(name: JobStatusName) -> Self {
        Self { name, message: None }
    }

    pub fn with_message(name: JobStatusName, message: impl Into<String>) -> Self {
        Self {
            name,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    pub id: PrintJobId,
    pub external_id: String,
    pub status: JobStatus,
    /// The submitted request. Only the sandbox provider keeps it.
    #[serde(skip)]
    pub payload: Option<PrintJobPayload>,
}
