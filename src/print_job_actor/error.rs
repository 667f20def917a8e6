//! Error types for the sandbox print job actor.

use thiserror::Error;

/// Errors that can occur inside the sandbox provider.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PrintJobError {
    /// The submitted payload would be refused by the provider.
    #[error("Invalid print job payload: {0}")]
    InvalidPayload(String),
}
