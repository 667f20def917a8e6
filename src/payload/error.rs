//! Error types for payload construction.

use crate::catalog::EditionKey;
use thiserror::Error;

/// Why an order could not be turned into a print job request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PayloadError {
    /// No edition in the catalog matches the order item.
    #[error("Unresolved edition for order item: {0}")]
    UnresolvedEdition(EditionKey),

    /// The edition exists but its physical metadata is missing.
    #[error("Unresolved edition metadata for order item: {0}")]
    UnresolvedMetadata(EditionKey),
}
