//! The print-job submission and verification pipeline.

pub mod error;
pub mod retry;
pub mod submission;

pub use error::*;
pub use retry::*;
pub use submission::*;
