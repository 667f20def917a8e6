//! Runtime orchestration and lifecycle management.
//!
//! - [`Config`] - settings read from the environment
//! - [`FulfillmentSystem`] - starts the actors a run talks to and shuts them down
//! - [`setup_tracing`] - initializes structured logging

pub mod config;
pub mod fulfillment_system;
pub mod tracing;

pub use config::*;
pub use fulfillment_system::*;
pub use tracing::*;
