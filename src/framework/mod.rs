//! Generic actor framework for in-process resources.
//!
//! This module provides the building blocks used to run the order store and the
//! sandbox print provider as isolated Tokio tasks.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the entities
//! - [`ResourceClient`] - Type-safe handle for sending requests to an actor
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`crate::clients::mock`] for fakes of the collaborators built on top of this.

pub mod core;

// Re-export core types for convenience
pub use self::core::*;
