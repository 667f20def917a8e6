//! Collaborator traits for the pipeline, their in-process implementations
//! over [`ResourceClient`](crate::framework::ResourceClient), and test fakes.

pub mod mock;
pub mod order_store;
pub mod print_provider;

pub use order_store::*;
pub use print_provider::*;
