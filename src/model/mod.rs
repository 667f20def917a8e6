//! Pure data structures (DTOs) shared by the pipeline and its collaborators.

pub mod order;
pub mod payload;
pub mod print_job;

pub use order::*;
pub use payload::*;
pub use print_job::*;
