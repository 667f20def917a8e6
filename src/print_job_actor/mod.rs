//! Sandbox print provider: provider-side job logic run as an in-process actor.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::SandboxPrintProvider;
use crate::framework::ResourceActor;
use crate::model::{PrintJob, PrintJobId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// First job id handed out by the sandbox.
pub const FIRST_SANDBOX_JOB_ID: u64 = 1001;

/// Creates a new sandbox print job actor and its provider client.
///
/// Job ids continue after the highest id in `issued`, so jobs linked to
/// orders by an earlier run are never handed out again.
pub fn new(
    issued: impl IntoIterator<Item = PrintJobId>,
) -> (ResourceActor<PrintJob>, SandboxPrintProvider) {
    let first = issued
        .into_iter()
        .map(|id| id.0.saturating_add(1))
        .max()
        .unwrap_or(FIRST_SANDBOX_JOB_ID)
        .max(FIRST_SANDBOX_JOB_ID);
    let job_id_counter = Arc::new(AtomicU64::new(first));
    let next_job_id = move || PrintJobId(job_id_counter.fetch_add(1, Ordering::SeqCst));

    let (actor, generic_client) = ResourceActor::new(32, next_job_id);
    let client = SandboxPrintProvider::new(generic_client);

    (actor, client)
}

