//! # Observability & Tracing
//!
//! Structured logging for the submission run, filtered with `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Batch**: how many orders were fetched, and a summary line once every
//!   order has been handled.
//! - **Per order**: everything inside an `order` span carrying `order_id`, so
//!   each line can be attributed without repeating the id.
//! - **Provider calls**: `job_id`, `http_status` and, on failure, the raw
//!   provider `response`.
//! - **Retries**: each failed linkage save with its `attempt` and `delay_ms`.
//! - **Escalations**: lines that need a human carry `manual_intervention = true`.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//!
//! # Payloads and actor traffic
//! RUST_LOG=debug cargo run
//!
//! # Only the pipeline
//! RUST_LOG=print_jobs::pipeline=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a run with one accepted order reads:
//!
//! ```text
//! INFO Processing orders awaiting submission count=1
//! INFO order: Print job created order_id="local_1" job_id=1001 http_status=201
//! INFO order: Print job linked to order order_id="local_1" job_id=1001 attempt=1
//! INFO order: Print job reviewed order_id="local_1" job_id=1001 status=UNPAID
//! INFO order: Order accepted order_id="local_1" job_id=1001 status=UNPAID
//! INFO Batch complete fetched=1 accepted=1 rejected=0 skipped=0 needs_attention=0
//! ```
//!
//! Search for `manual_intervention=true` to find print jobs that exist at the
//! provider but are not (or not finally) reflected on their order.

/// Installs the global subscriber. Call once, at the top of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
