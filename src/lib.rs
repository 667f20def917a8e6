//! # Print Jobs
//!
//! > **Submits print-on-demand orders to a print provider and records the verdict.**
//!
//! Orders waiting in the store as `presubmit` are turned into provider print
//! jobs, linked back to their order, checked once after the provider has had
//! time to review them, and finally marked `accepted` or `rejected`.
//!
//! ## 🚦 Order Lifecycle
//!
//! ```text
//! presubmit --(job created, linkage saved)--> pending --(review ok)------> accepted
//!                                                     --(review failed)--> rejected
//! presubmit --(payload or submission failed)--> presubmit   (retried next run)
//! ```
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Failure Isolation
//! Each order is handled to completion before the next one starts, and every
//! per-order failure comes back as an [`OrderError`](pipeline::OrderError)
//! value. Only failing to fetch the batch stops a run.
//!
//! ### 2. Resource Actors
//! The in-process order store and the sandbox provider are both a generic
//! [`ResourceActor`](framework::ResourceActor): one Tokio task owning a map
//! of entities, driven over a channel. Entity behavior lives in the
//! [`ActorEntity`](framework::ActorEntity) impls.
//!
//! ### 3. Seams
//! The pipeline only sees the [`OrderStore`](clients::OrderStore) and
//! [`PrintProvider`](clients::PrintProvider) traits plus a
//! [`Sleeper`](pipeline::Sleeper). Tests swap in the fakes from
//! [`clients::mock`] and never wait in real time.
//!
//! ### 4. Observability
//! `tracing` everywhere, one `order` span per order. See [`runtime::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: orders, provider jobs and payloads.
//! - [`catalog`]: edition lookup and print sizing.
//! - [`payload`]: the pure order to payload mapping.
//! - [`pipeline`]: the submission and verification run, with its retry helper.
//! - [`clients`]: collaborator traits and their actor-backed implementations.
//! - [`framework`]: the generic resource actor.
//! - [`order_actor`], [`print_job_actor`]: the two actor entities.
//! - [`runtime`]: configuration, start-up and shutdown, tracing.
//!
//! ## 🚀 Running
//!
//! ```bash
//! PRINT_JOBS_STORE_ENDPOINT=orders.jsonl \
//! PRINT_JOBS_CATALOG_PATH=editions.json \
//! PRINT_JOBS_METADATA_PATH=meta.json \
//! PRINT_JOBS_CONTACT_EMAIL=orders@example.org \
//! RUST_LOG=info cargo run
//! ```

pub mod catalog;
pub mod clients;
pub mod framework;
pub mod model;
pub mod order_actor;
pub mod payload;
pub mod pipeline;
pub mod print_job_actor;
pub mod runtime;
