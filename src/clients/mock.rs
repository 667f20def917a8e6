//! # Mock Collaborators
//!
//! Fakes for testing the submission pipeline without spinning up actors.
//!
//! Each fake keeps a queue of expected calls. Queue a reply with
//! `expect_*().return_*(..)`, hand the fake to the code under test, then call
//! `verify()` to make sure every queued call actually happened. A call with
//! no matching expectation panics.
//!
//! ```ignore
//! let store = MockOrderStore::new();
//! store.expect_find().return_ok(vec![order]);
//! store.expect_save().return_err(StoreError::Unavailable("down".into()));
//! store.expect_save().return_ok();
//!
//! // ... run the pipeline with `store.clone()` ...
//! store.verify();
//! ```

use crate::clients::{
    OrderStore, PrintProvider, ProviderError, ProviderResponse, StoreError,
};
use crate::model::{JobStatus, JobStatusName, Order, PrintJob, PrintJobId, PrintJobPayload};
use crate::pipeline::Sleeper;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// ORDER STORE
// =============================================================================

enum StoreExpectation {
    Find(Result<Vec<Order>, StoreError>),
    Save(Result<(), StoreError>),
}

#[derive(Default)]
struct StoreState {
    expectations: VecDeque<StoreExpectation>,
    save_attempts: Vec<Order>,
    stored: HashMap<String, Order>,
}

/// Scripted [`OrderStore`]. Successful saves are applied to an in-memory map.
#[derive(Clone, Default)]
pub struct MockOrderStore {
    state: Arc<Mutex<StoreState>>,
}

impl MockOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a record in the backing map without going through `save_order`.
    pub fn seed(&self, order: Order) {
        let mut state = self.state.lock().unwrap();
        state.stored.insert(order.id.clone(), order);
    }

    pub fn expect_find(&self) -> FindExpectationBuilder {
        FindExpectationBuilder {
            state: self.state.clone(),
        }
    }

    pub fn expect_save(&self) -> SaveExpectationBuilder {
        SaveExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Every record passed to `save_order`, failed attempts included.
    pub fn save_attempts(&self) -> Vec<Order> {
        self.state.lock().unwrap().save_attempts.clone()
    }

    /// The record as the store currently holds it.
    pub fn stored(&self, id: &str) -> Option<Order> {
        self.state.lock().unwrap().stored.get(id).cloned()
    }

    /// Panics unless every queued expectation was consumed.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.expectations.is_empty() {
            panic!(
                "Not all store expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl OrderStore for MockOrderStore {
    async fn find_orders_awaiting_submission(&self) -> Result<Vec<Order>, StoreError> {
        let mut state = self.state.lock().unwrap();
        match state.expectations.pop_front() {
            Some(StoreExpectation::Find(response)) => response,
            _ => panic!("Unexpected find_orders_awaiting_submission call"),
        }
    }

    async fn save_order(&self, order: &Order) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.save_attempts.push(order.clone());
        match state.expectations.pop_front() {
            Some(StoreExpectation::Save(response)) => {
                if response.is_ok() {
                    state.stored.insert(order.id.clone(), order.clone());
                }
                response
            }
            _ => panic!("Unexpected save_order call for {}", order.id),
        }
    }
}

/// Builder for `find_orders_awaiting_submission` expectations.
pub struct FindExpectationBuilder {
    state: Arc<Mutex<StoreState>>,
}

impl FindExpectationBuilder {
    pub fn return_ok(self, orders: Vec<Order>) {
        self.push(Ok(orders));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<Order>, StoreError>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back(StoreExpectation::Find(response));
    }
}

/// Builder for `save_order` expectations.
pub struct SaveExpectationBuilder {
    state: Arc<Mutex<StoreState>>,
}

impl SaveExpectationBuilder {
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), StoreError>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back(StoreExpectation::Save(response));
    }
}

// =============================================================================
// PRINT PROVIDER
// =============================================================================

enum ProviderExpectation {
    Create(Result<ProviderResponse<PrintJob>, ProviderError>),
    Status {
        job_id: PrintJobId,
        response: Result<ProviderResponse<JobStatus>, ProviderError>,
    },
}

#[derive(Default)]
struct ProviderState {
    expectations: VecDeque<ProviderExpectation>,
    submitted: Vec<PrintJobPayload>,
    polled: Vec<PrintJobId>,
}

/// Scripted [`PrintProvider`].
#[derive(Clone, Default)]
pub struct MockPrintProvider {
    state: Arc<Mutex<ProviderState>>,
}

impl MockPrintProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_create(&self) -> CreateExpectationBuilder {
        CreateExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Expects a status poll for `job_id`.
    pub fn expect_status(&self, job_id: PrintJobId) -> StatusExpectationBuilder {
        StatusExpectationBuilder {
            job_id,
            state: self.state.clone(),
        }
    }

    /// Payloads received by `create_print_job`, in call order.
    pub fn submitted(&self) -> Vec<PrintJobPayload> {
        self.state.lock().unwrap().submitted.clone()
    }

    /// Job ids received by `print_job_status`, in call order.
    pub fn polled(&self) -> Vec<PrintJobId> {
        self.state.lock().unwrap().polled.clone()
    }

    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.expectations.is_empty() {
            panic!(
                "Not all provider expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl PrintProvider for MockPrintProvider {
    async fn create_print_job(
        &self,
        payload: &PrintJobPayload,
    ) -> Result<ProviderResponse<PrintJob>, ProviderError> {
        let mut state = self.state.lock().unwrap();
        state.submitted.push(payload.clone());
        match state.expectations.pop_front() {
            Some(ProviderExpectation::Create(response)) => response,
            _ => panic!("Unexpected create_print_job call for {}", payload.external_id),
        }
    }

    async fn print_job_status(
        &self,
        job_id: PrintJobId,
    ) -> Result<ProviderResponse<JobStatus>, ProviderError> {
        let mut state = self.state.lock().unwrap();
        state.polled.push(job_id);
        match state.expectations.pop_front() {
            Some(ProviderExpectation::Status {
                job_id: expected,
                response,
            }) => {
                assert_eq!(job_id, expected, "Polled the wrong print job");
                response
            }
            _ => panic!("Unexpected print_job_status call for {job_id}"),
        }
    }
}

/// Builder for `create_print_job` expectations.
pub struct CreateExpectationBuilder {
    state: Arc<Mutex<ProviderState>>,
}

impl CreateExpectationBuilder {
    /// Replies 201 with a job in `status` (normally `CREATED`).
    pub fn return_created(self, job_id: PrintJobId, external_id: &str, status: JobStatusName) {
        let job = PrintJob {
            id: job_id,
            external_id: external_id.to_string(),
            status: JobStatus::new(status),
            payload: None,
        };
        self.return_response(ProviderResponse::ok(201, job));
    }

    pub fn return_response(self, response: ProviderResponse<PrintJob>) {
        self.push(Ok(response));
    }

    pub fn return_err(self, error: ProviderError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<ProviderResponse<PrintJob>, ProviderError>) {
        let mut state = self.state.lock().unwrap();
        state
            .expectations
            .push_back(ProviderExpectation::Create(response));
    }
}

/// Builder for `print_job_status` expectations.
pub struct StatusExpectationBuilder {
    job_id: PrintJobId,
    state: Arc<Mutex<ProviderState>>,
}

impl StatusExpectationBuilder {
    /// Replies 200 with `status`.
    pub fn return_status(self, status: JobStatusName) {
        self.return_response(ProviderResponse::ok(200, JobStatus::new(status)));
    }

    pub fn return_response(self, response: ProviderResponse<JobStatus>) {
        self.push(Ok(response));
    }

    pub fn return_err(self, error: ProviderError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<ProviderResponse<JobStatus>, ProviderError>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back(ProviderExpectation::Status {
            job_id: self.job_id,
            response,
        });
    }
}

// =============================================================================
// SLEEPER
// =============================================================================

/// [`Sleeper`] that returns at once and remembers what it was asked to wait.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    recorded: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.recorded.lock().unwrap().push(duration);
    }
}
