//! # Submission Pipeline
//!
//! Drives each `presubmit` order through the provider:
//!
//! 1. build the payload from the catalog,
//! 2. create the provider job (once, never retried),
//! 3. persist the job id on the order with bounded retry,
//! 4. wait for the provider's review and poll the job once,
//! 5. persist `accepted` or `rejected` with a single attempt.
//!
//! Orders run one at a time in store order. A failure in one order is
//! returned from [`SubmissionPipeline::process_order`] as an [`OrderError`],
//! logged inside that order's span and counted; it never stops the batch.
//! Only failing to fetch the batch ends the run early.

use super::error::{OrderError, PipelineError, SubmissionError};
use super::retry::{retry_with_delays, Sleeper, TokioSleeper};
use crate::catalog::Catalog;
use crate::clients::{OrderStore, PrintProvider, ProviderBody};
use crate::model::{JobStatus, JobStatusName, Order, PrintJobId, PrintJobPayload, PrintJobStatus};
use crate::payload::{build_payload, PayloadSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Waits before each linkage save attempt.
pub const LINKAGE_SAVE_DELAYS: [Duration; 3] = [
    Duration::ZERO,
    Duration::from_secs(5),
    Duration::from_secs(25),
];

/// Time the provider gets to review a new job before it is polled.
pub const VERIFY_DELAY: Duration = Duration::from_secs(180);

/// Timing of the pipeline's waits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePolicy {
    pub save_delays: Vec<Duration>,
    pub verify_delay: Duration,
}

impl Default for PipelinePolicy {
    fn default() -> Self {
        Self {
            save_delays: LINKAGE_SAVE_DELAYS.to_vec(),
            verify_delay: VERIFY_DELAY,
        }
    }
}

/// An order that reached a recorded provider decision.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    Accepted {
        order_id: String,
        job_id: PrintJobId,
        provider_status: JobStatusName,
    },
    Rejected {
        order_id: String,
        job_id: PrintJobId,
        provider_status: JobStatusName,
        message: Option<String>,
    },
}

/// Counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub fetched: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Left untouched (or still `presubmit`); picked up again next run.
    pub skipped: usize,
    /// Failed after the provider job existed.
    pub needs_attention: usize,
}

impl BatchReport {
    fn record(&mut self, result: &Result<OrderOutcome, OrderError>) {
        match result {
            Ok(OrderOutcome::Accepted { .. }) => self.accepted += 1,
            Ok(OrderOutcome::Rejected { .. }) => self.rejected += 1,
            Err(e) if e.requires_manual_intervention() => self.needs_attention += 1,
            Err(_) => self.skipped += 1,
        }
    }
}

/// Pipeline over an order store, a print provider and a sleeper.
pub struct SubmissionPipeline<S, P, Z = TokioSleeper> {
    store: S,
    provider: P,
    sleeper: Z,
    catalog: Arc<Catalog>,
    settings: PayloadSettings,
    policy: PipelinePolicy,
}

impl<S, P> SubmissionPipeline<S, P, TokioSleeper>
where
    S: OrderStore,
    P: PrintProvider,
{
    pub fn new(store: S, provider: P, catalog: Arc<Catalog>, settings: PayloadSettings) -> Self {
        Self {
            store,
            provider,
            sleeper: TokioSleeper,
            catalog,
            settings,
            policy: PipelinePolicy::default(),
        }
    }
}

impl<S, P, Z> SubmissionPipeline<S, P, Z>
where
    S: OrderStore,
    P: PrintProvider,
    Z: Sleeper,
{
    pub fn with_sleeper<Z2: Sleeper>(self, sleeper: Z2) -> SubmissionPipeline<S, P, Z2> {
        SubmissionPipeline {
            store: self.store,
            provider: self.provider,
            sleeper,
            catalog: self.catalog,
            settings: self.settings,
            policy: self.policy,
        }
    }

    pub fn with_policy(mut self, policy: PipelinePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Processes every order awaiting submission.
    pub async fn run(&self) -> Result<BatchReport, PipelineError> {
        let orders = self
            .store
            .find_orders_awaiting_submission()
            .await
            .map_err(PipelineError::Retrieval)?;

        let mut report = BatchReport {
            fetched: orders.len(),
            ..Default::default()
        };
        if orders.is_empty() {
            debug!("no orders awaiting submission");
            return Ok(report);
        }
        info!(count = orders.len(), "Processing orders awaiting submission");

        for order in orders {
            let span = info_span!("order", order_id = %order.id);
            let result = self.process_order(order).instrument(span.clone()).await;
            span.in_scope(|| log_order_result(&result));
            report.record(&result);
        }

        info!(
            fetched = report.fetched,
            accepted = report.accepted,
            rejected = report.rejected,
            skipped = report.skipped,
            needs_attention = report.needs_attention,
            "Batch complete"
        );
        Ok(report)
    }

    /// Takes one order from `presubmit` to a recorded outcome.
    pub async fn process_order(&self, mut order: Order) -> Result<OrderOutcome, OrderError> {
        if order.print_job_status != PrintJobStatus::Presubmit {
            return Err(OrderError::Ineligible {
                order_id: order.id,
                status: order.print_job_status,
            });
        }

        let payload = build_payload(&order, &self.catalog, &self.settings)?;
        debug!(line_items = payload.line_items.len(), "Payload built");

        let job_id = self
            .submit(&payload)
            .await
            .map_err(|source| OrderError::Submission {
                order_id: order.id.clone(),
                source,
            })?;

        order.link_print_job(job_id);
        self.persist_linkage(&order, job_id).await?;

        let status = self.verify(&order.id, job_id).await?;
        let accepted = !status.name.is_failure();
        order.record_verification(accepted);

        self.store
            .save_order(&order)
            .await
            .map_err(|source| OrderError::OutcomePersistence {
                order_id: order.id.clone(),
                job_id,
                status: order.print_job_status,
                source,
            })?;

        Ok(if accepted {
            OrderOutcome::Accepted {
                order_id: order.id,
                job_id,
                provider_status: status.name,
            }
        } else {
            OrderOutcome::Rejected {
                order_id: order.id,
                job_id,
                provider_status: status.name,
                message: status.message,
            }
        })
    }

    async fn submit(&self, payload: &PrintJobPayload) -> Result<PrintJobId, SubmissionError> {
        let response = self.provider.create_print_job(payload).await?;
        if response.http_status != 201 {
            return Err(SubmissionError::UnexpectedHttpStatus {
                status: response.http_status,
                response: response.describe(),
            });
        }

        match response.body {
            ProviderBody::Ok(job) if job.status.name == JobStatusName::Created => {
                info!(job_id = %job.id, http_status = response.http_status, "Print job created");
                Ok(job.id)
            }
            ProviderBody::Ok(job) => Err(SubmissionError::UnexpectedJobStatus {
                job_id: job.id,
                status: job.status.name,
            }),
            ProviderBody::Error(raw) => Err(SubmissionError::UnexpectedHttpStatus {
                status: response.http_status,
                response: raw.to_string(),
            }),
        }
    }

    async fn persist_linkage(&self, order: &Order, job_id: PrintJobId) -> Result<(), OrderError> {
        let store = &self.store;
        match retry_with_delays(&self.policy.save_delays, &self.sleeper, move || {
            store.save_order(order)
        })
        .await
        {
            Ok(((), attempts)) => {
                info!(job_id = %job_id, attempt = attempts, "Print job linked to order");
                Ok(())
            }
            Err(exhausted) => Err(OrderError::LinkagePersistence {
                order_id: order.id.clone(),
                job_id,
                attempts: exhausted.attempts,
                last_error: exhausted.last_error,
            }),
        }
    }

    async fn verify(&self, order_id: &str, job_id: PrintJobId) -> Result<JobStatus, OrderError> {
        debug!(
            job_id = %job_id,
            delay_ms = self.policy.verify_delay.as_millis() as u64,
            "Waiting for provider review"
        );
        self.sleeper.sleep(self.policy.verify_delay).await;

        let poll_failed = |http_status, response| OrderError::VerificationPoll {
            order_id: order_id.to_string(),
            job_id,
            http_status,
            response,
        };

        let response = self
            .provider
            .print_job_status(job_id)
            .await
            .map_err(|e| poll_failed(None, e.to_string()))?;

        if response.http_status != 200 {
            return Err(poll_failed(Some(response.http_status), response.describe()));
        }
        match response.body {
            ProviderBody::Ok(status) => {
                info!(job_id = %job_id, status = %status.name, "Print job reviewed");
                Ok(status)
            }
            ProviderBody::Error(raw) => Err(poll_failed(Some(200), raw.to_string())),
        }
    }
}

fn log_order_result(result: &Result<OrderOutcome, OrderError>) {
    match result {
        Ok(OrderOutcome::Accepted {
            job_id,
            provider_status,
            ..
        }) => info!(job_id = %job_id, status = %provider_status, "Order accepted"),
        Ok(OrderOutcome::Rejected {
            job_id,
            provider_status,
            message,
            ..
        }) => warn!(
            job_id = %job_id,
            status = %provider_status,
            response = message.as_deref().unwrap_or_default(),
            "Order rejected by print provider"
        ),
        Err(e) => {
            let manual_intervention = e.requires_manual_intervention();
            match e {
                OrderError::LinkagePersistence { job_id, attempts, .. } => error!(
                    job_id = %job_id,
                    attempt = attempts,
                    manual_intervention,
                    error = %e,
                    "Print job exists but is not linked to its order"
                ),
                OrderError::VerificationPoll {
                    job_id,
                    http_status,
                    response,
                    ..
                } => error!(
                    job_id = %job_id,
                    http_status = ?http_status,
                    response = %response,
                    manual_intervention,
                    error = %e,
                    "Verification poll failed, order left pending"
                ),
                OrderError::OutcomePersistence { job_id, .. } => error!(
                    job_id = %job_id,
                    manual_intervention,
                    error = %e,
                    "Failed to record verification outcome"
                ),
                OrderError::Submission {
                    source: SubmissionError::UnexpectedHttpStatus { status, response },
                    ..
                } => error!(
                    http_status = status,
                    response = %response,
                    manual_intervention,
                    error = %e,
                    "Print job submission failed, order skipped"
                ),
                OrderError::Submission { .. } => error!(
                    manual_intervention,
                    error = %e,
                    "Print job submission failed, order skipped"
                ),
                OrderError::Ineligible { .. } | OrderError::PayloadBuild(_) => {
                    error!(manual_intervention, error = %e, "Order skipped")
                }
            }
        }
    }
}
