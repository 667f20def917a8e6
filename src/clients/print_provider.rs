//! # Print Provider
//!
//! The capability the pipeline needs from the print-fulfillment provider, and
//! the sandbox implementation backed by the print job actor.

use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{JobStatus, PrintJob, PrintJobId, PrintJobPayload};
use crate::print_job_actor::PrintJobAction;
use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument};

/// The provider could not be talked to at all.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("Print provider transport error: {0}")]
    Transport(String),
}

/// Body of a provider reply: the expected document or the raw error body.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderBody<T> {
    Ok(T),
    Error(serde_json::Value),
}

/// A provider reply with its HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse<T> {
    pub http_status: u16,
    pub body: ProviderBody<T>,
}

impl<T> ProviderResponse<T> {
    pub fn ok(http_status: u16, value: T) -> Self {
        Self {
            http_status,
            body: ProviderBody::Ok(value),
        }
    }

    pub fn error(http_status: u16, body: serde_json::Value) -> Self {
        Self {
            http_status,
            body: ProviderBody::Error(body),
        }
    }

    /// The parsed body, if there is one.
    pub fn value(&self) -> Option<&T> {
        match &self.body {
            ProviderBody::Ok(value) => Some(value),
            ProviderBody::Error(_) => None,
        }
    }
}

impl<T: std::fmt::Debug> ProviderResponse<T> {
    /// Compact rendering of the body for log fields.
    pub fn describe(&self) -> String {
        match &self.body {
            ProviderBody::Ok(value) => format!("{value:?}"),
            ProviderBody::Error(raw) => raw.to_string(),
        }
    }
}

/// Print-fulfillment provider as seen by the submission pipeline.
#[async_trait]
pub trait PrintProvider: Send + Sync {
    /// Submits a new job. Not idempotent: each call may create a job.
    async fn create_print_job(
        &self,
        payload: &PrintJobPayload,
    ) -> Result<ProviderResponse<PrintJob>, ProviderError>;

    async fn print_job_status(
        &self,
        job_id: PrintJobId,
    ) -> Result<ProviderResponse<JobStatus>, ProviderError>;
}

/// Provider stand-in that runs the provider's intake and review in process.
#[derive(Clone)]
pub struct SandboxPrintProvider {
    inner: ResourceClient<PrintJob>,
}

impl SandboxPrintProvider {
    pub fn new(inner: ResourceClient<PrintJob>) -> Self {
        Self { inner }
    }

    /// Looks up a job as the provider holds it.
    pub async fn get_job(&self, job_id: PrintJobId) -> Result<Option<PrintJob>, ProviderError> {
        self.inner.get(job_id).await.map_err(transport)
    }
}

fn transport(e: FrameworkError) -> ProviderError {
    ProviderError::Transport(e.to_string())
}

#[async_trait]
impl PrintProvider for SandboxPrintProvider {
    #[instrument(skip(self, payload), fields(external_id = %payload.external_id))]
    async fn create_print_job(
        &self,
        payload: &PrintJobPayload,
    ) -> Result<ProviderResponse<PrintJob>, ProviderError> {
        debug!(?payload, "create_print_job called");
        let id = match self.inner.create(payload.clone()).await {
            Ok(id) => id,
            Err(FrameworkError::EntityError(e)) => {
                return Ok(ProviderResponse::error(400, json!({ "message": e.to_string() })));
            }
            Err(e) => return Err(transport(e)),
        };
        match self.inner.get(id).await.map_err(transport)? {
            Some(job) => Ok(ProviderResponse::ok(201, job)),
            None => Ok(ProviderResponse::error(
                500,
                json!({ "message": format!("job {id} vanished after creation") }),
            )),
        }
    }

    #[instrument(skip(self))]
    async fn print_job_status(
        &self,
        job_id: PrintJobId,
    ) -> Result<ProviderResponse<JobStatus>, ProviderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(job_id, PrintJobAction::CheckStatus)
            .await
        {
            Ok(status) => Ok(ProviderResponse::ok(200, status)),
            Err(FrameworkError::NotFound(id)) => Ok(ProviderResponse::error(
                404,
                json!({ "detail": format!("print job {id} not found") }),
            )),
            Err(FrameworkError::EntityError(e)) => {
                Ok(ProviderResponse::error(500, json!({ "message": e.to_string() })))
            }
            Err(e) => Err(transport(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JobStatusName, LineItem, ShippingAddress, ShippingLevel};

    fn payload(country: &str) -> PrintJobPayload {
        PrintJobPayload {
            external_id: "ord_1".into(),
            shipping_level: ShippingLevel::Mail,
            contact_email: "orders@example.org".into(),
            shipping_address: ShippingAddress {
                name: "Ann".into(),
                street1: "1 Elm St".into(),
                street2: None,
                city: "Salem".into(),
                country_code: country.into(),
                state_code: "OR".into(),
                postcode: "97301".into(),
            },
            line_items: vec![LineItem {
                title: "No Fear".into(),
                cover: "https://assets.example.org/a--cover.pdf".into(),
                interior: "https://assets.example.org/a--interior.pdf".into(),
                pod_package_id: "0425X0687BWSTDPB060UW444MXX".into(),
                quantity: 1,
            }],
        }
    }

    fn sandbox() -> SandboxPrintProvider {
        let (actor, provider) = crate::print_job_actor::new([]);
        tokio::spawn(actor.run(()));
        provider
    }

    #[tokio::test]
    async fn valid_payload_creates_job_then_review_accepts() {
        let provider = sandbox();

        let created = provider.create_print_job(&payload("US")).await.unwrap();
        assert_eq!(created.http_status, 201);
        let job = created.value().unwrap().clone();
        assert_eq!(job.status.name, JobStatusName::Created);
        assert_eq!(job.external_id, "ord_1");

        let status = provider.print_job_status(job.id).await.unwrap();
        assert_eq!(status.http_status, 200);
        assert_eq!(status.value().unwrap().name, JobStatusName::Unpaid);
    }

    #[tokio::test]
    async fn review_rejects_bad_country_code() {
        let provider = sandbox();
        let created = provider.create_print_job(&payload("USA")).await.unwrap();
        let job_id = created.value().unwrap().id;

        let status = provider.print_job_status(job_id).await.unwrap();
        assert_eq!(status.value().unwrap().name, JobStatusName::Rejected);

        // the review decision sticks
        let again = provider.print_job_status(job_id).await.unwrap();
        assert_eq!(again.value().unwrap().name, JobStatusName::Rejected);
    }

    #[tokio::test]
    async fn invalid_payload_is_a_400_with_error_body() {
        let provider = sandbox();
        let mut bad = payload("US");
        bad.line_items[0].quantity = 0;

        let response = provider.create_print_job(&bad).await.unwrap();
        assert_eq!(response.http_status, 400);
        assert!(response.value().is_none());
        assert!(response.describe().contains("quantity must be positive"));
    }

    #[tokio::test]
    async fn unknown_job_is_a_404() {
        let provider = sandbox();
        let response = provider.print_job_status(PrintJobId(1)).await.unwrap();
        assert_eq!(response.http_status, 404);
    }

    #[tokio::test]
    async fn job_ids_continue_after_issued_ones() {
        let (actor, provider) =
            crate::print_job_actor::new([PrintJobId(1001), PrintJobId(1007), PrintJobId(3)]);
        tokio::spawn(actor.run(()));
        let created = provider.create_print_job(&payload("US")).await.unwrap();
        assert_eq!(created.value().unwrap().id, PrintJobId(1008));

        let fresh = sandbox();
        let created = fresh.create_print_job(&payload("US")).await.unwrap();
        assert_eq!(
            created.value().unwrap().id,
            PrintJobId(crate::print_job_actor::FIRST_SANDBOX_JOB_ID)
        );
    }
}
