//! Entity trait implementation for provider-side print jobs in the sandbox.
//!
//! Creation validates the payload the way the provider's intake does; the first
//! status check afterwards runs the provider's asynchronous review.

use super::{PrintJobAction, PrintJobError};
use crate::framework::ActorEntity;
use crate::model::{JobStatus, JobStatusName, PrintJob, PrintJobId, PrintJobPayload};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for PrintJob {
    type Id = PrintJobId;
    type Create = PrintJobPayload;
    type Action = PrintJobAction;
    type ActionResult = JobStatus;
    type Context = ();
    type Error = PrintJobError;

    fn id(&self) -> &PrintJobId {
        &self.id
    }

    fn from_create_params(id: PrintJobId, payload: PrintJobPayload) -> Result<Self, Self::Error> {
        validate_intake(&payload)?;
        Ok(Self {
            id,
            external_id: payload.external_id.clone(),
            status: JobStatus::new(JobStatusName::Created),
            payload: Some(payload),
        })
    }

    async fn handle_action(
        &mut self,
        action: PrintJobAction,
        _ctx: &(),
    ) -> Result<JobStatus, Self::Error> {
        match action {
            PrintJobAction::CheckStatus => {
                if self.status.name == JobStatusName::Created {
                    self.status = review(self.payload.as_ref());
                }
                Ok(self.status.clone())
            }
        }
    }
}

fn validate_intake(payload: &PrintJobPayload) -> Result<(), PrintJobError> {
    if payload.line_items.is_empty() {
        return Err(PrintJobError::InvalidPayload("line_items must not be empty".into()));
    }
    if payload.shipping_address.postcode.trim().is_empty() {
        return Err(PrintJobError::InvalidPayload("shipping_address.postcode is required".into()));
    }
    for (idx, line) in payload.line_items.iter().enumerate() {
        if line.quantity == 0 {
            return Err(PrintJobError::InvalidPayload(format!(
                "line_items[{idx}].quantity must be positive"
            )));
        }
        for url in [&line.cover, &line.interior] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(PrintJobError::InvalidPayload(format!(
                    "line_items[{idx}] asset is not a URL: {url}"
                )));
            }
        }
    }
    Ok(())
}

fn review(payload: Option<&PrintJobPayload>) -> JobStatus {
    let country = payload
        .map(|p| p.shipping_address.country_code.as_str())
        .unwrap_or_default();
    let valid_country = country.len() == 2 && country.bytes().all(|b| b.is_ascii_uppercase());
    if valid_country {
        JobStatus::new(JobStatusName::Unpaid)
    } else {
        JobStatus::with_message(
            JobStatusName::Rejected,
            format!("unsupported shipping country code: {country:?}"),
        )
    }
}
