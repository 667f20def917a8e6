//! Customer orders and their print-job lifecycle.

use crate::model::PrintJobId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Where an order sits in the print-job lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintJobStatus {
    Presubmit,
    Pending,
    Accepted,
    Rejected,
}

impl Display for PrintJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Presubmit => "presubmit",
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Es,
}

impl Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::En => "en",
            Self::Es => "es",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditionType {
    Original,
    Modernized,
    Updated,
}

impl Display for EditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Original => "original",
            Self::Modernized => "modernized",
            Self::Updated => "updated",
        })
    }
}

/// Shipping service level requested by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingLevel {
    Mail,
    PriorityMail,
    GroundHd,
    GroundBus,
    Ground,
    Expedited,
    Express,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub document_id: String,
    pub edition_type: EditionType,
    pub lang: Lang,
    pub quantity: u32,
}

/// Represents a customer order that needs physical print fulfillment.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be held by the in-process order store.
///
/// See [`impl ActorEntity for Order`](crate::order_actor::entity) for details on:
/// - Creation parameters ([`NewOrder`])
/// - Journal writes on upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub address: Address,
    pub items: Vec<OrderItem>,
    pub shipping_level: ShippingLevel,
    pub print_job_status: PrintJobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_job_id: Option<PrintJobId>,
}

/// Payload for creating a new order in the local store.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub address: Address,
    pub items: Vec<OrderItem>,
    pub shipping_level: ShippingLevel,
}

impl Order {
    /// Creates an order that has not been submitted yet.
    pub fn presubmit(
        id: impl Into<String>,
        address: Address,
        items: Vec<OrderItem>,
        shipping_level: ShippingLevel,
    ) -> Self {
        Self {
            id: id.into(),
            address,
            items,
            shipping_level,
            print_job_status: PrintJobStatus::Presubmit,
            print_job_id: None,
        }
    }

    /// Records a freshly created provider job. The order becomes `pending`.
    pub fn link_print_job(&mut self, job_id: PrintJobId) {
        self.print_job_id = Some(job_id);
        self.print_job_status = PrintJobStatus::Pending;
    }

    /// Records the provider's validation outcome on a linked order.
    pub fn record_verification(&mut self, accepted: bool) {
        self.print_job_status = if accepted {
            PrintJobStatus::Accepted
        } else {
            PrintJobStatus::Rejected
        };
    }

    /// A job id is present exactly when the order has left `presubmit`.
    pub fn is_consistent(&self) -> bool {
        self.print_job_id.is_some() == (self.print_job_status != PrintJobStatus::Presubmit)
    }
}
