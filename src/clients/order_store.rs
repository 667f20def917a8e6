//! # Order Store
//!
//! The capability the pipeline needs from the order datastore, and the
//! in-process implementation backed by the Order actor.

use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{NewOrder, Order, PrintJobStatus};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors surfaced by an order store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("Order store unavailable: {0}")]
    Unavailable(String),

    /// The store refused or failed the write or query.
    #[error("Order store rejected request: {0}")]
    Rejected(String),
}

impl From<FrameworkError> for StoreError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                StoreError::Unavailable(e.to_string())
            }
            FrameworkError::NotFound(_) | FrameworkError::EntityError(_) => {
                StoreError::Rejected(e.to_string())
            }
        }
    }
}

/// Order datastore as seen by the submission pipeline.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Every order whose print job status is `presubmit`, in store order.
    async fn find_orders_awaiting_submission(&self) -> Result<Vec<Order>, StoreError>;

    /// Upserts the full record. Saving identical content again is a no-op.
    async fn save_order(&self, order: &Order) -> Result<(), StoreError>;
}

/// Order store served by the in-process Order actor.
#[derive(Clone)]
pub struct ActorOrderStore {
    inner: ResourceClient<Order>,
}

impl ActorOrderStore {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Adds a new `presubmit` order and returns its generated id.
    #[instrument(skip(self, order))]
    pub async fn create_order(&self, order: NewOrder) -> Result<String, StoreError> {
        debug!(?order, "create_order called");
        self.inner.create(order).await.map_err(StoreError::from)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Result<Option<Order>, StoreError> {
        self.inner.get(id).await.map_err(StoreError::from)
    }

    /// Every stored order, in arrival order.
    pub async fn all_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.inner.list(|_| true).await.map_err(StoreError::from)
    }
}

#[async_trait]
impl OrderStore for ActorOrderStore {
    #[instrument(skip(self))]
    async fn find_orders_awaiting_submission(&self) -> Result<Vec<Order>, StoreError> {
        debug!("Sending request");
        self.inner
            .list(|order: &Order| order.print_job_status == PrintJobStatus::Presubmit)
            .await
            .map_err(StoreError::from)
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn save_order(&self, order: &Order) -> Result<(), StoreError> {
        debug!("Sending request");
        self.inner
            .upsert(order.clone())
            .await
            .map(|_| ())
            .map_err(StoreError::from)
    }
}
