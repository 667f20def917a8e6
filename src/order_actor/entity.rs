//! Entity trait implementation for the Order domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that lets [`Order`] be held by the generic [`ResourceActor`](crate::framework::ResourceActor).
//! Every write goes through the [`OrderJournal`] injected as the actor context.

use super::{OrderJournal, OrderRecordError};
use crate::framework::ActorEntity;
use crate::model::{NewOrder, Order};
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Order {
    type Id = String;
    type Create = NewOrder;
    type Action = Infallible;
    type ActionResult = ();
    type Context = OrderJournal;
    type Error = OrderRecordError;

    fn id(&self) -> &String {
        &self.id
    }

    /// New orders always start in `presubmit`.
    fn from_create_params(id: String, params: NewOrder) -> Result<Self, Self::Error> {
        Ok(Order::presubmit(
            id,
            params.address,
            params.items,
            params.shipping_level,
        ))
    }

    async fn on_create(&mut self, journal: &OrderJournal) -> Result<(), Self::Error> {
        journal.append(self).await
    }

    /// Rejects records that break the job-id invariant, then journals the write.
    async fn on_upsert(&mut self, journal: &OrderJournal) -> Result<(), Self::Error> {
        if !self.is_consistent() {
            return Err(OrderRecordError::InvalidRecord {
                order_id: self.id.clone(),
                reason: format!(
                    "status {} with print job id {:?}",
                    self.print_job_status, self.print_job_id
                ),
            });
        }
        journal.append(self).await
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &OrderJournal) -> Result<(), Self::Error> {
        match action {}
    }
}
