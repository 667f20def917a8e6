//! Order-specific resource logic: entity implementation and journal.

pub mod entity;
pub mod error;
pub mod journal;

pub use error::*;
pub use journal::OrderJournal;

use crate::clients::ActorOrderStore;
use crate::framework::ResourceActor;
use crate::model::Order;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const LOCAL_ID_PREFIX: &str = "local_";

/// Creates a new Order actor preloaded with `orders`, and its store client.
///
/// Generated ids continue after the highest `local_<n>` already present.
/// Fails when that id is already `local_<u64::MAX>`.
pub fn new(
    orders: Vec<Order>,
) -> Result<(ResourceActor<Order>, ActorOrderStore), OrderRecordError> {
    let highest = orders
        .iter()
        .filter_map(|o| o.id.strip_prefix(LOCAL_ID_PREFIX)?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let first = highest
        .checked_add(1)
        .ok_or_else(|| OrderRecordError::IdsExhausted {
            highest: format!("{LOCAL_ID_PREFIX}{highest}"),
        })?;
    let order_id_counter = Arc::new(AtomicU64::new(first));
    let next_order_id = move || {
        let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("{LOCAL_ID_PREFIX}{id}")
    };

    let (mut actor, generic_client) = ResourceActor::new(32, next_order_id);
    actor.seed(orders);
    let client = ActorOrderStore::new(generic_client);

    Ok((actor, client))
}
