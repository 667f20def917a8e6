//! # Payload Builder
//!
//! Turns an [`Order`] into a [`PrintJobPayload`] using the edition [`Catalog`].
//!
//! Building is pure: no I/O, deterministic output, and either a complete payload
//! or an error. It is safe to call again after a failed submission.

pub mod error;

pub use error::*;

use crate::catalog::{pod_package_id, Asset, Catalog, EditionKey};
use crate::model::{LineItem, Order, OrderItem, PrintJobPayload, ShippingAddress};

/// Values copied onto every payload that do not come from the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSettings {
    /// Base URL under which edition assets are hosted, without trailing slash.
    pub asset_base_url: String,
    pub contact_email: String,
}

/// Builds the provider request for `order`.
///
/// Every order item is resolved before anything is returned, so a single
/// unknown edition fails the whole order.
pub fn build_payload(
    order: &Order,
    catalog: &Catalog,
    settings: &PayloadSettings,
) -> Result<PrintJobPayload, PayloadError> {
    let mut line_items = Vec::with_capacity(order.items.len());
    for item in &order.items {
        line_items.extend(line_items_for(item, catalog, settings)?);
    }

    let address = &order.address;
    Ok(PrintJobPayload {
        external_id: order.id.clone(),
        shipping_level: order.shipping_level,
        contact_email: settings.contact_email.clone(),
        shipping_address: ShippingAddress {
            name: address.name.clone(),
            street1: address.street.clone(),
            street2: address.street2.clone().filter(|s| !s.is_empty()),
            city: address.city.clone(),
            country_code: address.country.clone(),
            state_code: address.state.clone(),
            postcode: address.zip.clone(),
        },
        line_items,
    })
}

fn line_items_for(
    item: &OrderItem,
    catalog: &Catalog,
    settings: &PayloadSettings,
) -> Result<Vec<LineItem>, PayloadError> {
    let key = EditionKey::from(item);
    let edition = catalog
        .edition(&key)
        .ok_or_else(|| PayloadError::UnresolvedEdition(key.clone()))?;
    let meta = catalog
        .meta(&edition.path)
        .ok_or_else(|| PayloadError::UnresolvedMetadata(key.clone()))?;

    let url = format!(
        "{}/{}",
        settings.asset_base_url.trim_end_matches('/'),
        edition.path
    );
    let paperback = &meta.paperback;
    let is_multi = paperback.volumes.len() > 1;

    Ok(paperback
        .volumes
        .iter()
        .enumerate()
        .map(|(idx, &pages)| {
            let volume = is_multi.then_some(idx + 1);
            let title = match volume {
                Some(vol) => format!("{}, vol. {}", edition.document_title, vol),
                None => edition.document_title.clone(),
            };
            LineItem {
                title,
                cover: format!("{}/{}", url, edition.filename(Asset::Cover, volume)),
                interior: format!("{}/{}", url, edition.filename(Asset::Interior, volume)),
                pod_package_id: pod_package_id(paperback.size, pages),
                quantity: item.quantity,
            }
        })
        .collect())
}
