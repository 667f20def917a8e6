use crate::model::ShippingLevel;
use serde::{Deserialize, Serialize};

/// Provider-agnostic print job request built from one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintJobPayload {
    pub external_id: String,
    pub shipping_level: ShippingLevel,
    pub contact_email: String,
    pub shipping_address: ShippingAddress,
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub street1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub country_code: String,
    pub state_code: String,
    pub postcode: String,
}

/// One physical book to print. A multi-volume edition yields one per volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub title: String,
    pub cover: String,
    pub interior: String,
    pub pod_package_id: String,
    pub quantity: u32,
}
