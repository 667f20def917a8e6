#![allow(dead_code)]

use print_jobs::catalog::Catalog;
use print_jobs::model::{Address, EditionType, Lang, Order, OrderItem, ShippingLevel};
use print_jobs::payload::PayloadSettings;
use std::sync::Arc;

pub const EDITIONS: &str = r#"[
    {
        "lang": "en",
        "documents": [
            {
                "id": "journal",
                "title": "Journal of George Fox",
                "editions": [
                    { "type": "updated", "path": "en/george-fox/journal/updated", "filename_stem": "Journal_of_George_Fox--updated" }
                ]
            },
            {
                "id": "no-cross-no-crown",
                "title": "No Cross, No Crown",
                "editions": [
                    { "type": "modernized", "path": "en/william-penn/no-cross-no-crown/modernized", "filename_stem": "No_Cross_No_Crown--modernized" }
                ]
            }
        ]
    }
]"#;

pub const META: &str = r#"{
    "en/george-fox/journal/updated": { "paperback": { "size": "m", "volumes": [242, 256] } },
    "en/william-penn/no-cross-no-crown/modernized": { "paperback": { "size": "s", "volumes": [188] } }
}"#;

pub fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_json_str(EDITIONS, META).unwrap())
}

pub fn settings() -> PayloadSettings {
    PayloadSettings {
        asset_base_url: "https://assets.example.org".into(),
        contact_email: "orders@example.org".into(),
    }
}

pub fn address(country: &str) -> Address {
    Address {
        name: "Ann Austin".into(),
        street: "12 Meeting House Ln".into(),
        street2: None,
        city: "Salem".into(),
        state: "OR".into(),
        zip: "97301".into(),
        country: country.into(),
    }
}

pub fn penn_item() -> OrderItem {
    OrderItem {
        document_id: "no-cross-no-crown".into(),
        edition_type: EditionType::Modernized,
        lang: Lang::En,
        quantity: 2,
    }
}

pub fn journal_item() -> OrderItem {
    OrderItem {
        document_id: "journal".into(),
        edition_type: EditionType::Updated,
        lang: Lang::En,
        quantity: 1,
    }
}

pub fn presubmit_order(id: &str) -> Order {
    Order::presubmit(id, address("US"), vec![penn_item()], ShippingLevel::Mail)
}
