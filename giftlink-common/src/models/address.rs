// File: giftlink-common/src/models/address.rs

use serde::{Deserialize, Serialize};

/// One autocomplete hit for a partial address query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    pub id: String,
    pub label: String,
}

/// A suggestion resolved into discrete postal fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlaceDetails {
    pub id: String,
    pub label: String,
    pub line1: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}
