// File: giftlink-common/src/models/product.rs

use serde::{Deserialize, Serialize};

/// Static catalog entry. Read-only reference data sourced from the
/// external catalog; never created, mutated, or destroyed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub image: String,
}
