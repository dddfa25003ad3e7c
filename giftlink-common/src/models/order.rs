// File: giftlink-common/src/models/order.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mutated only by the out-of-scope fulfillment process, never by the
/// influencer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Fulfilled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Fulfilled => write!(f, "fulfilled"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "fulfilled" => Ok(OrderStatus::Fulfilled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(OrderStatus::Pending)
    }
}

/// One catalog item as claimed, carrying the list price at claim time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderItem {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub image: String,
}

/// Shipping destination: either a structured address resolved through the
/// lookup service, or whatever free text the influencer typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShippingAddress {
    Structured(StructuredAddress),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StructuredAddress {
    pub label: String,
    pub line1: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// The shipping_address column is TEXT; structured addresses are
    /// serialized into it as JSON, raw entries stay as-is.
    pub fn to_storage(&self) -> String {
        match self {
            ShippingAddress::Raw(text) => text.clone(),
            ShippingAddress::Structured(addr) => {
                serde_json::to_string(addr).unwrap_or_else(|_| addr.label.clone())
            }
        }
    }

    /// Inverse of [`to_storage`](Self::to_storage): anything that does not
    /// parse as a structured address is treated as raw text.
    pub fn from_storage(raw: &str) -> Self {
        match serde_json::from_str::<StructuredAddress>(raw) {
            Ok(addr) => ShippingAddress::Structured(addr),
            Err(_) => ShippingAddress::Raw(raw.to_string()),
        }
    }

    pub fn country(&self) -> Option<&str> {
        match self {
            ShippingAddress::Structured(addr) if !addr.country.is_empty() => Some(&addr.country),
            _ => None,
        }
    }
}

impl Default for ShippingAddress {
    fn default() -> Self {
        ShippingAddress::Raw(String::new())
    }
}

impl fmt::Display for ShippingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShippingAddress::Raw(text) => write!(f, "{}", text),
            ShippingAddress::Structured(addr) if !addr.label.is_empty() => {
                write!(f, "{}", addr.label)
            }
            ShippingAddress::Structured(addr) => {
                write!(f, "{}, {} {}, {}", addr.line1, addr.city, addr.postal_code, addr.country)
            }
        }
    }
}

/// One successful claim. Contact fields are populated only when the owning
/// campaign's config enabled them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: Uuid,
    pub campaign_id: Uuid,
    /// Read-side decoration from the campaigns join; never written back.
    #[serde(default)]
    pub campaign_name: String,
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub tiktok: Option<String>,
    pub shipping_address: ShippingAddress,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub terms_consent: bool,
    pub second_consent: bool,
    pub marketing_opt_in: bool,
    pub custom_answer: Option<String>,
}

impl Order {
    /// Order value is never stored; it is derived by summing item prices.
    /// Plain f64 addition, so repeated reads of the same row agree.
    pub fn value(&self) -> f64 {
        self.items.iter().map(|item| item.price).sum()
    }
}

/// Equality filters for the admin order list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub campaign_id: Option<Uuid>,
    pub status: Option<OrderStatus>,
}

/// Sort order for the admin order list. `created_at` sorts happen in SQL;
/// value is derived on read and email is a tiebreak nicety, so those two
/// sort the fetched page client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSort {
    Newest,
    Oldest,
    HighestValue,
    Email,
}

impl Default for OrderSort {
    fn default() -> Self {
        OrderSort::Newest
    }
}

impl FromStr for OrderSort {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(OrderSort::Newest),
            "oldest" => Ok(OrderSort::Oldest),
            "value" => Ok(OrderSort::HighestValue),
            "email" => Ok(OrderSort::Email),
            _ => Err(format!("Unknown order sort: {}", s)),
        }
    }
}
