// File: giftlink-core/src/claim/mod.rs

pub mod form;
pub mod sanitize;
pub mod validate;

pub use form::{ClaimForm, ClaimStep};
pub use validate::FormField;

use giftlink_common::models::duplicate::{AttemptPayload, IdentityProbe};
use giftlink_common::models::order::{OrderItem, ShippingAddress};

/// The validated contents of one submit attempt, with disabled fields
/// already stripped. This is what crosses from the form into the intake
/// service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClaimSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub instagram: String,
    pub tiktok: String,
    pub shipping_address: ShippingAddress,
    pub items: Vec<OrderItem>,
    pub consent_primary: bool,
    pub consent_secondary: bool,
    pub marketing_opt_in: bool,
    pub custom_answer: String,
}

impl ClaimSubmission {
    pub fn combined_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn value(&self) -> f64 {
        self.items.iter().map(|item| item.price).sum()
    }

    /// The identity fields duplicate detection compares. Stripped fields
    /// are empty strings, which matching skips.
    pub fn identity_probe(&self) -> IdentityProbe {
        IdentityProbe {
            email: self.email.clone(),
            phone: self.phone.clone(),
            instagram: self.instagram.clone(),
            tiktok: self.tiktok.clone(),
        }
    }

    /// Everything quarantine needs to later reconstruct the order.
    pub fn to_attempt_payload(&self) -> AttemptPayload {
        AttemptPayload {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            name: self.combined_name(),
            phone: self.phone.clone(),
            instagram: self.instagram.clone(),
            tiktok: self.tiktok.clone(),
            address: self.shipping_address.to_string(),
            shipping_details: Some(self.shipping_address.clone()),
            items: self.items.clone(),
            consent_primary: Some(self.consent_primary),
            consent_secondary: Some(self.consent_secondary),
            marketing_opt_in: Some(self.marketing_opt_in),
            custom_answer: if self.custom_answer.trim().is_empty() {
                None
            } else {
                Some(self.custom_answer.trim().to_string())
            },
        }
    }
}
