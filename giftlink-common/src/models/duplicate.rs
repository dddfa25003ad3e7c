// File: giftlink-common/src/models/duplicate.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::order::{OrderItem, ShippingAddress};

/// Advisory triage tag on a quarantined attempt. Stored inside the JSON
/// payload, not in its own column, so it survives schema drift with the
/// rest of the attempt.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateDecision {
    Pending,
    Accepted,
    Declined,
}

impl Default for DuplicateDecision {
    fn default() -> Self {
        DuplicateDecision::Pending
    }
}

impl fmt::Display for DuplicateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateDecision::Pending => write!(f, "pending"),
            DuplicateDecision::Accepted => write!(f, "accepted"),
            DuplicateDecision::Declined => write!(f, "declined"),
        }
    }
}

impl FromStr for DuplicateDecision {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(DuplicateDecision::Pending),
            "accepted" => Ok(DuplicateDecision::Accepted),
            "declined" => Ok(DuplicateDecision::Declined),
            _ => Err(format!("Unknown duplicate decision: {}", s)),
        }
    }
}

/// The full order payload as attempted, preserved verbatim so an accepted
/// attempt can be promoted into a real order. Every field defaults so that
/// older payload shapes (combined `name`, absent consents) still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AttemptPayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Legacy combined form; split on whitespace when the first/last pair
    /// is absent.
    pub name: String,
    pub phone: String,
    pub instagram: String,
    pub tiktok: String,
    pub address: String,
    pub shipping_details: Option<ShippingAddress>,
    pub items: Vec<OrderItem>,
    pub consent_primary: Option<bool>,
    pub consent_secondary: Option<bool>,
    pub marketing_opt_in: Option<bool>,
    pub custom_answer: Option<String>,
}

impl AttemptPayload {
    /// First/last name for order reconstruction: prefer the split pair,
    /// fall back to splitting the combined name on whitespace.
    pub fn split_name(&self) -> (String, String) {
        if !self.first_name.is_empty() || !self.last_name.is_empty() {
            return (self.first_name.clone(), self.last_name.clone());
        }
        let mut parts = self.name.split_whitespace();
        let first = parts.next().unwrap_or("").to_string();
        let last = parts.collect::<Vec<_>>().join(" ");
        (first, last)
    }

    pub fn shipping_address(&self) -> ShippingAddress {
        self.shipping_details
            .clone()
            .unwrap_or_else(|| ShippingAddress::Raw(self.address.clone()))
    }
}

/// A claim intercepted by duplicate detection, owned by the admin review
/// workflow. Resolution deletes the row; the influencer never sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateAttempt {
    pub attempt_id: Uuid,
    pub campaign_id: Uuid,
    /// Read-side decoration from the campaigns join; never written back.
    #[serde(default)]
    pub campaign_name: String,
    pub payload: AttemptPayload,
    pub decision: DuplicateDecision,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl DuplicateAttempt {
    pub const DEFAULT_REASON: &'static str = "Duplicate Attempt";
}

/// The identity fields a new submission is probed against. Empty fields
/// are skipped; matching is a logical OR across the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityProbe {
    pub email: String,
    pub phone: String,
    pub instagram: String,
    pub tiktok: String,
}

impl IdentityProbe {
    pub fn is_empty(&self) -> bool {
        self.email.is_empty()
            && self.phone.is_empty()
            && self.instagram.is_empty()
            && self.tiktok.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScope {
    PerCampaign,
    AcrossCampaigns,
}

/// How duplicate matching compares identity fields. Case folding and
/// cross-campaign scope are deployment choices, so they live here as
/// explicit configuration rather than inside the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateMatchPolicy {
    pub case_insensitive: bool,
    pub scope: MatchScope,
}

impl Default for DuplicateMatchPolicy {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            scope: MatchScope::PerCampaign,
        }
    }
}
