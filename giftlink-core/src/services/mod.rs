// File: giftlink-core/src/services/mod.rs

pub mod campaign_service;
pub mod claim_service;
pub mod duplicate_service;

pub use campaign_service::{CampaignService, ClaimPage, PublishError};
pub use claim_service::{ClaimService, SubmitError, SubmitOutcome};
pub use duplicate_service::DuplicateService;

pub(crate) fn none_if_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
