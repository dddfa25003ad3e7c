// File: giftlink-core/src/services/claim_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use giftlink_common::error::{Error, ValidationReport};
use giftlink_common::models::campaign::CampaignStatus;
use giftlink_common::models::duplicate::{
    DuplicateAttempt, DuplicateDecision, DuplicateMatchPolicy,
};
use giftlink_common::models::order::{Order, OrderStatus};
use giftlink_common::traits::repository_traits::{
    CampaignRepository, DuplicateAttemptRepository, OrderRepository,
};

use crate::claim::validate::submit_check;
use crate::claim::ClaimSubmission;
use crate::services::none_if_empty;

/// What became of an accepted submit. Both variants render as success to
/// the influencer; quarantine is visible only to admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { order_id: Uuid },
    Quarantined { attempt_id: Uuid },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Submission was rejected: {0}")]
    Rejected(ValidationReport),
    #[error("This campaign is no longer accepting claims.")]
    CampaignClosed,
    #[error(transparent)]
    Backend(#[from] Error),
}

/// Claim intake: the server-side half of a submit. Re-runs the full
/// validation gate, enforces the per-link order cap, applies duplicate
/// interception, then persists.
pub struct ClaimService {
    campaign_repo: Arc<dyn CampaignRepository>,
    order_repo: Arc<dyn OrderRepository>,
    attempt_repo: Arc<dyn DuplicateAttemptRepository>,
    match_policy: DuplicateMatchPolicy,
}

impl ClaimService {
    pub fn new(
        campaign_repo: Arc<dyn CampaignRepository>,
        order_repo: Arc<dyn OrderRepository>,
        attempt_repo: Arc<dyn DuplicateAttemptRepository>,
    ) -> Self {
        Self {
            campaign_repo,
            order_repo,
            attempt_repo,
            match_policy: DuplicateMatchPolicy::default(),
        }
    }

    pub fn with_match_policy(mut self, policy: DuplicateMatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    pub async fn submit(
        &self,
        campaign_id: Uuid,
        submission: &ClaimSubmission,
    ) -> Result<SubmitOutcome, SubmitError> {
        // Work from a fresh row: the form's copy of the campaign may have
        // a stale claim counter or status.
        let campaign = self
            .campaign_repo
            .get_campaign(campaign_id)
            .await?
            .ok_or_else(|| {
                SubmitError::Backend(Error::NotFound(format!("Campaign '{}'", campaign_id)))
            })?;

        if campaign.status == CampaignStatus::Archived {
            return Err(SubmitError::CampaignClosed);
        }
        if let Some(limit) = campaign.config.order_limit_per_link {
            if campaign.claims >= limit as i32 {
                return Err(SubmitError::CampaignClosed);
            }
        }

        submit_check(&campaign.config, submission)
            .into_result()
            .map_err(SubmitError::Rejected)?;

        let probe = submission.identity_probe();
        let matched = self
            .order_repo
            .find_identity_match(campaign.campaign_id, &probe, &self.match_policy)
            .await?;

        if let Some(existing) = matched {
            if campaign.config.block_duplicate_orders {
                let attempt = DuplicateAttempt {
                    attempt_id: Uuid::new_v4(),
                    campaign_id: campaign.campaign_id,
                    campaign_name: campaign.name.clone(),
                    payload: submission.to_attempt_payload(),
                    decision: DuplicateDecision::Pending,
                    reason: DuplicateAttempt::DEFAULT_REASON.to_string(),
                    created_at: Utc::now(),
                };
                self.attempt_repo.create_attempt(&attempt).await?;
                info!(
                    "Quarantined duplicate claim for campaign '{}' (matches order {})",
                    campaign.name, existing
                );
                return Ok(SubmitOutcome::Quarantined {
                    attempt_id: attempt.attempt_id,
                });
            }
            // Blocking is off: record the fact and let the order through.
            info!(
                "Identity match with order {} on campaign '{}' (duplicate blocking disabled)",
                existing, campaign.name
            );
        }

        let order = Order {
            order_id: Uuid::new_v4(),
            campaign_id: campaign.campaign_id,
            campaign_name: campaign.name.clone(),
            created_at: Utc::now(),
            email: submission.email.clone(),
            name: submission.combined_name(),
            phone: none_if_empty(&submission.phone),
            instagram: none_if_empty(&submission.instagram),
            tiktok: none_if_empty(&submission.tiktok),
            shipping_address: submission.shipping_address.clone(),
            items: submission.items.clone(),
            status: OrderStatus::Pending,
            terms_consent: submission.consent_primary,
            second_consent: submission.consent_secondary,
            marketing_opt_in: submission.marketing_opt_in,
            custom_answer: none_if_empty(&submission.custom_answer),
        };
        self.order_repo.create_order(&order).await?;
        self.campaign_repo
            .increment_claims(campaign.campaign_id)
            .await?;

        info!(
            "Created order {} for campaign '{}'",
            order.order_id, campaign.name
        );
        Ok(SubmitOutcome::Accepted {
            order_id: order.order_id,
        })
    }
}
