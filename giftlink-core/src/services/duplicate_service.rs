// File: giftlink-core/src/services/duplicate_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use giftlink_common::error::Error;
use giftlink_common::models::duplicate::{DuplicateAttempt, DuplicateDecision};
use giftlink_common::models::order::{Order, OrderStatus};
use giftlink_common::traits::repository_traits::{
    CampaignRepository, DuplicateAttemptRepository, OrderRepository,
};

use crate::services::none_if_empty;

/// Admin-side resolution of quarantined claims. Accepting promotes the
/// stored payload into a real order; declining just drops the attempt.
pub struct DuplicateService {
    campaign_repo: Arc<dyn CampaignRepository>,
    order_repo: Arc<dyn OrderRepository>,
    attempt_repo: Arc<dyn DuplicateAttemptRepository>,
}

impl DuplicateService {
    pub fn new(
        campaign_repo: Arc<dyn CampaignRepository>,
        order_repo: Arc<dyn OrderRepository>,
        attempt_repo: Arc<dyn DuplicateAttemptRepository>,
    ) -> Self {
        Self {
            campaign_repo,
            order_repo,
            attempt_repo,
        }
    }

    pub async fn list(&self, limit: i64) -> Result<Vec<DuplicateAttempt>, Error> {
        self.attempt_repo.list_attempts(limit).await
    }

    /// Triage tag only; the attempt stays in the queue until a final
    /// accept or decline.
    pub async fn set_decision(
        &self,
        attempt_id: Uuid,
        decision: DuplicateDecision,
    ) -> Result<(), Error> {
        self.attempt_repo.set_decision(attempt_id, decision).await
    }

    /// Promote an attempt into a real order and remove it from the queue.
    /// The campaign is verified first: if it vanished, nothing at all is
    /// written.
    pub async fn accept(&self, attempt_id: Uuid) -> Result<Order, Error> {
        let attempt = self
            .attempt_repo
            .get_attempt(attempt_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Duplicate attempt '{}'", attempt_id)))?;

        let campaign = self
            .campaign_repo
            .get_campaign(attempt.campaign_id)
            .await?
            .ok_or_else(|| {
                Error::Integrity(format!(
                    "Campaign {} referenced by attempt {} no longer exists",
                    attempt.campaign_id, attempt_id
                ))
            })?;

        let payload = &attempt.payload;
        let (first, last) = payload.split_name();
        let name = format!("{} {}", first, last).trim().to_string();

        let order = Order {
            order_id: Uuid::new_v4(),
            campaign_id: campaign.campaign_id,
            campaign_name: campaign.name.clone(),
            created_at: Utc::now(),
            email: payload.email.clone(),
            name,
            phone: none_if_empty(&payload.phone),
            instagram: none_if_empty(&payload.instagram),
            tiktok: none_if_empty(&payload.tiktok),
            shipping_address: payload.shipping_address(),
            items: payload.items.clone(),
            status: OrderStatus::Pending,
            // Unrecorded consent on an accepted attempt reads as granted
            // for the primary consent and withheld for everything else.
            terms_consent: payload.consent_primary.unwrap_or(true),
            second_consent: payload.consent_secondary.unwrap_or(false),
            marketing_opt_in: payload.marketing_opt_in.unwrap_or(false),
            custom_answer: payload
                .custom_answer
                .as_deref()
                .and_then(none_if_empty),
        };

        self.order_repo.create_order(&order).await?;
        self.campaign_repo
            .increment_claims(campaign.campaign_id)
            .await?;
        self.attempt_repo.delete_attempt(attempt_id).await?;

        info!(
            "Accepted duplicate attempt {} into order {} on campaign '{}'",
            attempt_id, order.order_id, campaign.name
        );
        Ok(order)
    }

    /// Drop the attempt with no other side effect.
    pub async fn decline(&self, attempt_id: Uuid) -> Result<(), Error> {
        self.attempt_repo.delete_attempt(attempt_id).await?;
        info!("Declined duplicate attempt {}", attempt_id);
        Ok(())
    }
}
