// File: giftlink-core/src/services/campaign_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use giftlink_common::error::{Error, ValidationReport};
use giftlink_common::models::campaign::{Campaign, CampaignDraft, CampaignStatus};
use giftlink_common::models::product::Product;
use giftlink_common::traits::repository_traits::CampaignRepository;

use crate::catalog;
use crate::utils::slug::generate_slug;

/// How many fresh slugs to roll before giving up. With a 4-char base36
/// tail a second roll is already rare.
const SLUG_ATTEMPTS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Draft is invalid: {0}")]
    Invalid(ValidationReport),
    #[error(transparent)]
    Backend(#[from] Error),
}

/// Everything the public claim page needs for one slug: the campaign and
/// its catalog subset, already filtered.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimPage {
    pub campaign: Campaign,
    pub products: Vec<Product>,
}

pub struct CampaignService {
    campaign_repo: Arc<dyn CampaignRepository>,
}

impl CampaignService {
    pub fn new(campaign_repo: Arc<dyn CampaignRepository>) -> Self {
        Self { campaign_repo }
    }

    /// Normalize the draft, allocate a unique slug, persist. The returned
    /// campaign is live immediately.
    pub async fn publish(&self, draft: &CampaignDraft) -> Result<Campaign, PublishError> {
        let normalized = draft.normalize().map_err(PublishError::Invalid)?;

        let mut slug = None;
        for _ in 0..SLUG_ATTEMPTS {
            let candidate = generate_slug(&normalized.name);
            if !self.campaign_repo.slug_exists(&candidate).await? {
                slug = Some(candidate);
                break;
            }
        }
        let slug = slug.ok_or_else(|| {
            PublishError::Backend(Error::Integrity(format!(
                "Could not allocate a unique slug for '{}'",
                normalized.name
            )))
        })?;

        let campaign = Campaign {
            campaign_id: Uuid::new_v4(),
            name: normalized.name,
            slug,
            welcome_message: normalized.welcome_message,
            brand_color: normalized.brand_color,
            brand_logo: normalized.brand_logo,
            config: normalized.config,
            status: CampaignStatus::Active,
            claims: 0,
            created_at: Utc::now(),
        };
        self.campaign_repo.create_campaign(&campaign).await?;

        info!(
            "Published campaign '{}' at /c/{}",
            campaign.name, campaign.slug
        );
        Ok(campaign)
    }

    pub async fn get(&self, campaign_id: Uuid) -> Result<Option<Campaign>, Error> {
        self.campaign_repo.get_campaign(campaign_id).await
    }

    pub async fn list(&self, include_archived: bool) -> Result<Vec<Campaign>, Error> {
        self.campaign_repo.list_campaigns(include_archived).await
    }

    /// Soft delete. The claim link stops resolving; orders and history
    /// stay queryable.
    pub async fn archive(&self, campaign_id: Uuid) -> Result<(), Error> {
        self.campaign_repo.archive_campaign(campaign_id).await?;
        info!("Archived campaign {}", campaign_id);
        Ok(())
    }

    /// Resolve a public claim link. `None` covers both unknown and
    /// archived slugs; the page cannot tell them apart on purpose.
    pub async fn load_claim_page(&self, slug: &str) -> Result<Option<ClaimPage>, Error> {
        let Some(campaign) = self.campaign_repo.get_campaign_by_slug(slug).await? else {
            return Ok(None);
        };
        let products = catalog::products_for(&campaign.config.selected_product_ids);
        Ok(Some(ClaimPage { campaign, products }))
    }
}
