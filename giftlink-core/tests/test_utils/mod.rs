// File: giftlink-core/tests/test_utils/mod.rs
//
// In-memory stand-ins for the Postgres repositories, plus the fixtures
// the service tests share. Same trait surface, mutex-held maps, no
// database required.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use giftlink_common::error::Error;
use giftlink_common::models::campaign::{Campaign, CampaignConfig, CampaignStatus};
use giftlink_common::models::duplicate::{
    AttemptPayload, DuplicateAttempt, DuplicateDecision, DuplicateMatchPolicy, IdentityProbe,
    MatchScope,
};
use giftlink_common::models::order::{
    Order, OrderFilter, OrderItem, OrderSort, OrderStatus, ShippingAddress,
};
use giftlink_common::traits::repository_traits::{
    CampaignRepository, DuplicateAttemptRepository, OrderRepository,
};
use giftlink_core::catalog;
use giftlink_core::claim::ClaimSubmission;

#[derive(Default)]
pub struct MemoryCampaignRepo {
    campaigns: Mutex<HashMap<Uuid, Campaign>>,
    /// How many `slug_exists` calls report a collision before the slug
    /// comes back free. Lets tests force the publisher to re-roll.
    pub forced_collisions: AtomicUsize,
    pub slug_checks: AtomicUsize,
}

impl MemoryCampaignRepo {
    pub fn with_campaign(campaign: Campaign) -> Self {
        let repo = Self::default();
        repo.insert(campaign);
        repo
    }

    pub fn insert(&self, campaign: Campaign) {
        self.campaigns
            .lock()
            .unwrap()
            .insert(campaign.campaign_id, campaign);
    }

    pub fn campaign_count(&self) -> usize {
        self.campaigns.lock().unwrap().len()
    }
}

#[async_trait]
impl CampaignRepository for MemoryCampaignRepo {
    async fn create_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
        self.campaigns
            .lock()
            .unwrap()
            .insert(campaign.campaign_id, campaign.clone());
        Ok(())
    }

    async fn get_campaign(&self, campaign_id: Uuid) -> Result<Option<Campaign>, Error> {
        Ok(self.campaigns.lock().unwrap().get(&campaign_id).cloned())
    }

    async fn get_campaign_by_slug(&self, slug: &str) -> Result<Option<Campaign>, Error> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .values()
            .find(|c| c.slug == slug && c.status != CampaignStatus::Archived)
            .cloned())
    }

    async fn list_campaigns(&self, include_archived: bool) -> Result<Vec<Campaign>, Error> {
        let mut list: Vec<Campaign> = self
            .campaigns
            .lock()
            .unwrap()
            .values()
            .filter(|c| include_archived || c.status != CampaignStatus::Archived)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn archive_campaign(&self, campaign_id: Uuid) -> Result<(), Error> {
        // Like the SQL UPDATE, a missing row is a silent no-op.
        if let Some(c) = self.campaigns.lock().unwrap().get_mut(&campaign_id) {
            c.status = CampaignStatus::Archived;
        }
        Ok(())
    }

    async fn increment_claims(&self, campaign_id: Uuid) -> Result<(), Error> {
        if let Some(c) = self.campaigns.lock().unwrap().get_mut(&campaign_id) {
            c.claims += 1;
        }
        Ok(())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, Error> {
        self.slug_checks.fetch_add(1, Ordering::SeqCst);
        if self.forced_collisions.load(Ordering::SeqCst) > 0 {
            self.forced_collisions.fetch_sub(1, Ordering::SeqCst);
            return Ok(true);
        }
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .values()
            .any(|c| c.slug == slug))
    }
}

#[derive(Default)]
pub struct MemoryOrderRepo {
    orders: Mutex<Vec<Order>>,
}

impl MemoryOrderRepo {
    pub fn seed(&self, order: Order) {
        self.orders.lock().unwrap().push(order);
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn all_orders(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepo {
    async fn create_order(&self, order: &Order) -> Result<(), Error> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, Error> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned())
    }

    async fn list_orders(
        &self,
        filter: &OrderFilter,
        sort: OrderSort,
        limit: i64,
    ) -> Result<Vec<Order>, Error> {
        let mut list: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| {
                filter.campaign_id.is_none_or(|id| o.campaign_id == id)
                    && filter.status.is_none_or(|s| o.status == s)
            })
            .cloned()
            .collect();
        match sort {
            OrderSort::Newest => list.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            OrderSort::Oldest => list.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            OrderSort::HighestValue => list.sort_by(|a, b| b.value().total_cmp(&a.value())),
            OrderSort::Email => {
                list.sort_by(|a, b| a.email.to_lowercase().cmp(&b.email.to_lowercase()))
            }
        }
        list.truncate(limit.max(0) as usize);
        Ok(list)
    }

    async fn find_identity_match(
        &self,
        campaign_id: Uuid,
        probe: &IdentityProbe,
        policy: &DuplicateMatchPolicy,
    ) -> Result<Option<Uuid>, Error> {
        if probe.is_empty() {
            return Ok(None);
        }
        let fold = |s: &str| {
            if policy.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let hits = |candidate: Option<&str>, probed: &str| {
            !probed.is_empty() && candidate.is_some_and(|c| fold(c) == fold(probed))
        };
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| {
                if policy.scope == MatchScope::PerCampaign && o.campaign_id != campaign_id {
                    return false;
                }
                hits(Some(&o.email), &probe.email)
                    || hits(o.phone.as_deref(), &probe.phone)
                    || hits(o.instagram.as_deref(), &probe.instagram)
                    || hits(o.tiktok.as_deref(), &probe.tiktok)
            })
            .map(|o| o.order_id))
    }
}

#[derive(Default)]
pub struct MemoryDuplicateRepo {
    attempts: Mutex<HashMap<Uuid, DuplicateAttempt>>,
}

impl MemoryDuplicateRepo {
    pub fn seed(&self, attempt: DuplicateAttempt) {
        self.attempts
            .lock()
            .unwrap()
            .insert(attempt.attempt_id, attempt);
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl DuplicateAttemptRepository for MemoryDuplicateRepo {
    async fn create_attempt(&self, attempt: &DuplicateAttempt) -> Result<(), Error> {
        self.attempts
            .lock()
            .unwrap()
            .insert(attempt.attempt_id, attempt.clone());
        Ok(())
    }

    async fn get_attempt(&self, attempt_id: Uuid) -> Result<Option<DuplicateAttempt>, Error> {
        Ok(self.attempts.lock().unwrap().get(&attempt_id).cloned())
    }

    async fn list_attempts(&self, limit: i64) -> Result<Vec<DuplicateAttempt>, Error> {
        let mut list: Vec<DuplicateAttempt> =
            self.attempts.lock().unwrap().values().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list.truncate(limit.max(0) as usize);
        Ok(list)
    }

    async fn set_decision(
        &self,
        attempt_id: Uuid,
        decision: DuplicateDecision,
    ) -> Result<(), Error> {
        match self.attempts.lock().unwrap().get_mut(&attempt_id) {
            Some(a) => {
                a.decision = decision;
                Ok(())
            }
            None => Err(Error::NotFound(format!(
                "Duplicate attempt '{}'",
                attempt_id
            ))),
        }
    }

    async fn delete_attempt(&self, attempt_id: Uuid) -> Result<(), Error> {
        self.attempts.lock().unwrap().remove(&attempt_id);
        Ok(())
    }
}

pub fn campaign_with_config(name: &str, config: CampaignConfig) -> Campaign {
    Campaign {
        campaign_id: Uuid::new_v4(),
        name: name.to_string(),
        slug: format!("{}-t3st", name.to_lowercase().replace(' ', "-")),
        welcome_message: "You've been selected for a free gift!".to_string(),
        brand_color: "#111827".to_string(),
        brand_logo: None,
        config,
        status: CampaignStatus::Active,
        claims: 0,
        created_at: Utc::now(),
    }
}

/// Two-gift campaign over the first three catalog products, everything
/// else at defaults.
pub fn test_campaign(name: &str) -> Campaign {
    campaign_with_config(
        name,
        CampaignConfig {
            selected_product_ids: vec!["p1".to_string(), "p2".to_string(), "p3".to_string()],
            item_limit: 2,
            ..CampaignConfig::default()
        },
    )
}

pub fn catalog_item(id: &str) -> OrderItem {
    let product = catalog::product_by_id(id).expect("unknown catalog id in fixture");
    OrderItem {
        id: product.id.clone(),
        title: product.title.clone(),
        price: product.price,
        image: product.image.clone(),
    }
}

pub fn filled_submission() -> ClaimSubmission {
    ClaimSubmission {
        first_name: "Mia".to_string(),
        last_name: "Chen".to_string(),
        email: "mia@example.com".to_string(),
        shipping_address: ShippingAddress::Raw("12 Beale St, Memphis, TN 38103".to_string()),
        items: vec![catalog_item("p1")],
        ..ClaimSubmission::default()
    }
}

pub fn seeded_order(campaign_id: Uuid, email: &str) -> Order {
    Order {
        order_id: Uuid::new_v4(),
        campaign_id,
        campaign_name: String::new(),
        created_at: Utc::now(),
        email: email.to_string(),
        name: "Prior Claimer".to_string(),
        phone: None,
        instagram: None,
        tiktok: None,
        shipping_address: ShippingAddress::Raw("1 Main St".to_string()),
        items: vec![catalog_item("p2")],
        status: OrderStatus::Pending,
        terms_consent: true,
        second_consent: false,
        marketing_opt_in: false,
        custom_answer: None,
    }
}

pub fn pending_attempt(campaign: &Campaign, payload: AttemptPayload) -> DuplicateAttempt {
    DuplicateAttempt {
        attempt_id: Uuid::new_v4(),
        campaign_id: campaign.campaign_id,
        campaign_name: campaign.name.clone(),
        payload,
        decision: DuplicateDecision::Pending,
        reason: DuplicateAttempt::DEFAULT_REASON.to_string(),
        created_at: Utc::now(),
    }
}
