use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::models::campaign::Campaign;
use crate::models::duplicate::{DuplicateAttempt, DuplicateDecision, DuplicateMatchPolicy, IdentityProbe};
use crate::models::order::{Order, OrderFilter, OrderSort};

/// Campaign persistence. Reads return application-shaped campaigns with
/// row defaults already applied; archiving is a status flip, never a
/// physical delete.
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn create_campaign(&self, campaign: &Campaign) -> Result<(), Error>;

    async fn get_campaign(&self, campaign_id: Uuid) -> Result<Option<Campaign>, Error>;

    /// Public claim-link lookup. Archived campaigns never resolve here,
    /// even when the slug matches.
    async fn get_campaign_by_slug(&self, slug: &str) -> Result<Option<Campaign>, Error>;

    /// Admin listing, newest first.
    async fn list_campaigns(&self, include_archived: bool) -> Result<Vec<Campaign>, Error>;

    async fn archive_campaign(&self, campaign_id: Uuid) -> Result<(), Error>;

    /// Bumps the monotonically non-decreasing claim counter by one.
    async fn increment_claims(&self, campaign_id: Uuid) -> Result<(), Error>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, Error>;
}

/// Order persistence. Value is derived on read, never stored.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create_order(&self, order: &Order) -> Result<(), Error>;

    async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, Error>;

    async fn list_orders(
        &self,
        filter: &OrderFilter,
        sort: OrderSort,
        limit: i64,
    ) -> Result<Vec<Order>, Error>;

    /// Duplicate detection probe: does any prior order share at least one
    /// non-empty identity field? Returns the first matching order id.
    async fn find_identity_match(
        &self,
        campaign_id: Uuid,
        probe: &IdentityProbe,
        policy: &DuplicateMatchPolicy,
    ) -> Result<Option<Uuid>, Error>;
}

/// Quarantined-attempt persistence. Unlike campaigns, resolution deletes
/// rows physically.
#[async_trait]
pub trait DuplicateAttemptRepository: Send + Sync {
    async fn create_attempt(&self, attempt: &DuplicateAttempt) -> Result<(), Error>;

    async fn get_attempt(&self, attempt_id: Uuid) -> Result<Option<DuplicateAttempt>, Error>;

    /// Newest first.
    async fn list_attempts(&self, limit: i64) -> Result<Vec<DuplicateAttempt>, Error>;

    /// Rewrites only the advisory decision tag embedded in the stored
    /// payload; the attempt itself stays unresolved.
    async fn set_decision(&self, attempt_id: Uuid, decision: DuplicateDecision) -> Result<(), Error>;

    async fn delete_attempt(&self, attempt_id: Uuid) -> Result<(), Error>;
}
