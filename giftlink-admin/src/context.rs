// File: giftlink-admin/src/context.rs

use std::sync::Arc;

use giftlink_common::error::Error;
use giftlink_common::traits::repository_traits::{
    CampaignRepository, DuplicateAttemptRepository, OrderRepository,
};
use giftlink_core::db::Database;
use giftlink_core::repositories::postgres::{
    PostgresCampaignRepository, PostgresDuplicateAttemptRepository, PostgresOrderRepository,
};
use giftlink_core::services::{CampaignService, DuplicateService};

/// Everything a command handler needs, wired once per invocation.
pub struct AdminContext {
    pub db: Database,
    pub orders: Arc<dyn OrderRepository>,
    pub campaigns: CampaignService,
    pub duplicates: DuplicateService,
}

impl AdminContext {
    pub async fn connect(db_url: &str) -> Result<Self, Error> {
        let db = Database::new(db_url).await?;

        let campaign_repo: Arc<dyn CampaignRepository> =
            Arc::new(PostgresCampaignRepository::new(db.pool().clone()));
        let order_repo: Arc<dyn OrderRepository> =
            Arc::new(PostgresOrderRepository::new(db.pool().clone()));
        let attempt_repo: Arc<dyn DuplicateAttemptRepository> =
            Arc::new(PostgresDuplicateAttemptRepository::new(db.pool().clone()));

        let campaigns = CampaignService::new(campaign_repo.clone());
        let duplicates =
            DuplicateService::new(campaign_repo, order_repo.clone(), attempt_repo);

        Ok(Self {
            db,
            orders: order_repo,
            campaigns,
            duplicates,
        })
    }
}
