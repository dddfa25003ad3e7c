// File: giftlink-core/src/repositories/postgres/mod.rs

pub mod campaigns;
pub mod duplicate_attempts;
pub mod orders;

pub use campaigns::PostgresCampaignRepository;
pub use duplicate_attempts::PostgresDuplicateAttemptRepository;
pub use orders::PostgresOrderRepository;
