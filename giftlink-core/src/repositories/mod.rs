// File: giftlink-core/src/repositories/mod.rs

pub mod postgres;

pub use postgres::campaigns::PostgresCampaignRepository;
pub use postgres::duplicate_attempts::PostgresDuplicateAttemptRepository;
pub use postgres::orders::PostgresOrderRepository;
