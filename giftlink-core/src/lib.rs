// File: giftlink-core/src/lib.rs

pub mod catalog;
pub mod claim;
pub mod db;
pub mod lookup;
pub mod repositories;
pub mod router;
pub mod services;
pub mod test_utils;
pub mod utils;

pub use db::Database;
pub use giftlink_common::error::Error;
