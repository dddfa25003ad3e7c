// File: giftlink-common/src/traits/mod.rs
pub mod lookup_traits;
pub mod repository_traits;
