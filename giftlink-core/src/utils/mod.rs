// File: giftlink-core/src/utils/mod.rs

pub mod slug;
