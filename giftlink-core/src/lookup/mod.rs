// File: giftlink-core/src/lookup/mod.rs

pub mod client;
pub mod debounce;

pub use client::HostedAddressClient;
pub use debounce::SearchDebouncer;
