// File: giftlink-common/src/models/mod.rs
pub mod address;
pub mod campaign;
pub mod duplicate;
pub mod order;
pub mod product;

pub use address::{AddressSuggestion, PlaceDetails};
pub use campaign::{
    Campaign, CampaignConfig, CampaignConfigRow, CampaignDraft, CampaignStatus, NormalizedDraft,
    ShippingZone,
};
pub use duplicate::{
    AttemptPayload, DuplicateAttempt, DuplicateDecision, DuplicateMatchPolicy, IdentityProbe,
    MatchScope,
};
pub use order::{Order, OrderFilter, OrderItem, OrderSort, OrderStatus, ShippingAddress, StructuredAddress};
pub use product::Product;
