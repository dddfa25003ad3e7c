use async_trait::async_trait;

use crate::error::Error;
use crate::models::address::{AddressSuggestion, PlaceDetails};

/// The external geocoding collaborator. Trait-shaped so the claim flow can
/// be exercised against a mock without network access.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Autocomplete a partial free-text address. An empty or whitespace
    /// query returns no suggestions without hitting the service.
    async fn search_addresses(&self, query: &str) -> Result<Vec<AddressSuggestion>, Error>;

    /// Resolve a chosen suggestion into a structured postal address.
    async fn get_place_details(&self, id: &str) -> Result<PlaceDetails, Error>;
}
