// File: giftlink-core/src/lookup/client.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use giftlink_common::error::Error;
use giftlink_common::models::address::{AddressSuggestion, PlaceDetails};
use giftlink_common::traits::lookup_traits::AddressLookup;

/// Client for the hosted address-autocomplete API. Two endpoints:
/// `GET /suggest?q=...` for typeahead and `GET /place/{id}` to resolve a
/// suggestion into discrete postal fields.
pub struct HostedAddressClient {
    base_url: Url,
    api_token: String,
    http_client: Client,
}

/// JSON shape for one `GET /suggest` hit.
#[derive(Debug, Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
struct SuggestionJson {
    id: String,
    label: String,
}

impl Default for SuggestionJson {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
        }
    }
}

/// JSON shape for `GET /place/{id}`. Field names follow the provider's
/// address vocabulary, not ours.
#[derive(Debug, Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
struct PlaceJson {
    id: String,
    label: String,
    address1: Option<String>,
    city: Option<String>,
    province: Option<String>,
    zip: Option<String>,
    country: Option<String>,
}

impl Default for PlaceJson {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            address1: None,
            city: None,
            province: None,
            zip: None,
            country: None,
        }
    }
}

impl HostedAddressClient {
    pub fn new(base_url: &str, api_token: &str) -> Result<Self, Error> {
        let client = reqwest::ClientBuilder::new()
            .user_agent("GiftLink/1.0")
            .build()
            .map_err(|e| Error::Lookup(format!("Failed to build reqwest client: {e}")))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Lookup(format!("Bad address API base url: {e}")))?;

        Ok(Self {
            base_url,
            api_token: api_token.to_string(),
            http_client: client,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::Lookup("Address API base url cannot be a base".to_string()))?;
            path.pop_if_empty();
            for seg in segments {
                path.push(seg);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl AddressLookup for HostedAddressClient {
    async fn search_addresses(&self, query: &str) -> Result<Vec<AddressSuggestion>, Error> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let mut url = self.endpoint(&["suggest"])?;
        url.query_pairs_mut()
            .append_pair("q", trimmed)
            .append_pair("key", &self.api_token);

        let resp = self.http_client.get(url).send().await?;
        if !resp.status().is_success() {
            let st = resp.status();
            let txt = resp.text().await.unwrap_or_default();
            return Err(Error::Lookup(format!(
                "Address suggest failed: HTTP {st} => {txt}"
            )));
        }

        let parsed: Vec<SuggestionJson> = resp
            .json()
            .await
            .map_err(|e| Error::Lookup(format!("Parsing suggestion list => {e}")))?;

        Ok(parsed
            .into_iter()
            .filter(|s| !s.id.is_empty())
            .map(|s| AddressSuggestion {
                id: s.id,
                label: s.label,
            })
            .collect())
    }

    async fn get_place_details(&self, id: &str) -> Result<PlaceDetails, Error> {
        let mut url = self.endpoint(&["place", id])?;
        url.query_pairs_mut().append_pair("key", &self.api_token);

        let resp = self.http_client.get(url).send().await?;
        if !resp.status().is_success() {
            let st = resp.status();
            let txt = resp.text().await.unwrap_or_default();
            return Err(Error::Lookup(format!(
                "Address place lookup failed: HTTP {st} => {txt}"
            )));
        }

        let parsed: PlaceJson = resp
            .json()
            .await
            .map_err(|e| Error::Lookup(format!("Parsing place details => {e}")))?;

        Ok(PlaceDetails {
            id: parsed.id,
            label: parsed.label,
            line1: parsed.address1.unwrap_or_default(),
            city: parsed.city.unwrap_or_default(),
            region: parsed.province.unwrap_or_default(),
            postal_code: parsed.zip.unwrap_or_default(),
            country: parsed.country.unwrap_or_default(),
        })
    }
}
