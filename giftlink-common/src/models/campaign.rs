// File: giftlink-common/src/models/campaign.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationReport;

/// Campaign lifecycle. Archiving is a soft delete: the row is never
/// physically removed, it just stops resolving through the public slug
/// lookup.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Archived,
}

impl Default for CampaignStatus {
    fn default() -> Self {
        CampaignStatus::Active
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignStatus::Active => write!(f, "active"),
            CampaignStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for CampaignStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(CampaignStatus::Active),
            "archived" => Ok(CampaignStatus::Archived),
            _ => Err(format!("Unknown campaign status: {}", s)),
        }
    }
}

impl From<String> for CampaignStatus {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(CampaignStatus::Active)
    }
}

/// Where a campaign is allowed to ship. Stored as plain text with
/// `"worldwide"` as the unrestricted sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingZone {
    Unrestricted,
    Country(String),
}

impl ShippingZone {
    pub const UNRESTRICTED: &'static str = "worldwide";

    pub fn from_storage(s: Option<String>) -> Self {
        match s {
            None => ShippingZone::Unrestricted,
            Some(raw) => {
                let trimmed = raw.trim().to_string();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::UNRESTRICTED) {
                    ShippingZone::Unrestricted
                } else {
                    ShippingZone::Country(trimmed)
                }
            }
        }
    }

    /// Case-insensitive country check; the unrestricted zone admits
    /// everything.
    pub fn allows(&self, country: &str) -> bool {
        match self {
            ShippingZone::Unrestricted => true,
            ShippingZone::Country(allowed) => allowed.trim().eq_ignore_ascii_case(country.trim()),
        }
    }
}

impl Default for ShippingZone {
    fn default() -> Self {
        ShippingZone::Unrestricted
    }
}

impl fmt::Display for ShippingZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShippingZone::Unrestricted => write!(f, "{}", Self::UNRESTRICTED),
            ShippingZone::Country(c) => write!(f, "{}", c),
        }
    }
}

/// The togglable rule set that parameterizes one campaign's claim form.
///
/// Every `show_*` / `ask_*` boolean gates exactly one optional form field:
/// when the flag is off, the field is absent from submitted order data and
/// from required-field validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignConfig {
    // Selection limits.
    pub selected_product_ids: Vec<String>,
    pub item_limit: u32,
    pub order_limit_per_link: Option<u32>,
    pub max_cart_value: Option<f64>,
    pub block_duplicate_orders: bool,

    // Shipping.
    pub shipping_zone: ShippingZone,
    /// Free-text denylist, comma-separated country names.
    pub restricted_countries: String,

    // Contact fields.
    pub show_phone_field: bool,
    pub show_instagram_field: bool,
    pub show_tiktok_field: bool,
    pub ask_custom_question: bool,
    pub custom_question_label: String,
    pub custom_question_required: bool,

    // Consent.
    pub show_consent_checkbox: bool,
    pub terms_consent_text: String,
    pub require_second_consent: bool,
    pub second_consent_text: String,
    pub marketing_opt_in: bool,
    pub marketing_opt_in_text: String,

    // Presentation.
    pub grid_layout: bool,
    pub show_sold_out: bool,
    pub visit_store_url: Option<String>,
    pub visit_store_label: Option<String>,
    pub submit_button_label: Option<String>,
}

/// The one place defaults are defined. Both mapping directions substitute
/// from here, so older stored rows with missing rule columns stay loadable.
impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            selected_product_ids: Vec::new(),
            item_limit: 1,
            order_limit_per_link: None,
            max_cart_value: None,
            block_duplicate_orders: false,
            shipping_zone: ShippingZone::Unrestricted,
            restricted_countries: String::new(),
            show_phone_field: false,
            show_instagram_field: false,
            show_tiktok_field: false,
            ask_custom_question: false,
            custom_question_label: String::new(),
            custom_question_required: false,
            show_consent_checkbox: false,
            terms_consent_text: String::new(),
            require_second_consent: false,
            second_consent_text: String::new(),
            marketing_opt_in: false,
            marketing_opt_in_text: String::new(),
            grid_layout: true,
            show_sold_out: true,
            visit_store_url: None,
            visit_store_label: None,
            submit_button_label: None,
        }
    }
}

/// Storage shape of [`CampaignConfig`]: one `Option` per rule column, named
/// after the column. `None` means the column was NULL (or predates the
/// migration that added it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignConfigRow {
    pub selected_product_ids: Option<Vec<String>>,
    pub item_limit: Option<i32>,
    pub order_limit_per_link: Option<i32>,
    pub max_cart_value: Option<f64>,
    pub block_duplicate_orders: Option<bool>,
    pub shipping_zone: Option<String>,
    pub restricted_countries: Option<String>,
    pub show_phone_field: Option<bool>,
    pub show_instagram_field: Option<bool>,
    pub show_tiktok_field: Option<bool>,
    pub ask_custom_question: Option<bool>,
    pub custom_question_label: Option<String>,
    pub custom_question_required: Option<bool>,
    pub show_consent_checkbox: Option<bool>,
    pub terms_consent_text: Option<String>,
    pub require_second_consent: Option<bool>,
    pub second_consent_text: Option<String>,
    pub marketing_opt_in: Option<bool>,
    pub marketing_opt_in_text: Option<String>,
    pub grid_layout: Option<bool>,
    pub show_sold_out: Option<bool>,
    pub visit_store_url: Option<String>,
    pub visit_store_label: Option<String>,
    pub submit_button_label: Option<String>,
}

impl CampaignConfig {
    /// Flatten every rule to its storage column. The write path always
    /// fills every column, so only historical rows exercise the read-path
    /// defaults.
    pub fn to_row(&self) -> CampaignConfigRow {
        CampaignConfigRow {
            selected_product_ids: Some(self.selected_product_ids.clone()),
            item_limit: Some(self.item_limit as i32),
            order_limit_per_link: self.order_limit_per_link.map(|v| v as i32),
            max_cart_value: self.max_cart_value,
            block_duplicate_orders: Some(self.block_duplicate_orders),
            shipping_zone: Some(self.shipping_zone.to_string()),
            restricted_countries: Some(self.restricted_countries.clone()),
            show_phone_field: Some(self.show_phone_field),
            show_instagram_field: Some(self.show_instagram_field),
            show_tiktok_field: Some(self.show_tiktok_field),
            ask_custom_question: Some(self.ask_custom_question),
            custom_question_label: Some(self.custom_question_label.clone()),
            custom_question_required: Some(self.custom_question_required),
            show_consent_checkbox: Some(self.show_consent_checkbox),
            terms_consent_text: Some(self.terms_consent_text.clone()),
            require_second_consent: Some(self.require_second_consent),
            second_consent_text: Some(self.second_consent_text.clone()),
            marketing_opt_in: Some(self.marketing_opt_in),
            marketing_opt_in_text: Some(self.marketing_opt_in_text.clone()),
            grid_layout: Some(self.grid_layout),
            show_sold_out: Some(self.show_sold_out),
            visit_store_url: self.visit_store_url.clone(),
            visit_store_label: self.visit_store_label.clone(),
            submit_button_label: self.submit_button_label.clone(),
        }
    }

    /// Inverse of [`to_row`](Self::to_row): missing columns fall back to
    /// the [`Default`] values, never to an error.
    pub fn from_row(row: CampaignConfigRow) -> Self {
        let d = CampaignConfig::default();
        Self {
            selected_product_ids: row.selected_product_ids.unwrap_or(d.selected_product_ids),
            item_limit: row
                .item_limit
                .map(|v| v.max(1) as u32)
                .unwrap_or(d.item_limit),
            order_limit_per_link: row.order_limit_per_link.map(|v| v.max(0) as u32),
            max_cart_value: row.max_cart_value,
            block_duplicate_orders: row
                .block_duplicate_orders
                .unwrap_or(d.block_duplicate_orders),
            shipping_zone: ShippingZone::from_storage(row.shipping_zone),
            restricted_countries: row.restricted_countries.unwrap_or(d.restricted_countries),
            show_phone_field: row.show_phone_field.unwrap_or(d.show_phone_field),
            show_instagram_field: row.show_instagram_field.unwrap_or(d.show_instagram_field),
            show_tiktok_field: row.show_tiktok_field.unwrap_or(d.show_tiktok_field),
            ask_custom_question: row.ask_custom_question.unwrap_or(d.ask_custom_question),
            custom_question_label: row.custom_question_label.unwrap_or(d.custom_question_label),
            custom_question_required: row
                .custom_question_required
                .unwrap_or(d.custom_question_required),
            show_consent_checkbox: row.show_consent_checkbox.unwrap_or(d.show_consent_checkbox),
            terms_consent_text: row.terms_consent_text.unwrap_or(d.terms_consent_text),
            require_second_consent: row
                .require_second_consent
                .unwrap_or(d.require_second_consent),
            second_consent_text: row.second_consent_text.unwrap_or(d.second_consent_text),
            marketing_opt_in: row.marketing_opt_in.unwrap_or(d.marketing_opt_in),
            marketing_opt_in_text: row.marketing_opt_in_text.unwrap_or(d.marketing_opt_in_text),
            grid_layout: row.grid_layout.unwrap_or(d.grid_layout),
            show_sold_out: row.show_sold_out.unwrap_or(d.show_sold_out),
            visit_store_url: row.visit_store_url,
            visit_store_label: row.visit_store_label,
            submit_button_label: row.submit_button_label,
        }
    }
}

/// A branded claim link plus the rules behind it. Immutable once created
/// except for the claim counter (monotonically non-decreasing) and the
/// archive flip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub campaign_id: Uuid,
    pub name: String,
    /// Globally unique, URL-safe, derived from the name plus a short
    /// disambiguating suffix.
    pub slug: String,
    pub welcome_message: String,
    pub brand_color: String,
    pub brand_logo: Option<String>,
    pub config: CampaignConfig,
    pub status: CampaignStatus,
    pub claims: i32,
    pub created_at: DateTime<Utc>,
}

/// What the admin builder edits before publishing. The numeric rule inputs
/// are free text exactly as the builder form captures them; normalisation
/// turns them into numbers or `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampaignDraft {
    pub name: String,
    pub welcome_message: String,
    pub brand_color: String,
    pub brand_logo: Option<String>,
    pub selected_product_ids: Vec<String>,
    pub item_limit: u32,
    pub order_limit_per_link: String,
    pub max_cart_value: String,
    pub block_duplicate_orders: bool,
    pub shipping_zone: String,
    pub restricted_countries: String,
    pub show_phone_field: bool,
    pub show_instagram_field: bool,
    pub show_tiktok_field: bool,
    pub ask_custom_question: bool,
    pub custom_question_label: String,
    pub custom_question_required: bool,
    pub show_consent_checkbox: bool,
    pub terms_consent_text: String,
    pub require_second_consent: bool,
    pub second_consent_text: String,
    pub marketing_opt_in: bool,
    pub marketing_opt_in_text: String,
    pub grid_layout: bool,
    pub show_sold_out: bool,
    pub visit_store_url: Option<String>,
    pub visit_store_label: Option<String>,
    pub submit_button_label: Option<String>,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            welcome_message: String::new(),
            brand_color: "#000000".to_string(),
            brand_logo: None,
            selected_product_ids: Vec::new(),
            item_limit: 1,
            order_limit_per_link: String::new(),
            max_cart_value: String::new(),
            block_duplicate_orders: false,
            shipping_zone: String::new(),
            restricted_countries: String::new(),
            show_phone_field: false,
            show_instagram_field: false,
            show_tiktok_field: false,
            ask_custom_question: false,
            custom_question_label: String::new(),
            custom_question_required: false,
            show_consent_checkbox: false,
            terms_consent_text: String::new(),
            require_second_consent: false,
            second_consent_text: String::new(),
            marketing_opt_in: false,
            marketing_opt_in_text: String::new(),
            grid_layout: true,
            show_sold_out: true,
            visit_store_url: None,
            visit_store_label: None,
            submit_button_label: None,
        }
    }
}

/// A validated draft ready to be assigned a slug and persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDraft {
    pub name: String,
    pub welcome_message: String,
    pub brand_color: String,
    pub brand_logo: Option<String>,
    pub config: CampaignConfig,
}

impl CampaignDraft {
    /// Parse the free-text numeric rules (empty or non-numeric becomes
    /// `None`) and check the two hard builder constraints: a non-empty
    /// name and an item limit of at least one.
    pub fn normalize(&self) -> Result<NormalizedDraft, ValidationReport> {
        let mut report = ValidationReport::default();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            report.push("name", "Campaign name is required.");
        }
        if self.item_limit < 1 {
            report.push("item_limit", "Item limit must be at least 1.");
        }
        report.into_result()?;

        let config = CampaignConfig {
            selected_product_ids: self.selected_product_ids.clone(),
            item_limit: self.item_limit,
            order_limit_per_link: parse_optional_number(&self.order_limit_per_link),
            max_cart_value: parse_optional_amount(&self.max_cart_value),
            block_duplicate_orders: self.block_duplicate_orders,
            shipping_zone: ShippingZone::from_storage(Some(self.shipping_zone.clone())),
            restricted_countries: self.restricted_countries.trim().to_string(),
            show_phone_field: self.show_phone_field,
            show_instagram_field: self.show_instagram_field,
            show_tiktok_field: self.show_tiktok_field,
            ask_custom_question: self.ask_custom_question,
            custom_question_label: self.custom_question_label.trim().to_string(),
            custom_question_required: self.custom_question_required,
            show_consent_checkbox: self.show_consent_checkbox,
            terms_consent_text: self.terms_consent_text.trim().to_string(),
            require_second_consent: self.require_second_consent,
            second_consent_text: self.second_consent_text.trim().to_string(),
            marketing_opt_in: self.marketing_opt_in,
            marketing_opt_in_text: self.marketing_opt_in_text.trim().to_string(),
            grid_layout: self.grid_layout,
            show_sold_out: self.show_sold_out,
            visit_store_url: none_if_blank(&self.visit_store_url),
            visit_store_label: none_if_blank(&self.visit_store_label),
            submit_button_label: none_if_blank(&self.submit_button_label),
        };

        Ok(NormalizedDraft {
            name,
            welcome_message: self.welcome_message.trim().to_string(),
            brand_color: self.brand_color.trim().to_string(),
            brand_logo: self.brand_logo.clone(),
            config,
        })
    }
}

fn parse_optional_number(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

fn parse_optional_amount(raw: &str) -> Option<f64> {
    let parsed = raw.trim().parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

fn none_if_blank(raw: &Option<String>) -> Option<String> {
    raw.as_ref()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
