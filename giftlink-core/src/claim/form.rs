// File: giftlink-core/src/claim/form.rs

use giftlink_common::error::ValidationReport;
use giftlink_common::models::address::PlaceDetails;
use giftlink_common::models::campaign::Campaign;
use giftlink_common::models::order::{OrderItem, ShippingAddress, StructuredAddress};
use giftlink_common::models::product::Product;

use crate::catalog;
use crate::claim::sanitize::{sanitize_email, sanitize_handle, sanitize_name, sanitize_phone};
use crate::claim::validate::{country_denylisted, field_check, submit_check, FormField};
use crate::claim::ClaimSubmission;

/// Where the influencer is in the flow. `Success` is terminal; there is no
/// way back out of it on this form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStep {
    Selection,
    Details,
    Success,
}

/// The influencer-facing claim flow for one campaign: product selection,
/// then contact and shipping details, then confirmation. All rules come
/// from the campaign's config; the form itself is campaign-agnostic.
pub struct ClaimForm {
    campaign: Campaign,
    products: Vec<Product>,
    step: ClaimStep,
    selected_ids: Vec<String>,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    instagram: String,
    tiktok: String,
    address_query: String,
    resolved_address: Option<StructuredAddress>,
    consent_primary: bool,
    consent_secondary: bool,
    marketing_opt_in: bool,
    custom_answer: String,
    errors: ValidationReport,
    banner: Option<String>,
    submitting: bool,
}

impl ClaimForm {
    pub fn new(campaign: Campaign) -> Self {
        let products = catalog::products_for(&campaign.config.selected_product_ids);
        Self {
            campaign,
            products,
            step: ClaimStep::Selection,
            selected_ids: Vec::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            instagram: String::new(),
            tiktok: String::new(),
            address_query: String::new(),
            resolved_address: None,
            consent_primary: false,
            consent_secondary: false,
            marketing_opt_in: false,
            custom_answer: String::new(),
            errors: ValidationReport::default(),
            banner: None,
            submitting: false,
        }
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn step(&self) -> ClaimStep {
        self.step
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn instagram(&self) -> &str {
        &self.instagram
    }

    pub fn tiktok(&self) -> &str {
        &self.tiktok
    }

    pub fn address_query(&self) -> &str {
        &self.address_query
    }

    pub fn resolved_address(&self) -> Option<&StructuredAddress> {
        self.resolved_address.as_ref()
    }

    pub fn custom_answer(&self) -> &str {
        &self.custom_answer
    }

    /// Select or deselect a product. Adding past `item_limit` is a silent
    /// no-op: the click simply does nothing, matching the disabled-looking
    /// tile in the page.
    pub fn toggle_product(&mut self, id: &str) {
        if self.step == ClaimStep::Success {
            return;
        }
        if let Some(pos) = self.selected_ids.iter().position(|p| p == id) {
            self.selected_ids.remove(pos);
            return;
        }
        if self.selected_ids.len() >= self.campaign.config.item_limit as usize {
            return;
        }
        if !self.products.iter().any(|p| p.id == id) {
            return;
        }
        self.selected_ids.push(id.to_string());
    }

    /// Selection -> details, allowed only with at least one product picked.
    pub fn proceed_to_details(&mut self) {
        if self.step == ClaimStep::Selection && !self.selected_ids.is_empty() {
            self.step = ClaimStep::Details;
        }
    }

    pub fn back_to_selection(&mut self) {
        if self.step == ClaimStep::Details {
            self.step = ClaimStep::Selection;
        }
    }

    pub fn set_first_name(&mut self, raw: &str) {
        self.first_name = sanitize_name(raw);
    }

    pub fn set_last_name(&mut self, raw: &str) {
        self.last_name = sanitize_name(raw);
    }

    pub fn set_email(&mut self, raw: &str) {
        self.email = sanitize_email(raw);
        self.refresh_field(FormField::Email);
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.phone = sanitize_phone(raw);
        self.refresh_field(FormField::Phone);
    }

    pub fn set_instagram(&mut self, raw: &str) {
        self.instagram = sanitize_handle(raw);
        self.refresh_field(FormField::Instagram);
    }

    pub fn set_tiktok(&mut self, raw: &str) {
        self.tiktok = sanitize_handle(raw);
        self.refresh_field(FormField::Tiktok);
    }

    /// Free-text address entry. Typing discards any previously resolved
    /// suggestion along with its error.
    pub fn set_address_query(&mut self, raw: &str) {
        self.address_query = raw.to_string();
        self.resolved_address = None;
        self.clear_field_error(FormField::Address);
    }

    pub fn set_consent_primary(&mut self, granted: bool) {
        self.consent_primary = granted;
    }

    pub fn set_consent_secondary(&mut self, granted: bool) {
        self.consent_secondary = granted;
    }

    pub fn set_marketing_opt_in(&mut self, granted: bool) {
        self.marketing_opt_in = granted;
    }

    pub fn set_custom_answer(&mut self, raw: &str) {
        self.custom_answer = raw.to_string();
    }

    /// Accept a resolved suggestion. A country outside the campaign's
    /// shipping zone (or on its denylist) discards the resolution and
    /// raises an address error, leaving submission blocked until a valid
    /// address is chosen.
    pub fn choose_address(&mut self, details: PlaceDetails) {
        let addr = StructuredAddress {
            label: details.label,
            line1: details.line1,
            city: details.city,
            region: details.region,
            postal_code: details.postal_code,
            country: details.country,
        };
        self.clear_field_error(FormField::Address);

        if !addr.country.is_empty() {
            let config = &self.campaign.config;
            if !config.shipping_zone.allows(&addr.country) {
                self.resolved_address = None;
                self.errors.push(
                    FormField::Address.as_str(),
                    format!("This campaign only ships to {}.", config.shipping_zone),
                );
                return;
            }
            if country_denylisted(&addr.country, &config.restricted_countries) {
                self.resolved_address = None;
                self.errors.push(
                    FormField::Address.as_str(),
                    "This campaign cannot ship to that country.",
                );
                return;
            }
        }

        self.address_query = addr.label.clone();
        self.resolved_address = Some(addr);
    }

    pub fn shipping_address(&self) -> ShippingAddress {
        match &self.resolved_address {
            Some(addr) => ShippingAddress::Structured(addr.clone()),
            None => ShippingAddress::Raw(self.address_query.trim().to_string()),
        }
    }

    /// Run the full submit gate. On success the form locks (`submitting`)
    /// and hands back the submission for the intake service; the caller
    /// reports the outcome via [`complete_submission`](Self::complete_submission)
    /// or [`fail_submission`](Self::fail_submission). On validation failure
    /// the new errors merge with whatever field errors are already showing
    /// and a single aggregate banner is raised.
    pub fn try_submit(&mut self) -> Option<ClaimSubmission> {
        if self.step != ClaimStep::Details || self.submitting {
            return None;
        }

        let submission = self.build_submission();
        let report = submit_check(&self.campaign.config, &submission);
        if !report.is_empty() {
            for e in report.errors {
                if !self.errors.has(&e.field) {
                    self.errors.errors.push(e);
                }
            }
            self.banner = Some("Please fix the highlighted fields and try again.".to_string());
            return None;
        }

        self.banner = None;
        self.errors = ValidationReport::default();
        self.submitting = true;
        Some(submission)
    }

    /// The backend accepted (or quarantined) the claim; either way the
    /// influencer sees success.
    pub fn complete_submission(&mut self) {
        self.submitting = false;
        self.step = ClaimStep::Success;
    }

    /// The backend failed; back to details with the error surfaced. No
    /// automatic retry, resubmission is the user's call.
    pub fn fail_submission(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.banner = Some(message.into());
    }

    fn refresh_field(&mut self, field: FormField) {
        let value = match field {
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Instagram => &self.instagram,
            FormField::Tiktok => &self.tiktok,
            _ => return,
        };
        // Emptiness is a submit-time concern; shape errors show as soon as
        // there is something to check and clear as soon as it is valid.
        let message = if value.trim().is_empty() {
            None
        } else {
            field_check(field, value)
        };
        self.clear_field_error(field);
        if let Some(msg) = message {
            self.errors.push(field.as_str(), msg);
        }
    }

    fn clear_field_error(&mut self, field: FormField) {
        self.errors.errors.retain(|e| e.field != field.as_str());
    }

    /// Assemble the outgoing submission, stripping every field whose
    /// config flag is off so hidden fields never leak into order data.
    fn build_submission(&self) -> ClaimSubmission {
        let config = &self.campaign.config;
        ClaimSubmission {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: if config.show_phone_field {
                self.phone.trim().to_string()
            } else {
                String::new()
            },
            instagram: if config.show_instagram_field {
                self.instagram.trim().to_string()
            } else {
                String::new()
            },
            tiktok: if config.show_tiktok_field {
                self.tiktok.trim().to_string()
            } else {
                String::new()
            },
            shipping_address: self.shipping_address(),
            items: self.selected_items(),
            consent_primary: config.show_consent_checkbox && self.consent_primary,
            consent_secondary: config.show_consent_checkbox
                && config.require_second_consent
                && self.consent_secondary,
            marketing_opt_in: config.marketing_opt_in && self.marketing_opt_in,
            custom_answer: if config.ask_custom_question {
                self.custom_answer.trim().to_string()
            } else {
                String::new()
            },
        }
    }

    fn selected_items(&self) -> Vec<OrderItem> {
        self.selected_ids
            .iter()
            .filter_map(|id| self.products.iter().find(|p| p.id == *id))
            .map(|p| OrderItem {
                id: p.id.clone(),
                title: p.title.clone(),
                price: p.price,
                image: p.image.clone(),
            })
            .collect()
    }
}
