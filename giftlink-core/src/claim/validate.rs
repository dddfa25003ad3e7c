// File: giftlink-core/src/claim/validate.rs

use once_cell::sync::Lazy;
use regex::Regex;

use giftlink_common::error::ValidationReport;
use giftlink_common::models::campaign::CampaignConfig;
use giftlink_common::models::order::ShippingAddress;

use crate::claim::ClaimSubmission;

/// Every field the claim form can attach an error to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    Instagram,
    Tiktok,
    Address,
    CustomAnswer,
    Consent,
    SecondConsent,
    Items,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FirstName => "first_name",
            FormField::LastName => "last_name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Instagram => "instagram",
            FormField::Tiktok => "tiktok",
            FormField::Address => "address",
            FormField::CustomAnswer => "custom_answer",
            FormField::Consent => "consent",
            FormField::SecondConsent => "second_consent",
            FormField::Items => "items",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "First name",
            FormField::LastName => "Last name",
            FormField::Email => "Email",
            FormField::Phone => "Phone number",
            FormField::Instagram => "Instagram handle",
            FormField::Tiktok => "TikTok handle",
            FormField::Address => "Shipping address",
            FormField::CustomAnswer => "Answer",
            FormField::Consent => "Consent",
            FormField::SecondConsent => "Second consent",
            FormField::Items => "Gift selection",
        }
    }
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap());

pub fn validate_email(value: &str) -> Option<&'static str> {
    if EMAIL_RE.is_match(value.trim()) {
        None
    } else {
        Some("Enter a valid email address.")
    }
}

/// 10 to 15 digits once everything else is stripped.
pub fn validate_phone(value: &str) -> Option<&'static str> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if (10..=15).contains(&digits) {
        None
    } else {
        Some("Enter a phone number with 10-15 digits.")
    }
}

/// At least one alphanumeric after the leading `@`.
pub fn validate_handle(value: &str) -> Option<&'static str> {
    let stripped = value.trim().trim_start_matches('@');
    if stripped.chars().any(|c| c.is_ascii_alphanumeric()) {
        None
    } else {
        Some("Enter a valid handle.")
    }
}

/// The shape check for one field, requiredness aside. Fields without a
/// shape rule always pass.
pub fn field_check(field: FormField, value: &str) -> Option<&'static str> {
    match field {
        FormField::Email => validate_email(value),
        FormField::Phone => validate_phone(value),
        FormField::Instagram | FormField::Tiktok => validate_handle(value),
        _ => None,
    }
}

type RequiredWhen = fn(&CampaignConfig) -> bool;

/// One row per optional form field: the field is required at submit time
/// exactly when its predicate holds for the campaign's config. Visibility
/// and requiredness are the same switch, so a hidden field can never block
/// submission.
const REQUIRED_WHEN: &[(FormField, RequiredWhen)] = &[
    (FormField::Phone, |c| c.show_phone_field),
    (FormField::Instagram, |c| c.show_instagram_field),
    (FormField::Tiktok, |c| c.show_tiktok_field),
    (FormField::CustomAnswer, |c| {
        c.ask_custom_question && c.custom_question_required
    }),
    (FormField::Consent, |c| c.show_consent_checkbox),
    (FormField::SecondConsent, |c| {
        c.show_consent_checkbox && c.require_second_consent
    }),
];

/// Case-insensitive membership in the free-text, comma-separated denylist.
pub fn country_denylisted(country: &str, denylist: &str) -> bool {
    denylist
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .any(|c| c.eq_ignore_ascii_case(country.trim()))
}

/// The full submit-time gate. Also run server-side before an order is
/// accepted, so a hand-crafted submission gets the same treatment as one
/// assembled by the form.
pub fn submit_check(config: &CampaignConfig, submission: &ClaimSubmission) -> ValidationReport {
    let mut report = ValidationReport::default();

    if submission.email.trim().is_empty() {
        report.push(FormField::Email.as_str(), "Email is required.");
    } else if let Some(msg) = validate_email(&submission.email) {
        report.push(FormField::Email.as_str(), msg);
    }

    match &submission.shipping_address {
        ShippingAddress::Raw(text) if text.trim().is_empty() => {
            report.push(FormField::Address.as_str(), "Shipping address is required.");
        }
        addr => {
            if let Some(country) = addr.country() {
                if !config.shipping_zone.allows(country) {
                    report.push(
                        FormField::Address.as_str(),
                        format!("This campaign only ships to {}.", config.shipping_zone),
                    );
                } else if country_denylisted(country, &config.restricted_countries) {
                    report.push(
                        FormField::Address.as_str(),
                        "This campaign cannot ship to that country.",
                    );
                }
            }
        }
    }

    for (field, required_when) in REQUIRED_WHEN {
        if !required_when(config) {
            continue;
        }
        match field {
            FormField::Phone => {
                if submission.phone.trim().is_empty() {
                    report.push(field.as_str(), "Phone number is required.");
                } else if let Some(msg) = validate_phone(&submission.phone) {
                    report.push(field.as_str(), msg);
                }
            }
            FormField::Instagram => {
                if submission.instagram.trim().is_empty() {
                    report.push(field.as_str(), "Instagram handle is required.");
                } else if let Some(msg) = validate_handle(&submission.instagram) {
                    report.push(field.as_str(), msg);
                }
            }
            FormField::Tiktok => {
                if submission.tiktok.trim().is_empty() {
                    report.push(field.as_str(), "TikTok handle is required.");
                } else if let Some(msg) = validate_handle(&submission.tiktok) {
                    report.push(field.as_str(), msg);
                }
            }
            FormField::CustomAnswer => {
                if submission.custom_answer.trim().is_empty() {
                    report.push(field.as_str(), "An answer is required.");
                }
            }
            FormField::Consent => {
                if !submission.consent_primary {
                    report.push(field.as_str(), "You must accept the terms to continue.");
                }
            }
            FormField::SecondConsent => {
                if !submission.consent_secondary {
                    report.push(field.as_str(), "This consent is required to continue.");
                }
            }
            _ => {}
        }
    }

    if submission.items.is_empty() {
        report.push(FormField::Items.as_str(), "Select at least one gift.");
    } else if submission.items.len() > config.item_limit as usize {
        report.push(
            FormField::Items.as_str(),
            format!("You can claim at most {} gift(s).", config.item_limit),
        );
    }
    if let Some(cap) = config.max_cart_value {
        if submission.value() > cap {
            report.push(
                FormField::Items.as_str(),
                "Selected gifts exceed this campaign's value limit.",
            );
        }
    }

    report
}
