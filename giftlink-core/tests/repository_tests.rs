// File: giftlink-core/tests/repository_tests.rs
//
// Postgres-backed repository tests. They expect the local test database
// described in test_utils::helpers, so they are ignored by default:
//
//     cargo test -- --ignored --test-threads=1

mod test_utils;

use chrono::{Duration, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use giftlink_common::error::Error;
use giftlink_common::models::campaign::{CampaignConfig, CampaignStatus, ShippingZone};
use giftlink_common::models::duplicate::{
    AttemptPayload, DuplicateAttempt, DuplicateDecision, DuplicateMatchPolicy, IdentityProbe,
    MatchScope,
};
use giftlink_common::models::order::{
    OrderFilter, OrderSort, OrderStatus, ShippingAddress, StructuredAddress,
};
use giftlink_common::traits::repository_traits::{
    CampaignRepository, DuplicateAttemptRepository, OrderRepository,
};
use giftlink_core::repositories::postgres::{
    PostgresCampaignRepository, PostgresDuplicateAttemptRepository, PostgresOrderRepository,
};
use giftlink_core::test_utils::helpers::setup_test_database;

use test_utils::{campaign_with_config, catalog_item, pending_attempt, seeded_order};

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_campaign_repository_roundtrip() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let repo = PostgresCampaignRepository::new(db.pool().clone());

    let campaign = campaign_with_config(
        "Roundtrip Launch",
        CampaignConfig {
            selected_product_ids: vec!["p1".to_string(), "p5".to_string()],
            item_limit: 3,
            order_limit_per_link: Some(25),
            max_cart_value: Some(750.0),
            block_duplicate_orders: true,
            shipping_zone: ShippingZone::Country("Canada".to_string()),
            restricted_countries: "Germany".to_string(),
            show_phone_field: true,
            ask_custom_question: true,
            custom_question_label: "Favorite color?".to_string(),
            visit_store_url: Some("https://shop.example.com".to_string()),
            ..CampaignConfig::default()
        },
    );
    repo.create_campaign(&campaign).await?;

    let stored = repo
        .get_campaign(campaign.campaign_id)
        .await?
        .expect("campaign must load back");
    assert_eq!(stored.name, campaign.name);
    assert_eq!(stored.slug, campaign.slug);
    assert_eq!(stored.config, campaign.config);
    assert_eq!(stored.status, CampaignStatus::Active);
    // Postgres keeps microseconds; compare at that resolution.
    assert_eq!(
        stored.created_at.timestamp_micros(),
        campaign.created_at.timestamp_micros()
    );

    assert!(repo.slug_exists(&campaign.slug).await?);
    assert!(!repo.slug_exists("never-used-slug").await?);

    let by_slug = repo.get_campaign_by_slug(&campaign.slug).await?;
    assert_eq!(by_slug.map(|c| c.campaign_id), Some(campaign.campaign_id));

    repo.increment_claims(campaign.campaign_id).await?;
    repo.increment_claims(campaign.campaign_id).await?;
    let bumped = repo.get_campaign(campaign.campaign_id).await?.unwrap();
    assert_eq!(bumped.claims, 2);

    // Archiving keeps the row but takes the slug out of circulation.
    repo.archive_campaign(campaign.campaign_id).await?;
    assert!(repo.get_campaign_by_slug(&campaign.slug).await?.is_none());
    let archived = repo.get_campaign(campaign.campaign_id).await?.unwrap();
    assert_eq!(archived.status, CampaignStatus::Archived);

    // The slug stays reserved even while archived.
    assert!(repo.slug_exists(&campaign.slug).await?);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_campaign_rows_from_before_the_rule_columns_load_with_defaults() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let repo = PostgresCampaignRepository::new(db.pool().clone());

    let campaign_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO campaigns (campaign_id, name, slug)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(campaign_id)
    .bind("Legacy Campaign")
    .bind("legacy-campaign-0000")
    .execute(db.pool())
    .await?;

    let stored = repo
        .get_campaign(campaign_id)
        .await?
        .expect("legacy row must load");
    assert_eq!(stored.config, CampaignConfig::default());
    assert_eq!(stored.status, CampaignStatus::Active);
    assert_eq!(stored.claims, 0);
    assert_eq!(stored.brand_color, "#000000");

    Ok(())
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_order_repository_roundtrip_and_sorting() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let campaigns = PostgresCampaignRepository::new(db.pool().clone());
    let orders = PostgresOrderRepository::new(db.pool().clone());

    let campaign = campaign_with_config("Order Home", CampaignConfig::default());
    campaigns.create_campaign(&campaign).await?;

    let base = Utc::now() - Duration::minutes(10);
    let mut cheap = seeded_order(campaign.campaign_id, "alpha@example.com");
    cheap.created_at = base;
    cheap.items = vec![catalog_item("p6")]; // 40
    let mut pricey = seeded_order(campaign.campaign_id, "zeta@example.com");
    pricey.created_at = base + Duration::minutes(1);
    pricey.items = vec![catalog_item("p1")]; // 650
    pricey.instagram = Some("@zeta.lane".to_string());
    pricey.shipping_address = ShippingAddress::Structured(StructuredAddress {
        label: "1 Rodeo Dr, Beverly Hills, CA 90210, United States".to_string(),
        line1: "1 Rodeo Dr".to_string(),
        city: "Beverly Hills".to_string(),
        region: "CA".to_string(),
        postal_code: "90210".to_string(),
        country: "United States".to_string(),
    });
    let mut fulfilled = seeded_order(campaign.campaign_id, "mid@example.com");
    fulfilled.created_at = base + Duration::minutes(2);
    fulfilled.status = OrderStatus::Fulfilled;

    orders.create_order(&cheap).await?;
    orders.create_order(&pricey).await?;
    orders.create_order(&fulfilled).await?;

    let stored = orders
        .get_order(pricey.order_id)
        .await?
        .expect("order must load back");
    assert_eq!(stored.email, "zeta@example.com");
    assert_eq!(stored.instagram, Some("@zeta.lane".to_string()));
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.value(), 650.0);
    assert_eq!(stored.campaign_name, "Order Home");
    assert!(matches!(
        stored.shipping_address,
        ShippingAddress::Structured(_)
    ));

    let filter = OrderFilter {
        campaign_id: Some(campaign.campaign_id),
        status: None,
    };

    let newest = orders.list_orders(&filter, OrderSort::Newest, 100).await?;
    assert_eq!(newest[0].order_id, fulfilled.order_id);
    let oldest = orders.list_orders(&filter, OrderSort::Oldest, 100).await?;
    assert_eq!(oldest[0].order_id, cheap.order_id);

    let by_value = orders
        .list_orders(&filter, OrderSort::HighestValue, 100)
        .await?;
    assert_eq!(by_value[0].order_id, pricey.order_id);

    let by_email = orders.list_orders(&filter, OrderSort::Email, 100).await?;
    assert_eq!(by_email[0].email, "alpha@example.com");

    let pending_only = orders
        .list_orders(
            &OrderFilter {
                campaign_id: Some(campaign.campaign_id),
                status: Some(OrderStatus::Pending),
            },
            OrderSort::Newest,
            100,
        )
        .await?;
    assert_eq!(pending_only.len(), 2);

    let capped = orders.list_orders(&filter, OrderSort::Newest, 2).await?;
    assert_eq!(capped.len(), 2);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_identity_matching_against_stored_orders() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let campaigns = PostgresCampaignRepository::new(db.pool().clone());
    let orders = PostgresOrderRepository::new(db.pool().clone());

    let home = campaign_with_config("Probe Home", CampaignConfig::default());
    let away = campaign_with_config("Probe Away", CampaignConfig::default());
    campaigns.create_campaign(&home).await?;
    campaigns.create_campaign(&away).await?;

    let mut existing = seeded_order(home.campaign_id, "Probe.Match@Example.com");
    existing.phone = Some("9015550133".to_string());
    orders.create_order(&existing).await?;

    let ci = DuplicateMatchPolicy::default();
    let cs = DuplicateMatchPolicy {
        case_insensitive: false,
        scope: MatchScope::PerCampaign,
    };
    let across = DuplicateMatchPolicy {
        case_insensitive: true,
        scope: MatchScope::AcrossCampaigns,
    };

    let email_probe = IdentityProbe {
        email: "probe.match@example.com".to_string(),
        ..IdentityProbe::default()
    };

    // Case folding on by default.
    let hit = orders
        .find_identity_match(home.campaign_id, &email_probe, &ci)
        .await?;
    assert_eq!(hit, Some(existing.order_id));

    // Exact matching misses the folded email.
    let miss = orders
        .find_identity_match(home.campaign_id, &email_probe, &cs)
        .await?;
    assert_eq!(miss, None);

    // Phone hits regardless of the other fields.
    let phone_probe = IdentityProbe {
        phone: "9015550133".to_string(),
        ..IdentityProbe::default()
    };
    let hit = orders
        .find_identity_match(home.campaign_id, &phone_probe, &ci)
        .await?;
    assert_eq!(hit, Some(existing.order_id));

    // Campaign scope: the away campaign sees nothing per-campaign, but
    // does across campaigns.
    let scoped = orders
        .find_identity_match(away.campaign_id, &email_probe, &ci)
        .await?;
    assert_eq!(scoped, None);
    let widened = orders
        .find_identity_match(away.campaign_id, &email_probe, &across)
        .await?;
    assert_eq!(widened, Some(existing.order_id));

    // A fully empty probe never queries.
    let none = orders
        .find_identity_match(home.campaign_id, &IdentityProbe::default(), &ci)
        .await?;
    assert_eq!(none, None);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_legacy_order_rows_read_through_the_fallback_columns() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let campaigns = PostgresCampaignRepository::new(db.pool().clone());
    let orders = PostgresOrderRepository::new(db.pool().clone());

    let campaign = campaign_with_config("Legacy Orders", CampaignConfig::default());
    campaigns.create_campaign(&campaign).await?;

    // Pre-split contact shape: combined handle, unsuffixed consents, and
    // the items array stored as a JSON string.
    let order_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO orders (
            order_id, campaign_id, influencer_email,
            influencer_handle, influencer_tiktok,
            terms_consent, marketing_opt_in,
            shipping_address, items
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(order_id)
    .bind(campaign.campaign_id)
    .bind("legacy@example.com")
    .bind("@old.insta")
    .bind("@old.tok")
    .bind(true)
    .bind(true)
    .bind("14 Elm St, Memphis")
    .bind(JsonValue::String(
        r#"[{"id": "p1", "title": "Jacket", "value": "650"}]"#.to_string(),
    ))
    .execute(db.pool())
    .await?;

    let stored = orders.get_order(order_id).await?.expect("row must load");
    assert_eq!(stored.instagram, Some("@old.insta".to_string()));
    assert_eq!(stored.tiktok, Some("@old.tok".to_string()));
    assert!(stored.terms_consent);
    assert!(!stored.second_consent);
    assert!(stored.marketing_opt_in);
    assert_eq!(stored.status, OrderStatus::Pending);
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.items[0].price, 650.0);
    assert_eq!(
        stored.shipping_address,
        ShippingAddress::Raw("14 Elm St, Memphis".to_string())
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_duplicate_attempt_repository_roundtrip() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let campaigns = PostgresCampaignRepository::new(db.pool().clone());
    let attempts = PostgresDuplicateAttemptRepository::new(db.pool().clone());

    let campaign = campaign_with_config("Attempt Home", CampaignConfig::default());
    campaigns.create_campaign(&campaign).await?;

    let payload = AttemptPayload {
        email: "dup@example.com".to_string(),
        first_name: "Dup".to_string(),
        last_name: "Licate".to_string(),
        items: vec![catalog_item("p3")],
        consent_primary: Some(true),
        ..AttemptPayload::default()
    };
    let attempt = pending_attempt(&campaign, payload);
    attempts.create_attempt(&attempt).await?;

    let stored = attempts
        .get_attempt(attempt.attempt_id)
        .await?
        .expect("attempt must load back");
    assert_eq!(stored.payload.email, "dup@example.com");
    assert_eq!(stored.payload.items.len(), 1);
    assert_eq!(stored.decision, DuplicateDecision::Pending);
    assert_eq!(stored.reason, DuplicateAttempt::DEFAULT_REASON);
    assert_eq!(stored.campaign_name, "Attempt Home");

    // The triage tag survives a reload without touching the payload.
    attempts
        .set_decision(attempt.attempt_id, DuplicateDecision::Declined)
        .await?;
    let tagged = attempts.get_attempt(attempt.attempt_id).await?.unwrap();
    assert_eq!(tagged.decision, DuplicateDecision::Declined);
    assert_eq!(tagged.payload.email, "dup@example.com");

    let listed = attempts.list_attempts(10).await?;
    assert!(listed.iter().any(|a| a.attempt_id == attempt.attempt_id));

    attempts.delete_attempt(attempt.attempt_id).await?;
    assert!(attempts.get_attempt(attempt.attempt_id).await?.is_none());

    Ok(())
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn test_legacy_attempt_payloads_stored_as_strings_still_load() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let campaigns = PostgresCampaignRepository::new(db.pool().clone());
    let attempts = PostgresDuplicateAttemptRepository::new(db.pool().clone());

    let campaign = campaign_with_config("String Payloads", CampaignConfig::default());
    campaigns.create_campaign(&campaign).await?;

    let attempt_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO duplicate_attempts (attempt_id, campaign_id, influencer_info)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(attempt_id)
    .bind(campaign.campaign_id)
    .bind(JsonValue::String(
        r#"{"email": "strung@example.com", "name": "Strung Along"}"#.to_string(),
    ))
    .execute(db.pool())
    .await?;

    let stored = attempts
        .get_attempt(attempt_id)
        .await?
        .expect("string payload must load");
    assert_eq!(stored.payload.email, "strung@example.com");
    assert_eq!(stored.payload.name, "Strung Along");
    assert_eq!(stored.decision, DuplicateDecision::Pending);
    // A NULL reason reads as the standard one.
    assert_eq!(stored.reason, DuplicateAttempt::DEFAULT_REASON);

    Ok(())
}
