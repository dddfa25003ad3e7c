// File: giftlink-core/src/repositories/postgres/orders.rs

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use giftlink_common::error::Error;
use giftlink_common::models::duplicate::{DuplicateMatchPolicy, IdentityProbe, MatchScope};
use giftlink_common::models::order::{Order, OrderFilter, OrderItem, OrderSort, ShippingAddress};
use giftlink_common::traits::repository_traits::OrderRepository;

pub struct PostgresOrderRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresOrderRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Lenient items decode: a JSON array, a JSON string containing an array,
/// or anything else (including NULL and garbage) which becomes an empty
/// list. Item prices accept the legacy `value` key and numeric strings.
pub fn parse_items(raw: Option<&JsonValue>) -> Vec<OrderItem> {
    let Some(value) = raw else {
        return Vec::new();
    };
    let entries = match value {
        JsonValue::Array(arr) => arr.clone(),
        JsonValue::String(s) => match serde_json::from_str::<JsonValue>(s) {
            Ok(JsonValue::Array(arr)) => arr,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    entries.iter().filter_map(item_from_value).collect()
}

fn item_from_value(v: &JsonValue) -> Option<OrderItem> {
    let obj = v.as_object()?;
    let price = obj
        .get("price")
        .and_then(json_number)
        .or_else(|| obj.get("value").and_then(json_number))
        .unwrap_or(0.0);
    Some(OrderItem {
        id: json_string(obj.get("id")),
        title: json_string(obj.get("title")),
        price,
        image: json_string(obj.get("image")),
    })
}

fn json_number(v: &JsonValue) -> Option<f64> {
    v.as_f64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

fn json_string(v: Option<&JsonValue>) -> String {
    v.and_then(JsonValue::as_str).unwrap_or_default().to_string()
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

/// Maps a joined row back to the application shape, applying the legacy
/// fallbacks: instagram falls back to the old combined handle column,
/// tiktok to its pre-split column, and each consent to its unsuffixed
/// predecessor.
fn order_from_row(r: &PgRow) -> Result<Order, Error> {
    let instagram = non_empty(
        r.try_get::<Option<String>, _>("influencer_handle_instagram")
            .unwrap_or(None),
    )
    .or_else(|| non_empty(r.try_get::<Option<String>, _>("influencer_handle").unwrap_or(None)));

    let tiktok = non_empty(
        r.try_get::<Option<String>, _>("influencer_handle_tiktok")
            .unwrap_or(None),
    )
    .or_else(|| non_empty(r.try_get::<Option<String>, _>("influencer_tiktok").unwrap_or(None)));

    let terms_consent = r
        .try_get::<Option<bool>, _>("terms_consent_accepted")
        .unwrap_or(None)
        .or_else(|| r.try_get::<Option<bool>, _>("terms_consent").unwrap_or(None))
        .unwrap_or(false);

    let second_consent = r
        .try_get::<Option<bool>, _>("second_consent_accepted")
        .unwrap_or(None)
        .unwrap_or(false);

    let marketing_opt_in = r
        .try_get::<Option<bool>, _>("marketing_opt_in_accepted")
        .unwrap_or(None)
        .or_else(|| r.try_get::<Option<bool>, _>("marketing_opt_in").unwrap_or(None))
        .unwrap_or(false);

    let items_raw: Option<JsonValue> = r.try_get::<Option<JsonValue>, _>("items").unwrap_or(None);
    let status: Option<String> = r.try_get::<Option<String>, _>("status").unwrap_or(None);
    let shipping: String = r
        .try_get::<Option<String>, _>("shipping_address")
        .unwrap_or(None)
        .unwrap_or_default();

    Ok(Order {
        order_id: r.try_get("order_id")?,
        campaign_id: r.try_get("campaign_id")?,
        campaign_name: r
            .try_get::<Option<String>, _>("campaign_name")
            .unwrap_or(None)
            .unwrap_or_else(|| "Standard Campaign".to_string()),
        created_at: r.try_get("created_at")?,
        email: r.try_get("influencer_email")?,
        name: r
            .try_get::<Option<String>, _>("influencer_name")
            .unwrap_or(None)
            .unwrap_or_default(),
        phone: non_empty(r.try_get::<Option<String>, _>("influencer_phone").unwrap_or(None)),
        instagram,
        tiktok,
        shipping_address: ShippingAddress::from_storage(&shipping),
        items: parse_items(items_raw.as_ref()),
        status: status.map(Into::into).unwrap_or_default(),
        terms_consent,
        second_consent,
        marketing_opt_in,
        custom_answer: non_empty(r.try_get::<Option<String>, _>("custom_answer").unwrap_or(None)),
    })
}

// Identity matching, one static query per case policy. The probe strings
// bind empty for absent fields, which the corresponding clause skips.
const MATCH_SQL_CI: &str = r#"
SELECT order_id FROM orders
WHERE ($1 OR campaign_id = $2)
  AND (
       ($3 <> '' AND LOWER(influencer_email) = LOWER($3))
    OR ($4 <> '' AND LOWER(influencer_phone) = LOWER($4))
    OR ($5 <> '' AND LOWER(influencer_handle_instagram) = LOWER($5))
    OR ($6 <> '' AND LOWER(influencer_handle_tiktok) = LOWER($6))
  )
LIMIT 1
"#;

const MATCH_SQL_CS: &str = r#"
SELECT order_id FROM orders
WHERE ($1 OR campaign_id = $2)
  AND (
       ($3 <> '' AND influencer_email = $3)
    OR ($4 <> '' AND influencer_phone = $4)
    OR ($5 <> '' AND influencer_handle_instagram = $5)
    OR ($6 <> '' AND influencer_handle_tiktok = $6)
  )
LIMIT 1
"#;

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create_order(&self, order: &Order) -> Result<(), Error> {
        let items = serde_json::to_value(&order.items)?;
        // The legacy combined handle is still written for older readers.
        let combined_handle = order
            .instagram
            .clone()
            .or_else(|| order.tiktok.clone())
            .unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO orders (
                order_id,
                campaign_id,
                created_at,
                influencer_email,
                influencer_name,
                influencer_phone,
                influencer_handle,
                influencer_handle_instagram,
                influencer_handle_tiktok,
                shipping_address,
                items,
                status,
                terms_consent_accepted,
                second_consent_accepted,
                marketing_opt_in_accepted,
                custom_answer
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)
            "#,
        )
            .bind(order.order_id)
            .bind(order.campaign_id)
            .bind(order.created_at)
            .bind(&order.email)
            .bind(&order.name)
            .bind(&order.phone)
            .bind(combined_handle)
            .bind(order.instagram.clone().unwrap_or_default())
            .bind(order.tiktok.clone().unwrap_or_default())
            .bind(order.shipping_address.to_storage())
            .bind(items)
            .bind(order.status)
            .bind(order.terms_consent)
            .bind(order.second_consent)
            .bind(order.marketing_opt_in)
            .bind(&order.custom_answer)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT o.*, c.name AS campaign_name
            FROM orders o
            LEFT JOIN campaigns c ON c.campaign_id = o.campaign_id
            WHERE o.order_id = $1
            "#,
        )
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        row_opt.map(|r| order_from_row(&r)).transpose()
    }

    async fn list_orders(
        &self,
        filter: &OrderFilter,
        sort: OrderSort,
        limit: i64,
    ) -> Result<Vec<Order>, Error> {
        let sql = match sort {
            OrderSort::Oldest => {
                r#"
                SELECT o.*, c.name AS campaign_name
                FROM orders o
                LEFT JOIN campaigns c ON c.campaign_id = o.campaign_id
                WHERE ($1::uuid IS NULL OR o.campaign_id = $1)
                  AND ($2::text IS NULL OR o.status = $2)
                ORDER BY o.created_at ASC
                LIMIT $3
                "#
            }
            _ => {
                r#"
                SELECT o.*, c.name AS campaign_name
                FROM orders o
                LEFT JOIN campaigns c ON c.campaign_id = o.campaign_id
                WHERE ($1::uuid IS NULL OR o.campaign_id = $1)
                  AND ($2::text IS NULL OR o.status = $2)
                ORDER BY o.created_at DESC
                LIMIT $3
                "#
            }
        };

        let rows = sqlx::query(sql)
            .bind(filter.campaign_id)
            .bind(filter.status.map(|s| s.to_string()))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let mut list = Vec::new();
        for r in rows {
            list.push(order_from_row(&r)?);
        }

        // Derived-value and email sorts happen over the fetched page:
        // value is never stored, so SQL cannot order by it.
        match sort {
            OrderSort::HighestValue => {
                list.sort_by(|a, b| b.value().total_cmp(&a.value()));
            }
            OrderSort::Email => {
                list.sort_by(|a, b| a.email.to_lowercase().cmp(&b.email.to_lowercase()));
            }
            OrderSort::Newest | OrderSort::Oldest => {}
        }

        Ok(list)
    }

    async fn find_identity_match(
        &self,
        campaign_id: Uuid,
        probe: &IdentityProbe,
        policy: &DuplicateMatchPolicy,
    ) -> Result<Option<Uuid>, Error> {
        if probe.is_empty() {
            return Ok(None);
        }

        let sql = if policy.case_insensitive {
            MATCH_SQL_CI
        } else {
            MATCH_SQL_CS
        };
        let across = policy.scope == MatchScope::AcrossCampaigns;

        let row = sqlx::query(sql)
            .bind(across)
            .bind(campaign_id)
            .bind(&probe.email)
            .bind(&probe.phone)
            .bind(&probe.instagram)
            .bind(&probe.tiktok)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(r.try_get("order_id")?)),
            None => Ok(None),
        }
    }
}
