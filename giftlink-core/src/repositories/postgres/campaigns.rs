// File: giftlink-core/src/repositories/postgres/campaigns.rs

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use giftlink_common::error::Error;
use giftlink_common::models::campaign::{Campaign, CampaignConfig, CampaignConfigRow, CampaignStatus};
use giftlink_common::traits::repository_traits::CampaignRepository;

pub struct PostgresCampaignRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresCampaignRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Rule columns are read through `Option` with a final `unwrap_or(None)`:
/// a NULL, a missing column, or a badly typed value all land on the config
/// defaults instead of failing the read.
fn campaign_from_row(r: &PgRow) -> Result<Campaign, Error> {
    let config_row = CampaignConfigRow {
        selected_product_ids: r
            .try_get::<Option<Vec<String>>, _>("selected_product_ids")
            .unwrap_or(None),
        item_limit: r.try_get::<Option<i32>, _>("item_limit").unwrap_or(None),
        order_limit_per_link: r
            .try_get::<Option<i32>, _>("order_limit_per_link")
            .unwrap_or(None),
        max_cart_value: r.try_get::<Option<f64>, _>("max_cart_value").unwrap_or(None),
        block_duplicate_orders: r
            .try_get::<Option<bool>, _>("block_duplicate_orders")
            .unwrap_or(None),
        shipping_zone: r.try_get::<Option<String>, _>("shipping_zone").unwrap_or(None),
        restricted_countries: r
            .try_get::<Option<String>, _>("restricted_countries")
            .unwrap_or(None),
        show_phone_field: r.try_get::<Option<bool>, _>("show_phone_field").unwrap_or(None),
        show_instagram_field: r
            .try_get::<Option<bool>, _>("show_instagram_field")
            .unwrap_or(None),
        show_tiktok_field: r
            .try_get::<Option<bool>, _>("show_tiktok_field")
            .unwrap_or(None),
        ask_custom_question: r
            .try_get::<Option<bool>, _>("ask_custom_question")
            .unwrap_or(None),
        custom_question_label: r
            .try_get::<Option<String>, _>("custom_question_label")
            .unwrap_or(None),
        custom_question_required: r
            .try_get::<Option<bool>, _>("custom_question_required")
            .unwrap_or(None),
        show_consent_checkbox: r
            .try_get::<Option<bool>, _>("show_consent_checkbox")
            .unwrap_or(None),
        terms_consent_text: r
            .try_get::<Option<String>, _>("terms_consent_text")
            .unwrap_or(None),
        require_second_consent: r
            .try_get::<Option<bool>, _>("require_second_consent")
            .unwrap_or(None),
        second_consent_text: r
            .try_get::<Option<String>, _>("second_consent_text")
            .unwrap_or(None),
        marketing_opt_in: r.try_get::<Option<bool>, _>("marketing_opt_in").unwrap_or(None),
        marketing_opt_in_text: r
            .try_get::<Option<String>, _>("marketing_opt_in_text")
            .unwrap_or(None),
        grid_layout: r.try_get::<Option<bool>, _>("grid_layout").unwrap_or(None),
        show_sold_out: r.try_get::<Option<bool>, _>("show_sold_out").unwrap_or(None),
        visit_store_url: r.try_get::<Option<String>, _>("visit_store_url").unwrap_or(None),
        visit_store_label: r
            .try_get::<Option<String>, _>("visit_store_label")
            .unwrap_or(None),
        submit_button_label: r
            .try_get::<Option<String>, _>("submit_button_label")
            .unwrap_or(None),
    };

    let status: Option<String> = r.try_get::<Option<String>, _>("status").unwrap_or(None);

    Ok(Campaign {
        campaign_id: r.try_get("campaign_id")?,
        name: r.try_get("name")?,
        slug: r.try_get("slug")?,
        welcome_message: r.try_get("welcome_message")?,
        brand_color: r.try_get("brand_color")?,
        brand_logo: r.try_get::<Option<String>, _>("brand_logo").unwrap_or(None),
        config: CampaignConfig::from_row(config_row),
        status: status.map(Into::into).unwrap_or_default(),
        claims: r.try_get::<Option<i32>, _>("claims").unwrap_or(None).unwrap_or(0),
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl CampaignRepository for PostgresCampaignRepository {
    async fn create_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
        let row = campaign.config.to_row();
        sqlx::query(
            r#"
            INSERT INTO campaigns (
                campaign_id,
                name,
                slug,
                welcome_message,
                brand_color,
                brand_logo,
                status,
                claims,
                created_at,
                selected_product_ids,
                item_limit,
                order_limit_per_link,
                max_cart_value,
                block_duplicate_orders,
                shipping_zone,
                restricted_countries,
                show_phone_field,
                show_instagram_field,
                show_tiktok_field,
                ask_custom_question,
                custom_question_label,
                custom_question_required,
                show_consent_checkbox,
                terms_consent_text,
                require_second_consent,
                second_consent_text,
                marketing_opt_in,
                marketing_opt_in_text,
                grid_layout,
                show_sold_out,
                visit_store_url,
                visit_store_label,
                submit_button_label
            )
            VALUES (
                $1,$2,$3,$4,$5,$6,$7,$8,$9,$10,
                $11,$12,$13,$14,$15,$16,$17,$18,$19,$20,
                $21,$22,$23,$24,$25,$26,$27,$28,$29,$30,
                $31,$32,$33
            )
            "#,
        )
            .bind(campaign.campaign_id)
            .bind(&campaign.name)
            .bind(&campaign.slug)
            .bind(&campaign.welcome_message)
            .bind(&campaign.brand_color)
            .bind(&campaign.brand_logo)
            .bind(campaign.status)
            .bind(campaign.claims)
            .bind(campaign.created_at)
            .bind(&row.selected_product_ids)
            .bind(row.item_limit)
            .bind(row.order_limit_per_link)
            .bind(row.max_cart_value)
            .bind(row.block_duplicate_orders)
            .bind(&row.shipping_zone)
            .bind(&row.restricted_countries)
            .bind(row.show_phone_field)
            .bind(row.show_instagram_field)
            .bind(row.show_tiktok_field)
            .bind(row.ask_custom_question)
            .bind(&row.custom_question_label)
            .bind(row.custom_question_required)
            .bind(row.show_consent_checkbox)
            .bind(&row.terms_consent_text)
            .bind(row.require_second_consent)
            .bind(&row.second_consent_text)
            .bind(row.marketing_opt_in)
            .bind(&row.marketing_opt_in_text)
            .bind(row.grid_layout)
            .bind(row.show_sold_out)
            .bind(&row.visit_store_url)
            .bind(&row.visit_store_label)
            .bind(&row.submit_button_label)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_campaign(&self, campaign_id: Uuid) -> Result<Option<Campaign>, Error> {
        let row_opt = sqlx::query("SELECT * FROM campaigns WHERE campaign_id = $1")
            .bind(campaign_id)
            .fetch_optional(&self.pool)
            .await?;

        row_opt.map(|r| campaign_from_row(&r)).transpose()
    }

    async fn get_campaign_by_slug(&self, slug: &str) -> Result<Option<Campaign>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT * FROM campaigns
            WHERE slug = $1
              AND status <> 'archived'
            "#,
        )
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row_opt.map(|r| campaign_from_row(&r)).transpose()
    }

    async fn list_campaigns(&self, include_archived: bool) -> Result<Vec<Campaign>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM campaigns
            WHERE ($1 OR status <> 'archived')
            ORDER BY created_at DESC
            "#,
        )
            .bind(include_archived)
            .fetch_all(&self.pool)
            .await?;

        let mut list = Vec::new();
        for r in rows {
            list.push(campaign_from_row(&r)?);
        }
        Ok(list)
    }

    async fn archive_campaign(&self, campaign_id: Uuid) -> Result<(), Error> {
        sqlx::query("UPDATE campaigns SET status = $1 WHERE campaign_id = $2")
            .bind(CampaignStatus::Archived)
            .bind(campaign_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn increment_claims(&self, campaign_id: Uuid) -> Result<(), Error> {
        sqlx::query("UPDATE campaigns SET claims = claims + 1 WHERE campaign_id = $1")
            .bind(campaign_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, Error> {
        let row = sqlx::query("SELECT 1 AS hit FROM campaigns WHERE slug = $1 LIMIT 1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}
