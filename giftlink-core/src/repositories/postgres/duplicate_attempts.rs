// File: giftlink-core/src/repositories/postgres/duplicate_attempts.rs

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use giftlink_common::error::Error;
use giftlink_common::models::duplicate::{AttemptPayload, DuplicateAttempt, DuplicateDecision};
use giftlink_common::traits::repository_traits::DuplicateAttemptRepository;

pub struct PostgresDuplicateAttemptRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresDuplicateAttemptRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// The triage decision rides inside the payload JSON rather than in its
/// own column, so attempts written before triage existed simply read back
/// as pending.
fn info_with_decision(
    payload: &AttemptPayload,
    decision: DuplicateDecision,
) -> Result<JsonValue, Error> {
    let mut info = serde_json::to_value(payload)?;
    if let Some(obj) = info.as_object_mut() {
        obj.insert(
            "decision".to_string(),
            JsonValue::String(decision.to_string()),
        );
    }
    Ok(info)
}

fn attempt_from_row(r: &PgRow) -> Result<DuplicateAttempt, Error> {
    let info: Option<JsonValue> = r
        .try_get::<Option<JsonValue>, _>("influencer_info")
        .unwrap_or(None);

    // Accept an object, a JSON string wrapping one, or garbage (which
    // yields an empty payload rather than a failed row).
    let value = match info {
        Some(JsonValue::String(s)) => serde_json::from_str(&s).unwrap_or(JsonValue::Null),
        Some(v) => v,
        None => JsonValue::Null,
    };

    let decision = value
        .get("decision")
        .and_then(JsonValue::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    let payload: AttemptPayload = serde_json::from_value(value).unwrap_or_default();

    Ok(DuplicateAttempt {
        attempt_id: r.try_get("attempt_id")?,
        campaign_id: r.try_get("campaign_id")?,
        campaign_name: r
            .try_get::<Option<String>, _>("campaign_name")
            .unwrap_or(None)
            .unwrap_or_else(|| "Standard Campaign".to_string()),
        payload,
        decision,
        reason: r
            .try_get::<Option<String>, _>("reason")
            .unwrap_or(None)
            .unwrap_or_else(|| DuplicateAttempt::DEFAULT_REASON.to_string()),
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl DuplicateAttemptRepository for PostgresDuplicateAttemptRepository {
    async fn create_attempt(&self, attempt: &DuplicateAttempt) -> Result<(), Error> {
        let info = info_with_decision(&attempt.payload, attempt.decision)?;

        sqlx::query(
            r#"
            INSERT INTO duplicate_attempts (
                attempt_id, campaign_id, influencer_info, reason, created_at
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
            .bind(attempt.attempt_id)
            .bind(attempt.campaign_id)
            .bind(info)
            .bind(&attempt.reason)
            .bind(attempt.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_attempt(&self, attempt_id: Uuid) -> Result<Option<DuplicateAttempt>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT a.*, c.name AS campaign_name
            FROM duplicate_attempts a
            LEFT JOIN campaigns c ON c.campaign_id = a.campaign_id
            WHERE a.attempt_id = $1
            "#,
        )
            .bind(attempt_id)
            .fetch_optional(&self.pool)
            .await?;

        row_opt.map(|r| attempt_from_row(&r)).transpose()
    }

    async fn list_attempts(&self, limit: i64) -> Result<Vec<DuplicateAttempt>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT a.*, c.name AS campaign_name
            FROM duplicate_attempts a
            LEFT JOIN campaigns c ON c.campaign_id = a.campaign_id
            ORDER BY a.created_at DESC
            LIMIT $1
            "#,
        )
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let mut list = Vec::new();
        for r in rows {
            list.push(attempt_from_row(&r)?);
        }
        Ok(list)
    }

    async fn set_decision(
        &self,
        attempt_id: Uuid,
        decision: DuplicateDecision,
    ) -> Result<(), Error> {
        // Read-modify-write: the decision lives inside the JSON payload,
        // so the whole blob is rewritten with the new tag.
        let attempt = self
            .get_attempt(attempt_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Duplicate attempt '{}'", attempt_id)))?;

        let info = info_with_decision(&attempt.payload, decision)?;

        sqlx::query(
            r#"
            UPDATE duplicate_attempts
            SET influencer_info = $2
            WHERE attempt_id = $1
            "#,
        )
            .bind(attempt_id)
            .bind(info)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_attempt(&self, attempt_id: Uuid) -> Result<(), Error> {
        sqlx::query("DELETE FROM duplicate_attempts WHERE attempt_id = $1")
            .bind(attempt_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
