//! PostgreSQL implementation of the url repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for short code mappings.
///
/// Relies on the `short_urls_code_key` unique constraint: inserts use
/// `ON CONFLICT (code) DO NOTHING`, so a taken code is reported without
/// touching the existing row.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let inserted = sqlx::query_as::<_, UrlRecord>(
            r#"
            INSERT INTO short_urls (code, original_url)
            VALUES ($1, $2)
            ON CONFLICT (code) DO NOTHING
            RETURNING id, code, original_url, created_at
            "#,
        )
        .bind(&new_record.code)
        .bind(&new_record.original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        inserted.ok_or_else(|| AppError::conflict(json!({ "code": new_record.code })))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, code, original_url, created_at
            FROM short_urls
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
