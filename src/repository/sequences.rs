//! Barcode sequence repository
//!
//! Owns the per-category counter rows. The increment is a single
//! `UPDATE ... RETURNING`, so concurrent callers (including other server
//! processes) each observe a distinct, strictly increasing value with no
//! read-then-write gap. No in-process lock is involved or needed.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::barcode::{BarcodeCategory, BarcodeSequence},
    services::barcode::SequenceStore,
};

#[derive(Clone)]
pub struct SequencesRepository {
    pool: Pool<Postgres>,
}

impl SequencesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Read a counter row without consuming a value (administrative view).
    pub async fn get(&self, category: BarcodeCategory) -> AppResult<BarcodeSequence> {
        sqlx::query_as::<_, BarcodeSequence>(
            r#"
            SELECT category, prefix, last_value, description, updated_at
            FROM barcode_sequences
            WHERE category = $1
            "#,
        )
        .bind(category)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::SequenceNotConfigured(category.to_string()))
    }
}

#[async_trait]
impl SequenceStore for SequencesRepository {
    /// Atomically increment and read back the counter for `category`.
    ///
    /// A missing row is a configuration error: the bootstrap migration seeds
    /// one row per category, so this is fatal rather than retriable.
    async fn get_next(&self, category: BarcodeCategory) -> AppResult<(u64, u16)> {
        let row = sqlx::query(
            r#"
            UPDATE barcode_sequences
            SET last_value = last_value + 1, updated_at = NOW()
            WHERE category = $1
            RETURNING last_value, prefix
            "#,
        )
        .bind(category)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::SequenceNotConfigured(category.to_string()))?;

        let sequence: i64 = row.try_get("last_value")?;
        let prefix: i16 = row.try_get("prefix")?;
        Ok((sequence as u64, prefix as u16))
    }

    /// Rotate or (re)configure the prefix for a category. The counter value
    /// is left untouched; rotating the prefix is how an operator recovers
    /// from sequence overflow.
    async fn set_prefix(
        &self,
        category: BarcodeCategory,
        prefix: u16,
        description: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO barcode_sequences (category, prefix, last_value, description)
            VALUES ($1, $2, 0, $3)
            ON CONFLICT (category)
            DO UPDATE SET
                prefix = EXCLUDED.prefix,
                description = EXCLUDED.description,
                updated_at = NOW()
            "#,
        )
        .bind(category)
        .bind(prefix as i16)
        .bind(description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
