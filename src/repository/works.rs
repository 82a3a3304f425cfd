//! Works repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::work::Work,
};

#[derive(Clone)]
pub struct WorksRepository {
    pool: Pool<Postgres>,
}

impl WorksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Work>> {
        let works = sqlx::query_as::<_, Work>(
            "SELECT id, title, description, year, created_at, updated_at FROM works ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(works)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Work>> {
        let work = sqlx::query_as::<_, Work>(
            "SELECT id, title, description, year, created_at, updated_at FROM works WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(work)
    }

    /// Insert a work and its author links in one transaction.
    pub async fn create(&self, work: &Work, author_ids: &[Uuid]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO works (id, title, description, year) VALUES ($1, $2, $3, $4)",
        )
        .bind(work.id)
        .bind(&work.title)
        .bind(&work.description)
        .bind(work.year)
        .execute(&mut *tx)
        .await?;

        for author_id in author_ids {
            sqlx::query("INSERT INTO work_authors (work_id, author_id) VALUES ($1, $2)")
                .bind(work.id)
                .bind(author_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn update(&self, work: &Work, author_ids: Option<&[Uuid]>) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let done = sqlx::query(
            r#"
            UPDATE works
            SET title = $2, description = $3, year = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(work.id)
        .bind(&work.title)
        .bind(&work.description)
        .bind(work.year)
        .execute(&mut *tx)
        .await?;

        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Work {} not found", work.id)));
        }

        if let Some(author_ids) = author_ids {
            sqlx::query("DELETE FROM work_authors WHERE work_id = $1")
                .bind(work.id)
                .execute(&mut *tx)
                .await?;

            for author_id in author_ids {
                sqlx::query("INSERT INTO work_authors (work_id, author_id) VALUES ($1, $2)")
                    .bind(work.id)
                    .bind(author_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let done = sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Work {} not found", id)));
        }

        Ok(())
    }
}
