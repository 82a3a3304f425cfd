//! Publishers repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::publisher::Publisher,
};

#[derive(Clone)]
pub struct PublishersRepository {
    pool: Pool<Postgres>,
}

impl PublishersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Publisher>> {
        let publishers = sqlx::query_as::<_, Publisher>(
            "SELECT id, name, web_url, created_at, updated_at FROM publishers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(publishers)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Publisher>> {
        let publisher = sqlx::query_as::<_, Publisher>(
            "SELECT id, name, web_url, created_at, updated_at FROM publishers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(publisher)
    }

    pub async fn create(&self, publisher: &Publisher) -> AppResult<()> {
        sqlx::query("INSERT INTO publishers (id, name, web_url) VALUES ($1, $2, $3)")
            .bind(publisher.id)
            .bind(&publisher.name)
            .bind(&publisher.web_url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update(&self, publisher: &Publisher) -> AppResult<()> {
        let done = sqlx::query(
            "UPDATE publishers SET name = $2, web_url = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(publisher.id)
        .bind(&publisher.name)
        .bind(&publisher.web_url)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Publisher {} not found",
                publisher.id
            )));
        }

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let done = sqlx::query("DELETE FROM publishers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Publisher {} not found", id)));
        }

        Ok(())
    }
}
