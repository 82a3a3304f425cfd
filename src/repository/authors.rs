//! Authors repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::author::Author,
};

const AUTHOR_COLUMNS: &str = r#"
    id, last_name, first_name, middle_name, birth_date, death_date, bio,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors ORDER BY last_name, first_name",
            AUTHOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE id = $1",
            AUTHOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    pub async fn create(&self, author: &Author) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, last_name, first_name, middle_name,
                                 birth_date, death_date, bio)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(author.id)
        .bind(&author.last_name)
        .bind(&author.first_name)
        .bind(&author.middle_name)
        .bind(author.birth_date)
        .bind(author.death_date)
        .bind(&author.bio)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, author: &Author) -> AppResult<()> {
        let done = sqlx::query(
            r#"
            UPDATE authors
            SET last_name = $2, first_name = $3, middle_name = $4,
                birth_date = $5, death_date = $6, bio = $7, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(author.id)
        .bind(&author.last_name)
        .bind(&author.first_name)
        .bind(&author.middle_name)
        .bind(author.birth_date)
        .bind(author.death_date)
        .bind(&author.bio)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", author.id)));
        }

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let done = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }

        Ok(())
    }
}
