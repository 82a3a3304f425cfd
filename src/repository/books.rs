//! Books repository for database operations

use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDetails, BookQuery, LocationPath, PublisherRef, WorkRef},
    repository::constraint_code,
};

const BOOK_COLUMNS: &str = r#"
    id, title, barcode, factory_barcode, publisher_id, location_id,
    year, description, extra, created_at, updated_at
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let pattern = query
            .query
            .as_deref()
            .map(|q| format!("%{}%", q.trim()))
            .unwrap_or_else(|| "%".to_string());

        let books = sqlx::query_as::<_, Book>(&format!(
            r#"
            SELECT {}
            FROM books
            WHERE title ILIKE $1
            ORDER BY title
            LIMIT $2 OFFSET $3
            "#,
            BOOK_COLUMNS
        ))
        .bind(&pattern)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query("SELECT COUNT(*) FROM books WHERE title ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?
            .try_get(0)?;

        Ok((books, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Find a book by issued or factory barcode.
    pub async fn get_by_barcode(&self, barcode: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE barcode = $1 OR factory_barcode = $1",
            BOOK_COLUMNS
        ))
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Book with publisher, linked works and the resolved shelf-to-building
    /// storage path.
    pub async fn get_details(&self, id: Uuid) -> AppResult<Option<BookDetails>> {
        let Some(book) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let publisher = match book.publisher_id {
            Some(pid) => {
                sqlx::query_as::<_, PublisherRef>("SELECT id, name FROM publishers WHERE id = $1")
                    .bind(pid)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let works = sqlx::query_as::<_, WorkRef>(
            r#"
            SELECT w.id, w.title
            FROM works w
            JOIN book_works bw ON bw.work_id = w.id
            WHERE bw.book_id = $1
            ORDER BY w.title
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let location = match book.location_id {
            Some(lid) => self.get_location_path(lid).await?,
            None => None,
        };

        Ok(Some(BookDetails {
            book,
            publisher,
            works,
            location,
        }))
    }

    /// Walk the shelf up to its building. Returns `None` when the location
    /// is not a fully parented shelf (the hierarchy validator makes that
    /// impossible for newly written rows).
    async fn get_location_path(&self, shelf_id: Uuid) -> AppResult<Option<LocationPath>> {
        let path = sqlx::query_as::<_, LocationPath>(
            r#"
            SELECT s.id   AS shelf_id,    s.name AS shelf_name,
                   c.id   AS cabinet_id,  c.name AS cabinet_name,
                   r.id   AS room_id,     r.name AS room_name,
                   b.id   AS building_id, b.name AS building_name,
                   COALESCE(b.address, '') AS address
            FROM locations s
            JOIN locations c ON s.parent_id = c.id
            JOIN locations r ON c.parent_id = r.id
            JOIN locations b ON r.parent_id = b.id
            WHERE s.id = $1 AND s.type = 'shelf'
            "#,
        )
        .bind(shelf_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(path)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Insert a book and its work links in one transaction.
    pub async fn create(&self, book: &Book, work_ids: &[Uuid]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO books (id, title, barcode, factory_barcode, publisher_id,
                               location_id, year, description, extra)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.barcode)
        .bind(&book.factory_barcode)
        .bind(book.publisher_id)
        .bind(book.location_id)
        .bind(book.year)
        .bind(&book.description)
        .bind(&book.extra)
        .execute(&mut *tx)
        .await;

        if let Err(e) = result {
            return Err(match constraint_code(&e) {
                Some("unique") => AppError::BarcodeExists(book.barcode.clone()),
                _ => e.into(),
            });
        }

        for work_id in work_ids {
            sqlx::query("INSERT INTO book_works (book_id, work_id) VALUES ($1, $2)")
                .bind(book.id)
                .bind(work_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Update a book; when `work_ids` is supplied the links are replaced in
    /// the same transaction.
    pub async fn update(&self, book: &Book, work_ids: Option<&[Uuid]>) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, factory_barcode = $3, publisher_id = $4,
                location_id = $5, year = $6, description = $7, extra = $8,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.factory_barcode)
        .bind(book.publisher_id)
        .bind(book.location_id)
        .bind(book.year)
        .bind(&book.description)
        .bind(&book.extra)
        .execute(&mut *tx)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => {
                return Err(AppError::NotFound(format!("Book {} not found", book.id)));
            }
            Ok(_) => {}
            Err(e) => {
                return Err(match constraint_code(&e) {
                    Some("unique") => AppError::BarcodeExists(
                        book.factory_barcode.clone().unwrap_or_default(),
                    ),
                    _ => e.into(),
                });
            }
        }

        if let Some(work_ids) = work_ids {
            sqlx::query("DELETE FROM book_works WHERE book_id = $1")
                .bind(book.id)
                .execute(&mut *tx)
                .await?;

            for work_id in work_ids {
                sqlx::query("INSERT INTO book_works (book_id, work_id) VALUES ($1, $2)")
                    .bind(book.id)
                    .bind(work_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let done = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        Ok(())
    }
}
