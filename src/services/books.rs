//! Catalog service for books

use chrono::Utc;
use uuid::Uuid;

use crate::{
    barcode,
    error::{AppError, AppResult},
    models::{
        barcode::BarcodeCategory,
        book::{Book, BookDetails, BookQuery, CreateBook, UpdateBook},
    },
    repository::Repository,
    services::barcode::BarcodeService,
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
    barcode: BarcodeService,
}

impl BookService {
    pub fn new(repository: Repository, barcode: BarcodeService) -> Self {
        Self { repository, barcode }
    }

    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.search(query).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<BookDetails> {
        self.repository
            .books
            .get_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Create a book: an internal EAN-13 is always issued; a factory
    /// barcode, when supplied, must itself be a valid EAN-13. Collisions
    /// with stored barcodes surface as `BarcodeExists` from the insert.
    pub async fn create(&self, request: CreateBook) -> AppResult<Book> {
        if request.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }

        if let Some(ref factory) = request.factory_barcode {
            if !barcode::validate(factory) {
                return Err(AppError::InvalidBarcode(factory.clone()));
            }
        }

        let ean13 = self.barcode.issue(BarcodeCategory::Book).await?;
        let now = Utc::now();

        let book = Book {
            id: Uuid::new_v4(),
            title: request.title,
            barcode: ean13,
            factory_barcode: request.factory_barcode,
            publisher_id: request.publisher_id,
            location_id: request.location_id,
            year: request.year,
            description: request.description,
            extra: request.extra,
            created_at: now,
            updated_at: now,
        };

        self.repository.books.create(&book, &request.work_ids).await?;

        tracing::info!("created book '{}' with barcode {}", book.title, book.barcode);

        Ok(book)
    }

    pub async fn update(&self, id: Uuid, updates: UpdateBook) -> AppResult<Book> {
        let mut book = self
            .repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        if let Some(title) = updates.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title must not be empty".to_string()));
            }
            book.title = title;
        }

        if let Some(factory) = updates.factory_barcode {
            if !barcode::validate(&factory) {
                return Err(AppError::InvalidBarcode(factory));
            }
            book.factory_barcode = Some(factory);
        }

        if let Some(publisher_id) = updates.publisher_id {
            book.publisher_id = Some(publisher_id);
        }
        if let Some(location_id) = updates.location_id {
            book.location_id = Some(location_id);
        }
        if let Some(year) = updates.year {
            book.year = Some(year);
        }
        if let Some(description) = updates.description {
            book.description = Some(description);
        }
        if let Some(extra) = updates.extra {
            book.extra = extra;
        }

        self.repository
            .books
            .update(&book, updates.work_ids.as_deref())
            .await?;

        Ok(book)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Resolve a scanned value to a book. Accepts an issued or factory
    /// EAN-13, or a book UUID typed in by hand.
    pub async fn find_by_scan(&self, value: &str) -> AppResult<BookDetails> {
        let value = value.trim();

        let book = if barcode::validate(value) {
            self.repository.books.get_by_barcode(value).await?
        } else if let Ok(id) = Uuid::parse_str(value) {
            self.repository.books.get_by_id(id).await?
        } else {
            return Err(AppError::InvalidBarcode(value.to_string()));
        };

        let book = book.ok_or_else(|| AppError::NotFound(format!("No book for '{}'", value)))?;
        self.get(book.id).await
    }
}
