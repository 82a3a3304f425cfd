//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A physical book in the catalog.
///
/// `barcode` is always an issued EAN-13; `factory_barcode` is an optional
/// manufacturer code entered by staff. Both are unique at the storage level.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub barcode: String,
    pub factory_barcode: Option<String>,
    pub publisher_id: Option<Uuid>,
    /// Shelf the book is stored on
    pub location_id: Option<Uuid>,
    pub year: Option<i32>,
    pub description: Option<String>,
    #[serde(default)]
    pub extra: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short work reference embedded in book details
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorkRef {
    pub id: Uuid,
    pub title: String,
}

/// Short publisher reference embedded in book details
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PublisherRef {
    pub id: Uuid,
    pub name: String,
}

/// Resolved storage path of a shelved book, shelf up to building
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LocationPath {
    pub shelf_id: Uuid,
    pub shelf_name: String,
    pub cabinet_id: Uuid,
    pub cabinet_name: String,
    pub room_id: Uuid,
    pub room_name: String,
    pub building_id: Uuid,
    pub building_name: String,
    pub address: String,
}

/// Book with its joined references, returned by detail endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub publisher: Option<PublisherRef>,
    pub works: Vec<WorkRef>,
    pub location: Option<LocationPath>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    /// Manufacturer barcode; must be a valid EAN-13 when present
    pub factory_barcode: Option<String>,
    pub publisher_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub year: Option<i32>,
    pub description: Option<String>,
    #[serde(default)]
    pub extra: serde_json::Value,
    #[serde(default)]
    pub work_ids: Vec<Uuid>,
}

/// Update book request; only supplied fields change
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub factory_barcode: Option<String>,
    pub publisher_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub extra: Option<serde_json::Value>,
    pub work_ids: Option<Vec<Uuid>>,
}

/// Book list query parameters
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookQuery {
    /// Substring match against the title
    pub query: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl BookQuery {
    pub fn limit(&self) -> i64 {
        self.per_page.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page.unwrap_or(1).max(1) - 1) * self.limit()
    }
}
