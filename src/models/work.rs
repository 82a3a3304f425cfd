//! Work (intellectual creation) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A work is the intellectual content (a novel, a treatise) that one or
/// more physical books contain.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Work {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create work request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateWork {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    #[serde(default)]
    pub author_ids: Vec<Uuid>,
}

/// Update work request; only supplied fields change
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateWork {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub author_ids: Option<Vec<Uuid>>,
}
