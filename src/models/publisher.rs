//! Publisher model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Publisher {
    pub id: Uuid,
    pub name: String,
    pub web_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create publisher request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePublisher {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(url(message = "web_url must be a valid URL"))]
    pub web_url: Option<String>,
}

/// Update publisher request; only supplied fields change
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePublisher {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(url(message = "web_url must be a valid URL"))]
    pub web_url: Option<String>,
}
