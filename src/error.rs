//! Error types for the Biblion server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Machine-readable application error codes, returned in every error body
/// so clients can branch without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchData = 4,
    BadValue = 5,
    Duplicate = 6,
    InvalidBarcode = 7,
    BarcodeExists = 8,
    InvalidLocationType = 9,
    ParentNotFound = 10,
    LocationCannotHaveParent = 11,
    LocationHasChildren = 12,
    SequenceOverflow = 13,
    SequenceNotConfigured = 14,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid barcode: {0}")]
    InvalidBarcode(String),

    /// A barcode (issued or factory) collided with one already stored.
    /// Surfaced from the storage uniqueness constraint, never from the issuer.
    #[error("Barcode already exists: {0}")]
    BarcodeExists(String),

    #[error("Invalid location type: {0}")]
    InvalidLocationType(String),

    #[error("Parent location {0} not found")]
    ParentNotFound(Uuid),

    #[error("A building cannot have a parent location")]
    LocationCannotHaveParent,

    #[error("Location {0} still has child locations")]
    LocationHasChildren(Uuid),

    /// The per-category counter ran past the 9-digit EAN-13 capacity.
    /// Terminal for the category until an operator rotates the prefix.
    #[error("Barcode sequence overflow for category '{category}' (prefix {prefix})")]
    SequenceOverflow { category: String, prefix: u16 },

    #[error("No barcode sequence configured for category '{0}'")]
    SequenceNotConfigured(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::InvalidBarcode(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidBarcode, msg.clone())
            }
            AppError::BarcodeExists(barcode) => (
                StatusCode::CONFLICT,
                ErrorCode::BarcodeExists,
                format!("Barcode {} already exists", barcode),
            ),
            AppError::InvalidLocationType(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidLocationType,
                msg.clone(),
            ),
            AppError::ParentNotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorCode::ParentNotFound,
                self.to_string(),
            ),
            AppError::LocationCannotHaveParent => (
                StatusCode::CONFLICT,
                ErrorCode::LocationCannotHaveParent,
                self.to_string(),
            ),
            AppError::LocationHasChildren(_) => (
                StatusCode::CONFLICT,
                ErrorCode::LocationHasChildren,
                self.to_string(),
            ),
            AppError::SequenceOverflow { .. } => {
                tracing::error!("{}; operator must rotate the prefix", self);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::SequenceOverflow,
                    self.to_string(),
                )
            }
            AppError::SequenceNotConfigured(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::SequenceNotConfigured,
                    self.to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
