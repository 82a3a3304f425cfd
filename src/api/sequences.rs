//! Barcode sequence administration endpoints
//!
//! Rotating a prefix is how an operator recovers a category from sequence
//! overflow; the counter itself is never edited through the API.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::barcode::{BarcodeCategory, BarcodeSequence, SetPrefixRequest},
};

use super::AuthenticatedUser;

/// Inspect the counter row for a barcode category
#[utoipa::path(
    get,
    path = "/sequences/{category}",
    tag = "sequences",
    security(("bearer_auth" = [])),
    params(
        ("category" = String, Path, description = "book or location")
    ),
    responses(
        (status = 200, description = "Sequence state", body = BarcodeSequence),
        (status = 400, description = "Unknown category")
    )
)]
pub async fn get_sequence(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(category_str): Path<String>,
) -> AppResult<Json<BarcodeSequence>> {
    claims.require_admin()?;

    let category: BarcodeCategory = category_str.parse()?;
    let sequence = state.services.barcode_sequence(category).await?;
    Ok(Json(sequence))
}

/// Rotate or describe the prefix for a barcode category
#[utoipa::path(
    put,
    path = "/sequences/{category}/prefix",
    tag = "sequences",
    security(("bearer_auth" = [])),
    params(
        ("category" = String, Path, description = "book or location")
    ),
    request_body = SetPrefixRequest,
    responses(
        (status = 200, description = "Prefix updated", body = BarcodeSequence),
        (status = 400, description = "Prefix outside the configured range")
    )
)]
pub async fn set_prefix(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(category_str): Path<String>,
    Json(request): Json<SetPrefixRequest>,
) -> AppResult<Json<BarcodeSequence>> {
    claims.require_admin()?;

    let category: BarcodeCategory = category_str.parse()?;
    state
        .services
        .barcode
        .set_prefix(
            category,
            request.prefix,
            request.description.as_deref().unwrap_or(""),
        )
        .await?;

    let sequence = state.services.barcode_sequence(category).await?;
    Ok(Json(sequence))
}
