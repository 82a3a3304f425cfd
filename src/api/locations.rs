//! Storage location endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::location::{CreateLocation, Location, LocationType, UpdateLocation},
};

use super::AuthenticatedUser;

/// Get location by ID
#[utoipa::path(
    get,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Location ID")
    ),
    responses(
        (status = 200, description = "Location", body = Location),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_location(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Location>> {
    let location = state.services.locations.get_by_id(id).await?;
    Ok(Json(location))
}

/// List all locations of one type
#[utoipa::path(
    get,
    path = "/locations/type/{type}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(
        ("type" = String, Path, description = "building, room, cabinet or shelf")
    ),
    responses(
        (status = 200, description = "Locations of the requested type", body = [Location]),
        (status = 400, description = "Unknown location type")
    )
)]
pub async fn list_by_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(type_str): Path<String>,
) -> AppResult<Json<Vec<Location>>> {
    let location_type: LocationType = type_str.parse()?;
    let locations = state.services.locations.get_by_type(location_type).await?;
    Ok(Json(locations))
}

/// List direct children of a location having the given type
#[utoipa::path(
    get,
    path = "/locations/{id}/children/{type}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Parent location ID"),
        ("type" = String, Path, description = "Child location type")
    ),
    responses(
        (status = 200, description = "Child locations", body = [Location]),
        (status = 400, description = "Type is not a direct child type of the parent"),
        (status = 404, description = "Parent not found")
    )
)]
pub async fn list_children(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path((id, type_str)): Path<(Uuid, String)>,
) -> AppResult<Json<Vec<Location>>> {
    let child_type: LocationType = type_str.parse()?;
    let locations = state.services.locations.get_children(id, child_type).await?;
    Ok(Json(locations))
}

/// Look up a location by its EAN-13 barcode
#[utoipa::path(
    get,
    path = "/locations/barcode/{barcode}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(
        ("barcode" = String, Path, description = "EAN-13 barcode")
    ),
    responses(
        (status = 200, description = "Location", body = Location),
        (status = 400, description = "Malformed barcode"),
        (status = 404, description = "No location with this barcode")
    )
)]
pub async fn get_by_barcode(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(barcode): Path<String>,
) -> AppResult<Json<Location>> {
    let location = state.services.locations.get_by_barcode(&barcode).await?;
    Ok(Json(location))
}

/// Create a location; the hierarchy is validated and a barcode issued
#[utoipa::path(
    post,
    path = "/locations",
    tag = "locations",
    security(("bearer_auth" = [])),
    request_body = CreateLocation,
    responses(
        (status = 201, description = "Location created", body = Location),
        (status = 400, description = "Invalid input or hierarchy violation"),
        (status = 404, description = "Parent not found"),
        (status = 409, description = "A building cannot have a parent")
    )
)]
pub async fn create_location(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = state.services.locations.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a location; re-parenting is re-validated against the hierarchy
#[utoipa::path(
    put,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Location ID")
    ),
    request_body = UpdateLocation,
    responses(
        (status = 200, description = "Location updated", body = Location),
        (status = 404, description = "Location or new parent not found"),
        (status = 409, description = "A building cannot have a parent")
    )
)]
pub async fn update_location(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLocation>,
) -> AppResult<Json<Location>> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = state.services.locations.update(id, request).await?;
    Ok(Json(updated))
}

/// Delete a location without children
#[utoipa::path(
    delete,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Location ID")
    ),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 404, description = "Location not found"),
        (status = 409, description = "Location still has children")
    )
)]
pub async fn delete_location(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.locations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
