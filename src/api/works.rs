//! Work endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::work::{CreateWork, UpdateWork, Work},
};

use super::AuthenticatedUser;

/// List all works (reference data)
#[utoipa::path(
    get,
    path = "/works",
    tag = "works",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All works", body = [Work])
    )
)]
pub async fn list_works(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Work>>> {
    let works = state.services.works.get_all().await?;
    Ok(Json(works))
}

/// Get work by ID
#[utoipa::path(
    get,
    path = "/works/{id}",
    tag = "works",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Work ID")
    ),
    responses(
        (status = 200, description = "Work", body = Work),
        (status = 404, description = "Work not found")
    )
)]
pub async fn get_work(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Work>> {
    let work = state.services.works.get_by_id(id).await?;
    Ok(Json(work))
}

/// Create a new work
#[utoipa::path(
    post,
    path = "/works",
    tag = "works",
    security(("bearer_auth" = [])),
    request_body = CreateWork,
    responses(
        (status = 201, description = "Work created", body = Work),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_work(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateWork>,
) -> AppResult<(StatusCode, Json<Work>)> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = state.services.works.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing work
#[utoipa::path(
    put,
    path = "/works/{id}",
    tag = "works",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Work ID")
    ),
    request_body = UpdateWork,
    responses(
        (status = 200, description = "Work updated", body = Work),
        (status = 404, description = "Work not found")
    )
)]
pub async fn update_work(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateWork>,
) -> AppResult<Json<Work>> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = state.services.works.update(id, request).await?;
    Ok(Json(updated))
}

/// Delete a work
#[utoipa::path(
    delete,
    path = "/works/{id}",
    tag = "works",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Work ID")
    ),
    responses(
        (status = 204, description = "Work deleted"),
        (status = 404, description = "Work not found")
    )
)]
pub async fn delete_work(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.works.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
