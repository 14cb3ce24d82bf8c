//! Destination endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::destination::{CreateDestination, Destination, UpdateDestination},
    AppState,
};

use super::AuthenticatedUser;

/// List destinations
#[utoipa::path(
    get,
    path = "/api/v1/destinations",
    tag = "destinations",
    responses(
        (status = 200, description = "All destinations", body = Vec<Destination>)
    )
)]
pub async fn list_destinations(State(state): State<AppState>) -> AppResult<Json<Vec<Destination>>> {
    let destinations = state.services.destinations.list().await?;
    Ok(Json(destinations))
}

#[utoipa::path(
    get,
    path = "/admin/destinations",
    tag = "admin",
    security(("session" = [])),
    responses(
        (status = 200, description = "All destinations", body = Vec<Destination>),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn admin_list_destinations(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Destination>>> {
    let destinations = state.services.destinations.list().await?;
    Ok(Json(destinations))
}

#[utoipa::path(
    get,
    path = "/admin/destinations/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Destination ID")
    ),
    responses(
        (status = 200, description = "Destination details", body = Destination),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_destination(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Destination>> {
    let destination = state.services.destinations.get_by_id(id).await?;
    Ok(Json(destination))
}

#[utoipa::path(
    post,
    path = "/admin/destinations",
    tag = "admin",
    security(("session" = [])),
    request_body = CreateDestination,
    responses(
        (status = 201, description = "Destination created", body = Destination),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Name already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_destination(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateDestination>,
) -> AppResult<(StatusCode, Json<Destination>)> {
    let destination = state.services.destinations.create(data).await?;
    Ok((StatusCode::CREATED, Json(destination)))
}

#[utoipa::path(
    put,
    path = "/admin/destinations/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Destination ID")
    ),
    request_body = UpdateDestination,
    responses(
        (status = 200, description = "Destination updated", body = Destination),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_destination(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateDestination>,
) -> AppResult<Json<Destination>> {
    let destination = state.services.destinations.update(id, patch).await?;
    Ok(Json(destination))
}

#[utoipa::path(
    delete,
    path = "/admin/destinations/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Destination ID")
    ),
    responses(
        (status = 204, description = "Destination deleted"),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_destination(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.destinations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
