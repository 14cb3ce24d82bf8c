//! Tour package endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::tour::{CreateTour, Tour, TourQuery, UpdateTour},
    AppState,
};

use super::AuthenticatedUser;

/// List tours, optionally filtered by category or featured flag
#[utoipa::path(
    get,
    path = "/api/v1/tours",
    tag = "tours",
    params(TourQuery),
    responses(
        (status = 200, description = "Tours, newest first", body = Vec<Tour>)
    )
)]
pub async fn list_tours(
    State(state): State<AppState>,
    Query(query): Query<TourQuery>,
) -> AppResult<Json<Vec<Tour>>> {
    let tours = state.services.tours.list(&query).await?;
    Ok(Json(tours))
}

/// Featured tours for the home page
#[utoipa::path(
    get,
    path = "/api/v1/tours/featured",
    tag = "tours",
    responses(
        (status = 200, description = "Up to six featured tours", body = Vec<Tour>)
    )
)]
pub async fn featured_tours(State(state): State<AppState>) -> AppResult<Json<Vec<Tour>>> {
    let tours = state.services.tours.featured().await?;
    Ok(Json(tours))
}

/// Tour detail page lookup
#[utoipa::path(
    get,
    path = "/api/v1/tours/slug/{slug}",
    tag = "tours",
    params(
        ("slug" = String, Path, description = "Tour slug")
    ),
    responses(
        (status = 200, description = "Tour details", body = Tour),
        (status = 404, description = "Tour not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_tour_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Tour>> {
    let tour = state.services.tours.get_by_slug(&slug).await?;
    Ok(Json(tour))
}

/// List tours in the admin area
#[utoipa::path(
    get,
    path = "/admin/tours",
    tag = "admin",
    security(("session" = [])),
    params(TourQuery),
    responses(
        (status = 200, description = "Tours, newest first", body = Vec<Tour>),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn admin_list_tours(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<TourQuery>,
) -> AppResult<Json<Vec<Tour>>> {
    let tours = state.services.tours.list(&query).await?;
    Ok(Json(tours))
}

/// Get tour by ID
#[utoipa::path(
    get,
    path = "/admin/tours/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Tour ID")
    ),
    responses(
        (status = 200, description = "Tour details", body = Tour),
        (status = 404, description = "Tour not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_tour(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Tour>> {
    let tour = state.services.tours.get_by_id(id).await?;
    Ok(Json(tour))
}

/// Create a tour
#[utoipa::path(
    post,
    path = "/admin/tours",
    tag = "admin",
    security(("session" = [])),
    request_body = CreateTour,
    responses(
        (status = 201, description = "Tour created", body = Tour),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Slug already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_tour(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateTour>,
) -> AppResult<(StatusCode, Json<Tour>)> {
    let tour = state.services.tours.create(data).await?;
    tracing::debug!(by = %claims.email, tour_id = %tour.id, "Tour created from admin");
    Ok((StatusCode::CREATED, Json(tour)))
}

/// Update a tour
#[utoipa::path(
    put,
    path = "/admin/tours/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Tour ID")
    ),
    request_body = UpdateTour,
    responses(
        (status = 200, description = "Tour updated", body = Tour),
        (status = 404, description = "Tour not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Slug already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_tour(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateTour>,
) -> AppResult<Json<Tour>> {
    let tour = state.services.tours.update(id, patch).await?;
    Ok(Json(tour))
}

/// Delete a tour and its images
#[utoipa::path(
    delete,
    path = "/admin/tours/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Tour ID")
    ),
    responses(
        (status = 204, description = "Tour deleted"),
        (status = 404, description = "Tour not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_tour(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.tours.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
