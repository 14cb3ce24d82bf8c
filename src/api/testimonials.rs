//! Testimonial endpoints and moderation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::testimonial::{CreateTestimonial, SetApproval, Testimonial, UpdateTestimonial},
    AppState,
};

use super::AuthenticatedUser;

/// Approved testimonials for the public site
#[utoipa::path(
    get,
    path = "/api/v1/testimonials",
    tag = "testimonials",
    responses(
        (status = 200, description = "Approved testimonials", body = Vec<Testimonial>)
    )
)]
pub async fn list_approved_testimonials(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Testimonial>>> {
    let testimonials = state.services.testimonials.list_approved().await?;
    Ok(Json(testimonials))
}

/// Every testimonial, approved or not
#[utoipa::path(
    get,
    path = "/admin/testimonials",
    tag = "admin",
    security(("session" = [])),
    responses(
        (status = 200, description = "All testimonials", body = Vec<Testimonial>),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_all_testimonials(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Testimonial>>> {
    let testimonials = state.services.testimonials.list_all().await?;
    Ok(Json(testimonials))
}

#[utoipa::path(
    get,
    path = "/admin/testimonials/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Testimonial ID")
    ),
    responses(
        (status = 200, description = "Testimonial", body = Testimonial),
        (status = 404, description = "Testimonial not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_testimonial(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Testimonial>> {
    let testimonial = state.services.testimonials.get_by_id(id).await?;
    Ok(Json(testimonial))
}

#[utoipa::path(
    post,
    path = "/admin/testimonials",
    tag = "admin",
    security(("session" = [])),
    request_body = CreateTestimonial,
    responses(
        (status = 201, description = "Testimonial created", body = Testimonial),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_testimonial(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateTestimonial>,
) -> AppResult<(StatusCode, Json<Testimonial>)> {
    let testimonial = state.services.testimonials.create(data).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

#[utoipa::path(
    put,
    path = "/admin/testimonials/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Testimonial ID")
    ),
    request_body = UpdateTestimonial,
    responses(
        (status = 200, description = "Testimonial updated", body = Testimonial),
        (status = 404, description = "Testimonial not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_testimonial(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateTestimonial>,
) -> AppResult<Json<Testimonial>> {
    let testimonial = state.services.testimonials.update(id, patch).await?;
    Ok(Json(testimonial))
}

/// Approve or hide a testimonial
#[utoipa::path(
    put,
    path = "/admin/testimonials/{id}/approval",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Testimonial ID")
    ),
    request_body = SetApproval,
    responses(
        (status = 200, description = "Approval updated", body = Testimonial),
        (status = 404, description = "Testimonial not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_approval(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<SetApproval>,
) -> AppResult<Json<Testimonial>> {
    let testimonial = state.services.testimonials.set_approval(id, body.approved).await?;
    Ok(Json(testimonial))
}

#[utoipa::path(
    delete,
    path = "/admin/testimonials/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Testimonial ID")
    ),
    responses(
        (status = 204, description = "Testimonial deleted"),
        (status = 404, description = "Testimonial not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_testimonial(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.testimonials.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
