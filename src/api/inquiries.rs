//! Inquiry endpoints: public forms and the admin inbox

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::inquiry::{
        BookingForm, ContactForm, Inquiry, InquiryQuery, SetInquiryStatus, TailorMadeForm,
    },
    AppState,
};

use super::AuthenticatedUser;

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/v1/inquiries/contact",
    tag = "inquiries",
    request_body = ContactForm,
    responses(
        (status = 201, description = "Inquiry recorded", body = Inquiry),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> AppResult<(StatusCode, Json<Inquiry>)> {
    let inquiry = state.services.inquiries.submit(form.into()).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// Book a tour
#[utoipa::path(
    post,
    path = "/api/v1/inquiries/booking",
    tag = "inquiries",
    request_body = BookingForm,
    responses(
        (status = 201, description = "Inquiry recorded", body = Inquiry),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_booking(
    State(state): State<AppState>,
    Json(form): Json<BookingForm>,
) -> AppResult<(StatusCode, Json<Inquiry>)> {
    let inquiry = state.services.inquiries.submit(form.into()).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// Request a tailor-made trip
#[utoipa::path(
    post,
    path = "/api/v1/inquiries/tailor-made",
    tag = "inquiries",
    request_body = TailorMadeForm,
    responses(
        (status = 201, description = "Inquiry recorded", body = Inquiry),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_tailor_made(
    State(state): State<AppState>,
    Json(form): Json<TailorMadeForm>,
) -> AppResult<(StatusCode, Json<Inquiry>)> {
    let inquiry = state.services.inquiries.submit(form.into()).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// List inquiries, newest first
#[utoipa::path(
    get,
    path = "/admin/inquiries",
    tag = "admin",
    security(("session" = [])),
    params(InquiryQuery),
    responses(
        (status = 200, description = "Inquiries", body = Vec<Inquiry>),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_inquiries(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<InquiryQuery>,
) -> AppResult<Json<Vec<Inquiry>>> {
    let inquiries = state.services.inquiries.list(&query).await?;
    Ok(Json(inquiries))
}

#[utoipa::path(
    get,
    path = "/admin/inquiries/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Inquiry ID")
    ),
    responses(
        (status = 200, description = "Inquiry", body = Inquiry),
        (status = 404, description = "Inquiry not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_inquiry(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Inquiry>> {
    let inquiry = state.services.inquiries.get_by_id(id).await?;
    Ok(Json(inquiry))
}

/// Move an inquiry to another status
#[utoipa::path(
    put,
    path = "/admin/inquiries/{id}/status",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Inquiry ID")
    ),
    request_body = SetInquiryStatus,
    responses(
        (status = 200, description = "Status updated", body = Inquiry),
        (status = 404, description = "Inquiry not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_inquiry_status(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<SetInquiryStatus>,
) -> AppResult<Json<Inquiry>> {
    let inquiry = state.services.inquiries.set_status(id, body.status).await?;
    Ok(Json(inquiry))
}

#[utoipa::path(
    delete,
    path = "/admin/inquiries/{id}",
    tag = "admin",
    security(("session" = [])),
    params(
        ("id" = Uuid, Path, description = "Inquiry ID")
    ),
    responses(
        (status = 204, description = "Inquiry deleted"),
        (status = 404, description = "Inquiry not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_inquiry(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.inquiries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
