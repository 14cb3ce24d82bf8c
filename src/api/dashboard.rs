//! Admin dashboard endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::dashboard::DashboardStats, AppState};

use super::AuthenticatedUser;

/// Counts and latest inquiries for the admin landing page
#[utoipa::path(
    get,
    path = "/admin",
    tag = "admin",
    security(("session" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 303, description = "Not signed in, redirect to the login page")
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.dashboard.stats().await?;
    Ok(Json(stats))
}
