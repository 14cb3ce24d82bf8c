//! Admin sign-in endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    config::AuthConfig,
    error::AppResult,
    models::admin_user::{LoginRequest, LoginResponse, SessionClaims},
    services::auth::{safe_callback, LOGIN_PATH},
    AppState,
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LoginPageQuery {
    /// Admin page to return to after signing in
    pub callback_url: Option<String>,
}

/// What the login form needs to render
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPage {
    /// Where to post the credentials
    pub action: String,
    pub callback_url: String,
}

fn session_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Login page descriptor. Signed-in admins are redirected to the dashboard by the gate.
#[utoipa::path(
    get,
    path = "/admin/login",
    tag = "auth",
    params(LoginPageQuery),
    responses(
        (status = 200, description = "Login form descriptor", body = LoginPage),
        (status = 303, description = "Already signed in, redirect to /admin")
    )
)]
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Json<LoginPage> {
    Json(LoginPage {
        action: LOGIN_PATH.to_string(),
        callback_url: safe_callback(query.callback_url.as_deref()),
    })
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in, session cookie set", body = LoginResponse),
        (status = 401, description = "Invalid email or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let response = state.services.auth.login(request).await?;
    let cookie = session_cookie(&state.config.auth, response.token.clone());
    Ok((jar.add(cookie), Json(response)))
}

/// Sign out and clear the session cookie
#[utoipa::path(
    post,
    path = "/admin/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Signed out")
    )
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let cookie = Cookie::build((state.config.auth.cookie_name.clone(), "")).path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

/// Current session
#[utoipa::path(
    get,
    path = "/admin/me",
    tag = "auth",
    security(("session" = [])),
    responses(
        (status = 200, description = "Session claims", body = SessionClaims),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(AuthenticatedUser(claims): AuthenticatedUser) -> Json<SessionClaims> {
    Json(claims)
}
