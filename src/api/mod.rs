//! HTTP API: public site endpoints, the gated admin area and the router

pub mod auth;
pub mod dashboard;
pub mod destinations;
pub mod health;
pub mod inquiries;
pub mod openapi;
pub mod revalidations;
pub mod testimonials;
pub mod tours;
pub mod uploads;

use axum::{
    async_trait,
    extract::{DefaultBodyLimit, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post, put},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    models::admin_user::SessionClaims,
    services::auth::{evaluate_gate, GateDecision, ADMIN_PREFIX},
    AppState,
};

/// Largest accepted image upload
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Session token from the `Authorization: Bearer` header, falling back to the session cookie
fn session_token(headers: &HeaderMap, jar: &CookieJar, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);
    bearer.or_else(|| jar.get(cookie_name).map(|cookie| cookie.value().to_string()))
}

/// Extractor for the signed-in admin
pub struct AuthenticatedUser(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session_token(&parts.headers, &jar, &state.config.auth.cookie_name)
            .ok_or_else(|| AppError::Authentication("Not signed in".to_string()))?;

        let claims = state.services.auth.session(&token)?;
        Ok(AuthenticatedUser(claims))
    }
}

/// Redirect anonymous visitors away from the admin area, and signed-in admins away from the login page.
/// Wraps the whole router so unmatched `/admin/...` paths are gated too.
pub async fn admin_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with(ADMIN_PREFIX) {
        return next.run(request).await;
    }

    let has_session = session_token(request.headers(), &jar, &state.config.auth.cookie_name)
        .map(|token| state.services.auth.session(&token).is_ok())
        .unwrap_or(false);

    match evaluate_gate(request.uri().path(), has_session) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::RedirectToLogin { location } => {
            tracing::debug!(path = %request.uri().path(), "Redirecting to login");
            Redirect::to(&location).into_response()
        }
        GateDecision::RedirectToDashboard => Redirect::to(ADMIN_PREFIX).into_response(),
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public site API
    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/tours", get(tours::list_tours))
        .route("/tours/featured", get(tours::featured_tours))
        .route("/tours/slug/:slug", get(tours::get_tour_by_slug))
        .route("/destinations", get(destinations::list_destinations))
        .route("/testimonials", get(testimonials::list_approved_testimonials))
        .route("/inquiries/contact", post(inquiries::submit_contact))
        .route("/inquiries/booking", post(inquiries::submit_booking))
        .route("/inquiries/tailor-made", post(inquiries::submit_tailor_made))
        .route("/revalidations", get(revalidations::stream_revalidations));

    // Admin area
    let admin = Router::new()
        .route("/admin", get(dashboard::dashboard))
        .route("/admin/login", get(auth::login_page).post(auth::login))
        .route("/admin/logout", post(auth::logout))
        .route("/admin/me", get(auth::me))
        .route("/admin/tours", get(tours::admin_list_tours).post(tours::create_tour))
        .route(
            "/admin/tours/:id",
            get(tours::get_tour).put(tours::update_tour).delete(tours::delete_tour),
        )
        .route(
            "/admin/destinations",
            get(destinations::admin_list_destinations).post(destinations::create_destination),
        )
        .route(
            "/admin/destinations/:id",
            get(destinations::get_destination)
                .put(destinations::update_destination)
                .delete(destinations::delete_destination),
        )
        .route(
            "/admin/testimonials",
            get(testimonials::list_all_testimonials).post(testimonials::create_testimonial),
        )
        .route(
            "/admin/testimonials/:id",
            get(testimonials::get_testimonial)
                .put(testimonials::update_testimonial)
                .delete(testimonials::delete_testimonial),
        )
        .route("/admin/testimonials/:id/approval", put(testimonials::set_approval))
        .route("/admin/inquiries", get(inquiries::list_inquiries))
        .route(
            "/admin/inquiries/:id",
            get(inquiries::get_inquiry).delete(inquiries::delete_inquiry),
        )
        .route("/admin/inquiries/:id/status", put(inquiries::set_inquiry_status))
        .route(
            "/admin/uploads",
            post(uploads::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        );

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(admin)
        .with_state(state.clone())
        .merge(openapi::create_openapi_router())
        .layer(middleware::from_fn_with_state(state, admin_gate))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        models::admin_user::AdminRole,
        repository::Repository,
        services::{assets::MockAssetStore, Services},
    };
    use axum::{
        body::Body,
        http::{header::LOCATION, HeaderValue, StatusCode},
    };
    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    /// Router over a pool that never connects; only requests that stop before the database are sent
    fn test_app() -> (Router, AppConfig) {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/vistalanka_test")
            .expect("lazy pool");
        let config = AppConfig {
            server: Default::default(),
            database: Default::default(),
            auth: Default::default(),
            logging: Default::default(),
            assets: Default::default(),
        };
        let repository = Repository::new(pool);
        let services = Services::new(
            repository.clone(),
            config.auth.clone(),
            Arc::new(MockAssetStore::new()),
        );
        let state = AppState {
            config: Arc::new(config.clone()),
            services: Arc::new(services),
            repository,
        };
        (router(state), config)
    }

    fn bearer(config: &AppConfig) -> String {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            email: "admin@vistalanka.com".into(),
            name: "Admin".into(),
            role: AdminRole::SuperAdmin,
            exp: now + 3600,
            iat: now,
        };
        let token = claims.create_token(&config.auth.jwt_secret).expect("token");
        format!("Bearer {}", token)
    }

    async fn send(
        app: Router,
        path: &str,
        authorization: Option<&str>,
    ) -> (StatusCode, Option<String>) {
        let mut request = axum::http::Request::get(path);
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        let response = app
            .oneshot(request.body(Body::empty()).expect("request"))
            .await
            .expect("infallible");
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        (response.status(), location)
    }

    #[tokio::test]
    async fn test_gate_redirects_anonymous_admin_paths() {
        let (app, _) = test_app();

        for (path, location) in [
            ("/admin", "/admin/login?callbackUrl=%2Fadmin"),
            ("/admin/tours", "/admin/login?callbackUrl=%2Fadmin%2Ftours"),
            ("/admin/settings", "/admin/login?callbackUrl=%2Fadmin%2Fsettings"),
        ] {
            let (status, got) = send(app.clone(), path, None).await;
            assert_eq!(status, StatusCode::SEE_OTHER, "{}", path);
            assert_eq!(got.as_deref(), Some(location), "{}", path);
        }
    }

    #[tokio::test]
    async fn test_gate_login_page() {
        let (app, config) = test_app();

        let (status, location) = send(app.clone(), "/admin/login", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(location, None);

        let token = bearer(&config);
        let (status, location) = send(app, "/admin/login", Some(&token)).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/admin"));
    }

    #[tokio::test]
    async fn test_gate_lets_sessions_and_public_paths_through() {
        let (app, config) = test_app();
        let token = bearer(&config);

        let (status, location) = send(app.clone(), "/admin/settings", Some(&token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(location, None);

        let (status, location) = send(app.clone(), "/admin/me", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(location, None);

        let (status, location) = send(app.clone(), "/api/v1/unknown", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(location, None);

        let (status, _) = send(app, "/admin/me", Some("Bearer forged")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
    }

    #[test]
    fn test_session_token_sources() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("session=from-cookie; theme=dark"));
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(session_token(&headers, &jar, "session").as_deref(), Some("from-cookie"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(session_token(&headers, &jar, "session").as_deref(), Some("from-header"));

        let empty = HeaderMap::new();
        assert_eq!(session_token(&empty, &CookieJar::new(), "session"), None);
    }
}
