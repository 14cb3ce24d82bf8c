//! Admin authentication: credential check, session tokens and the admin route gate

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::admin_user::{AdminUser, LoginRequest, LoginResponse, SessionClaims},
    repository::AdminUserStore,
};

pub const ADMIN_PREFIX: &str = "/admin";
pub const LOGIN_PATH: &str = "/admin/login";

/// What the gate does with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    /// Send an anonymous visitor to the login page, remembering where they were going
    RedirectToLogin { location: String },
    /// Signed-in admins have no business on the login page
    RedirectToDashboard,
}

fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PREFIX || path.starts_with("/admin/")
}

fn is_login_path(path: &str) -> bool {
    path.trim_end_matches('/') == LOGIN_PATH
}

/// Decide whether a request for `path` may proceed
pub fn evaluate_gate(path: &str, has_session: bool) -> GateDecision {
    if is_login_path(path) {
        return if has_session {
            GateDecision::RedirectToDashboard
        } else {
            GateDecision::Allow
        };
    }
    if is_admin_path(path) && !has_session {
        return GateDecision::RedirectToLogin {
            location: login_location(path),
        };
    }
    GateDecision::Allow
}

/// `/admin/login?callbackUrl=<path>` with the path form-encoded
fn login_location(callback: &str) -> String {
    reqwest::Url::parse_with_params("http://localhost/admin/login", &[("callbackUrl", callback)])
        .ok()
        .and_then(|url| url.query().map(|query| format!("{}?{}", LOGIN_PATH, query)))
        .unwrap_or_else(|| LOGIN_PATH.to_string())
}

/// Post-login destination. Only admin pages are accepted, anything else lands on the dashboard.
pub fn safe_callback(callback: Option<&str>) -> String {
    match callback {
        Some(url) if is_admin_path(url) && !is_login_path(url) => url.to_string(),
        _ => ADMIN_PREFIX.to_string(),
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AdminUserStore>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(store: Arc<dyn AdminUserStore>, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Authenticate an admin by email and password and issue a session token.
    /// Every credential failure (bad input, unknown email, wrong password, unreadable
    /// stored hash) is reported as the same `InvalidCredentials` error.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        if request.validate().is_err() {
            return Err(AppError::InvalidCredentials);
        }

        let email = normalize_email(&request.email);
        let Some(user) = self.store.find_by_email(&email).await? else {
            tracing::info!(email = %email, "Login failed: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        match verify_password(&user.password_hash, &request.password) {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!(email = %email, "Login failed: wrong password");
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                return Err(AppError::InvalidCredentials);
            }
        }

        let token = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "Admin signed in");

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.session_seconds(),
            redirect_to: safe_callback(request.callback_url.as_deref()),
            user,
        })
    }

    /// Verify a session token
    pub fn session(&self, token: &str) -> AppResult<SessionClaims> {
        SessionClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired session".to_string()))
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn session_seconds(&self) -> i64 {
        self.config.jwt_expiration_hours as i64 * 3600
    }

    fn issue_token(&self, user: &AdminUser) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id,
            email: user.email.clone(),
            name: user.username.clone(),
            role: user.role,
            exp: now + self.session_seconds(),
            iat: now,
        };
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::admin_user::AdminRole, repository::MockAdminUserStore};
    use uuid::Uuid;

    fn admin(password: &str) -> AdminUser {
        AdminUser {
            id: Uuid::new_v4(),
            username: "Admin".into(),
            email: "admin@vistalanka.com".into(),
            password_hash: hash_password(password).unwrap(),
            role: AdminRole::SuperAdmin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service() -> AuthService {
        let user = admin("Admin@1234");
        let mut store = MockAdminUserStore::new();
        store
            .expect_find_by_email()
            .returning(move |email| Ok((email == user.email).then(|| user.clone())));
        AuthService::new(Arc::new(store), AuthConfig::default())
    }

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
            callback_url: None,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Admin@1234").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "Admin@1234").unwrap());
        assert!(!verify_password(&hash, "admin@1234").unwrap());
        assert!(verify_password("plain-text", "x").is_err());
    }

    #[tokio::test]
    async fn test_login_issues_session() {
        let svc = service();
        let res = svc.login(request("Admin@VistaLanka.com", "Admin@1234")).await.unwrap();

        let claims = svc.session(&res.token).unwrap();
        assert_eq!(claims.sub, res.user.id);
        assert_eq!(claims.name, "Admin");
        assert!(claims.is_super_admin());
        assert_eq!(res.redirect_to, "/admin");
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_fail_alike() {
        let svc = service();
        let wrong_password = svc.login(request("admin@vistalanka.com", "nope")).await.unwrap_err();
        let unknown_email = svc.login(request("ghost@vistalanka.com", "Admin@1234")).await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());

        let missing_password = svc.login(request("admin@vistalanka.com", "")).await.unwrap_err();
        assert!(matches!(missing_password, AppError::InvalidCredentials));
    }

    #[test]
    fn test_session_rejects_garbage() {
        assert!(matches!(service().session("not-a-jwt"), Err(AppError::Authentication(_))));
    }

    #[test]
    fn test_gate_redirects_anonymous_admin_requests() {
        assert_eq!(
            evaluate_gate("/admin/tours", false),
            GateDecision::RedirectToLogin {
                location: "/admin/login?callbackUrl=%2Fadmin%2Ftours".into()
            }
        );
        assert!(matches!(
            evaluate_gate("/admin", false),
            GateDecision::RedirectToLogin { .. }
        ));
    }

    #[test]
    fn test_gate_login_page() {
        assert_eq!(evaluate_gate("/admin/login", false), GateDecision::Allow);
        assert_eq!(evaluate_gate("/admin/login", true), GateDecision::RedirectToDashboard);
    }

    #[test]
    fn test_gate_passes_everything_else() {
        assert_eq!(evaluate_gate("/admin/tours", true), GateDecision::Allow);
        assert_eq!(evaluate_gate("/packages", false), GateDecision::Allow);
        assert_eq!(evaluate_gate("/administrator", false), GateDecision::Allow);
        assert_eq!(evaluate_gate("/api/v1/tours", false), GateDecision::Allow);
    }

    #[test]
    fn test_safe_callback() {
        assert_eq!(safe_callback(Some("/admin/tours")), "/admin/tours");
        assert_eq!(safe_callback(Some("https://evil.example/admin")), "/admin");
        assert_eq!(safe_callback(Some("/admin/login")), "/admin");
        assert_eq!(safe_callback(None), "/admin");
    }
}
