//! Configuration management for the Vista Lanka server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Placeholder secret shipped in `config/default.toml`; only accepted in development
pub const DEFAULT_JWT_SECRET: &str = "change-this-secret-in-production";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    /// Name of the HTTP-only cookie carrying the session token
    pub cookie_name: String,
    /// Mark the session cookie `Secure` (disable only for local HTTP development)
    pub cookie_secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

/// Remote image host (Cloudinary-compatible API)
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AssetsConfig {
    pub api_base_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder uploaded images are placed in
    pub upload_folder: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. VISTALANKA_SERVER__PORT=9000)
            .add_source(
                Environment::with_prefix("VISTALANKA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("auth.jwt_secret", env::var("JWT_SECRET").ok())?
            .set_override_option("assets.cloud_name", env::var("CLOUDINARY_CLOUD_NAME").ok())?
            .set_override_option("assets.api_key", env::var("CLOUDINARY_API_KEY").ok())?
            .set_override_option("assets.api_secret", env::var("CLOUDINARY_API_SECRET").ok())?
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.auth.check_secret(&run_mode)?;
        Ok(app)
    }
}

impl AuthConfig {
    /// Refuse to sign sessions with an empty or placeholder secret outside development
    pub fn check_secret(&self, run_mode: &str) -> Result<(), ConfigError> {
        if run_mode == "development" {
            return Ok(());
        }
        if self.jwt_secret.is_empty() || self.jwt_secret == DEFAULT_JWT_SECRET {
            return Err(ConfigError::Message(format!(
                "JWT_SECRET must be set when RUN_MODE is '{}'",
                run_mode
            )));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiration_hours: 24 * 30,
            cookie_name: "session".to_string(),
            cookie_secure: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.cloudinary.com/v1_1".to_string(),
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            upload_folder: "vistalanka".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let auth = AuthConfig::default();
        assert_eq!(auth.cookie_name, "session");
        assert!(auth.cookie_secure);

        let db = DatabaseConfig::default();
        assert!(db.url.is_empty());

        let assets = AssetsConfig::default();
        assert!(assets.api_base_url.starts_with("https://"));
    }

    #[test]
    fn test_partial_sources_fall_back_to_defaults() {
        let config = Config::builder()
            .set_override("server.host", "127.0.0.1")
            .and_then(|b| b.set_override("server.port", 9000))
            .and_then(|b| b.build())
            .expect("config builds");
        let app: AppConfig = config.try_deserialize().expect("deserializes");
        assert_eq!(app.server.port, 9000);
        assert_eq!(app.logging.level, "info");
        assert_eq!(app.auth.jwt_expiration_hours, 24 * 30);
    }

    #[test]
    fn test_placeholder_secret_only_in_development() {
        let mut auth = AuthConfig::default();
        assert!(auth.check_secret("development").is_ok());
        assert!(auth.check_secret("production").is_err());

        auth.jwt_secret = String::new();
        assert!(auth.check_secret("production").is_err());

        auth.jwt_secret = "a-long-random-deployment-secret".to_string();
        assert!(auth.check_secret("production").is_ok());
    }
}
