use std::env;
use std::str::FromStr;
use std::time::Duration;

use book_site_core::blob::s3::S3Settings;
use book_site_core::resource::service::DEFAULT_SIGNED_URL_TTL;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// PostgreSQL connection URL. Unset means the in-memory store.
    pub database_url: Option<String>,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// JWT signing secret. Unset disables every admin route.
    pub jwt_secret: Option<String>,
    /// Lifetime of issued admin tokens.
    pub token_ttl_hours: i64,
    /// Admin login email.
    pub admin_email: Option<String>,
    /// Argon2 PHC hash of the admin password.
    pub admin_password_hash: Option<String>,
    /// Blob bucket settings. Unset means the in-memory blob store.
    pub s3: Option<S3Settings>,
    /// Lifetime of signed resource download URLs.
    pub signed_url_ttl: Duration,
    /// Store the default home content at startup if none exists.
    pub seed_home_content: bool,
    /// Browser origins allowed to call the API. Empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: None,
            db_max_connections: 20,
            db_min_connections: 5,
            jwt_secret: None,
            token_ttl_hours: 24,
            admin_email: None,
            admin_password_hash: None,
            s3: None,
            signed_url_ttl: DEFAULT_SIGNED_URL_TTL,
            seed_home_content: false,
            cors_origins: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let s3 = optional("AWS_BUCKET_NAME").map(|bucket| S3Settings {
            bucket,
            region: optional("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            endpoint: optional("S3_ENDPOINT"),
        });

        Ok(Self {
            host: optional("HOST").unwrap_or(defaults.host),
            port: parsed("PORT", defaults.port)?,
            database_url: optional("DATABASE_URL"),
            db_max_connections: parsed("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            db_min_connections: parsed("DB_MIN_CONNECTIONS", defaults.db_min_connections)?,
            jwt_secret: optional("JWT_SECRET"),
            token_ttl_hours: parsed("TOKEN_TTL_HOURS", defaults.token_ttl_hours)?,
            admin_email: optional("ADMIN_EMAIL").map(|e| e.trim().to_lowercase()),
            admin_password_hash: optional("ADMIN_PASSWORD_HASH"),
            s3,
            signed_url_ttl: Duration::from_secs(parsed(
                "SIGNED_URL_TTL_SECS",
                defaults.signed_url_ttl.as_secs(),
            )?),
            seed_home_content: parsed("SEED_HOME_CONTENT", defaults.seed_home_content)?,
            cors_origins: optional("CORS_ORIGINS")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            log_level: optional("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(key) {
        None => Ok(default),
        Some(value) => {
            let result = value.trim().parse();
            result.map_err(|_| ConfigError::Invalid { key, value })
        }
    }
}
