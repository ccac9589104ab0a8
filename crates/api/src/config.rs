use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except secrets have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8082`).
    pub port: u16,
    /// Public base URL stored in asset references
    /// (default: `http://localhost:8082`).
    pub base_url: String,
    /// Root directory holding `public/assets/` (default: `.`).
    pub assets_root: PathBuf,
    /// Shared key expected in `X-Api-Key` on credential-gated routes.
    pub api_key: String,
    /// Permit borrowing a book whose `available` counter is already zero
    /// (default: `false`, i.e. out-of-stock borrows are rejected).
    pub allow_negative_stock: bool,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secrets, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `8082`                  |
    /// | `API_BASE_URL`         | `http://localhost:8082` |
    /// | `ASSETS_ROOT`          | `.`                     |
    /// | `API_KEY`              | **required**            |
    /// | `ALLOW_NEGATIVE_STOCK` | `false`                 |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    ///
    /// # Panics
    ///
    /// Panics when a required variable is missing or unparseable; the
    /// server must not come up half-configured.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8082".into())
            .parse()
            .expect("PORT must be a valid u16");

        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8082".into());

        let assets_root = PathBuf::from(std::env::var("ASSETS_ROOT").unwrap_or_else(|_| ".".into()));

        let api_key = std::env::var("API_KEY").expect("API_KEY must be set in the environment");

        let allow_negative_stock: bool = std::env::var("ALLOW_NEGATIVE_STOCK")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("ALLOW_NEGATIVE_STOCK must be true or false");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            base_url,
            assets_root,
            api_key,
            allow_negative_stock,
            cors_origins,
            request_timeout_secs,
            jwt,
        }
    }
}
