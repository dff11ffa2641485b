use anyhow::Context as _;

/// API server configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// HMAC secret for refresh tokens. Env var: `REFRESH_TOKEN_SECRET`.
    pub refresh_token_secret: String,
    /// TCP port to listen on (default 5000). Env var: `API_PORT`.
    pub api_port: u16,
    /// Refresh cookie `Domain` attribute; host-only when unset.
    pub cookie_domain: Option<String>,
    /// Mark the refresh cookie `Secure`. Env var: `COOKIE_SECURE` (`true`/`1`).
    pub cookie_secure: bool,
    /// Browser origin allowed to call the API with credentials.
    /// default: `"http://localhost:5173"`
    pub cors_origin: String,
    /// bcrypt work factor (default 10). Env var: `BCRYPT_COST`.
    pub bcrypt_cost: u32,
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            refresh_token_secret: required("REFRESH_TOKEN_SECRET")?,
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            cookie_domain: std::env::var("COOKIE_DOMAIN")
                .ok()
                .filter(|v| !v.is_empty()),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| matches!(v.as_str(), "true" | "1"))
                .unwrap_or(false),
            cors_origin: std::env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_owned()),
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}
