/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin without a trailing slash (`FLEETPULSE_API_URL`).
    /// default: `"http://localhost:5000"`
    pub api_url: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            std::env::var("FLEETPULSE_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_owned()),
        )
    }
}
