use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use fleetpulse_api::config::ApiConfig;
use fleetpulse_api::router::{build_router, cors_layer};
use fleetpulse_api::state::AppState;
use fleetpulse_api::usecase::session::TokenKeys;
use fleetpulse_auth_types::cookie::CookieSettings;
use fleetpulse_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db,
        keys: TokenKeys {
            access_secret: config.jwt_secret,
            refresh_secret: config.refresh_token_secret,
            bcrypt_cost: config.bcrypt_cost,
        },
        cookie: CookieSettings {
            domain: config.cookie_domain,
            secure: config.cookie_secure,
        },
    };

    let router = build_router(state, cors_layer(&config.cors_origin)?);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("api listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
