use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use fleetpulse_auth_types::cookie::CookieSettings;
use fleetpulse_auth_types::identity::AccessTokenSecret;

use crate::infra::db::{DbUserRepository, DbVehicleRepository};
use crate::usecase::session::TokenKeys;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub keys: TokenKeys,
    pub cookie: CookieSettings,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn vehicle_repo(&self) -> DbVehicleRepository {
        DbVehicleRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for AccessTokenSecret {
    fn from_ref(state: &AppState) -> Self {
        AccessTokenSecret(state.keys.access_secret.clone())
    }
}
