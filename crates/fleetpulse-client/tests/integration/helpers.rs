use std::sync::Arc;

use chrono::Utc;
use fleetpulse_client::api::FleetApi;
use fleetpulse_client::config::ClientConfig;
use fleetpulse_client::http::TOKEN_KEY;
use fleetpulse_client::storage::{KeyValueStore, MemoryStore};
use fleetpulse_domain::id::{UserId, VehicleId};
use fleetpulse_domain::vehicle::{Vehicle, VehicleDetails};
use mockito::ServerGuard;
use uuid::Uuid;

pub async fn server() -> ServerGuard {
    mockito::Server::new_async().await
}

/// API client against `server`, optionally signed in with `token`.
pub fn api(server: &ServerGuard, token: Option<&str>) -> (FleetApi<Arc<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    if let Some(token) = token {
        store.set(TOKEN_KEY, token).unwrap();
    }
    let api = FleetApi::new(&ClientConfig::new(server.url()), Arc::clone(&store)).unwrap();
    (api, store)
}

pub fn details() -> VehicleDetails {
    VehicleDetails {
        name: "Nexon".into(),
        year: 2023,
        location: "Bengaluru".into(),
        image_url: String::new(),
        is_favorited: false,
        fuel_type: "Diesel".into(),
        registered_name: "R. Iyer".into(),
        transmission_type: "Automatic".into(),
        registration_no: "KA01AB1234".into(),
    }
}

pub fn vehicle() -> Vehicle {
    let now = Utc::now();
    Vehicle {
        id: VehicleId(Uuid::now_v7()),
        owner: UserId(Uuid::now_v7()),
        details: details(),
        created_at: now,
        updated_at: now,
    }
}
