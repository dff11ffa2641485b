use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use fleetpulse_auth_types::identity::BearerIdentity;
use fleetpulse_domain::id::VehicleId;
use fleetpulse_domain::vehicle::{Vehicle, VehicleDetails};

use crate::error::ApiError;
use crate::handlers::extract::ApiJson;
use crate::state::AppState;
use crate::usecase::vehicle::{
    CreateVehicleUseCase, DeleteVehicleUseCase, GetVehicleUseCase, ListVehiclesUseCase,
    UpdateVehicleUseCase,
};

/// A malformed id cannot name a stored vehicle.
fn parse_vehicle_id(raw: &str) -> Result<VehicleId, ApiError> {
    raw.parse().map_err(|_| ApiError::VehicleNotFound)
}

// ── GET /api/vehicles ─────────────────────────────────────────────────────────

pub async fn list_vehicles(
    State(state): State<AppState>,
    identity: BearerIdentity,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
    let usecase = ListVehiclesUseCase {
        vehicles: state.vehicle_repo(),
    };
    Ok(Json(usecase.execute(identity.user_id).await?))
}

// ── POST /api/vehicles ────────────────────────────────────────────────────────

pub async fn create_vehicle(
    State(state): State<AppState>,
    identity: BearerIdentity,
    ApiJson(body): ApiJson<VehicleDetails>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreateVehicleUseCase {
        vehicles: state.vehicle_repo(),
    };
    let vehicle = usecase.execute(identity.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

// ── GET /api/vehicles/{id} ────────────────────────────────────────────────────

pub async fn get_vehicle(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, ApiError> {
    let usecase = GetVehicleUseCase {
        vehicles: state.vehicle_repo(),
    };
    let vehicle = usecase
        .execute(identity.user_id, parse_vehicle_id(&id)?)
        .await?;
    Ok(Json(vehicle))
}

// ── PUT /api/vehicles/{id} ────────────────────────────────────────────────────

pub async fn update_vehicle(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<VehicleDetails>,
) -> Result<Json<Vehicle>, ApiError> {
    let usecase = UpdateVehicleUseCase {
        vehicles: state.vehicle_repo(),
    };
    let vehicle = usecase
        .execute(identity.user_id, parse_vehicle_id(&id)?, body)
        .await?;
    Ok(Json(vehicle))
}

// ── DELETE /api/vehicles/{id} ─────────────────────────────────────────────────

pub async fn delete_vehicle(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = DeleteVehicleUseCase {
        vehicles: state.vehicle_repo(),
    };
    usecase
        .execute(identity.user_id, parse_vehicle_id(&id)?)
        .await?;
    Ok(Json(json!({ "message": "vehicle removed" })))
}
