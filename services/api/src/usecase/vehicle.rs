use chrono::Utc;
use uuid::Uuid;

use fleetpulse_domain::id::{UserId, VehicleId};
use fleetpulse_domain::vehicle::{Vehicle, VehicleDetails};

use crate::domain::repository::VehicleRepository;
use crate::error::ApiError;

/// Load a vehicle and check that `user` owns it.
async fn owned_vehicle<V: VehicleRepository>(
    vehicles: &V,
    user: UserId,
    id: VehicleId,
) -> Result<Vehicle, ApiError> {
    let vehicle = vehicles
        .find_by_id(id)
        .await?
        .ok_or(ApiError::VehicleNotFound)?;
    if !vehicle.is_owned_by(user) {
        tracing::warn!(user_id = %user, vehicle_id = %id, "vehicle access denied");
        return Err(ApiError::NotVehicleOwner);
    }
    Ok(vehicle)
}

/// Reject `registration_no` if a vehicle other than `except` already uses it.
async fn ensure_registration_free<V: VehicleRepository>(
    vehicles: &V,
    registration_no: &str,
    except: Option<VehicleId>,
) -> Result<(), ApiError> {
    match vehicles.find_by_registration(registration_no).await? {
        Some(existing) if Some(existing.id) != except => Err(ApiError::RegistrationTaken),
        _ => Ok(()),
    }
}

// ── ListVehicles ─────────────────────────────────────────────────────────────

pub struct ListVehiclesUseCase<V: VehicleRepository> {
    pub vehicles: V,
}

impl<V: VehicleRepository> ListVehiclesUseCase<V> {
    pub async fn execute(&self, user: UserId) -> Result<Vec<Vehicle>, ApiError> {
        self.vehicles.list_by_owner(user).await
    }
}

// ── CreateVehicle ────────────────────────────────────────────────────────────

pub struct CreateVehicleUseCase<V: VehicleRepository> {
    pub vehicles: V,
}

impl<V: VehicleRepository> CreateVehicleUseCase<V> {
    pub async fn execute(
        &self,
        user: UserId,
        details: VehicleDetails,
    ) -> Result<Vehicle, ApiError> {
        let details = details.validated_now()?;
        ensure_registration_free(&self.vehicles, &details.registration_no, None).await?;

        let now = Utc::now();
        let vehicle = Vehicle {
            id: VehicleId(Uuid::now_v7()),
            owner: user,
            details,
            created_at: now,
            updated_at: now,
        };
        self.vehicles.create(&vehicle).await?;
        tracing::info!(user_id = %user, vehicle_id = %vehicle.id, "vehicle created");
        Ok(vehicle)
    }
}

// ── GetVehicle ───────────────────────────────────────────────────────────────

pub struct GetVehicleUseCase<V: VehicleRepository> {
    pub vehicles: V,
}

impl<V: VehicleRepository> GetVehicleUseCase<V> {
    pub async fn execute(&self, user: UserId, id: VehicleId) -> Result<Vehicle, ApiError> {
        owned_vehicle(&self.vehicles, user, id).await
    }
}

// ── UpdateVehicle ────────────────────────────────────────────────────────────

pub struct UpdateVehicleUseCase<V: VehicleRepository> {
    pub vehicles: V,
}

impl<V: VehicleRepository> UpdateVehicleUseCase<V> {
    /// Replace every descriptive field. Nothing is written unless all checks pass.
    pub async fn execute(
        &self,
        user: UserId,
        id: VehicleId,
        details: VehicleDetails,
    ) -> Result<Vehicle, ApiError> {
        let mut vehicle = owned_vehicle(&self.vehicles, user, id).await?;
        let details = details.validated_now()?;
        ensure_registration_free(&self.vehicles, &details.registration_no, Some(id)).await?;

        vehicle.details = details;
        vehicle.updated_at = Utc::now();
        self.vehicles.update(&vehicle).await?;
        Ok(vehicle)
    }
}

// ── DeleteVehicle ────────────────────────────────────────────────────────────

pub struct DeleteVehicleUseCase<V: VehicleRepository> {
    pub vehicles: V,
}

impl<V: VehicleRepository> DeleteVehicleUseCase<V> {
    pub async fn execute(&self, user: UserId, id: VehicleId) -> Result<(), ApiError> {
        owned_vehicle(&self.vehicles, user, id).await?;
        if !self.vehicles.delete(id).await? {
            return Err(ApiError::VehicleNotFound);
        }
        tracing::info!(user_id = %user, vehicle_id = %id, "vehicle removed");
        Ok(())
    }
}
