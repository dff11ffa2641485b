#![allow(async_fn_in_trait)]

use fleetpulse_domain::id::{UserId, VehicleId};
use fleetpulse_domain::vehicle::Vehicle;

use crate::domain::types::User;
use crate::error::ApiError;

pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Insert a new user. A unique-constraint race maps to `EmailTaken` / `UsernameTaken`.
    async fn create(&self, user: &User) -> Result<(), ApiError>;

    /// Persist username, phone number and password hash.
    async fn update_profile(&self, user: &User) -> Result<(), ApiError>;

    /// Replace (or clear with `None`) the stored refresh-token hash.
    async fn set_refresh_token_hash(
        &self,
        id: UserId,
        hash: Option<String>,
    ) -> Result<(), ApiError>;
}

pub trait VehicleRepository: Send + Sync {
    /// Vehicles owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Vehicle>, ApiError>;
    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, ApiError>;
    async fn find_by_registration(
        &self,
        registration_no: &str,
    ) -> Result<Option<Vehicle>, ApiError>;

    /// Insert a vehicle. A unique-constraint race maps to `RegistrationTaken`.
    async fn create(&self, vehicle: &Vehicle) -> Result<(), ApiError>;

    /// Replace every descriptive field and `updated_at`.
    async fn update(&self, vehicle: &Vehicle) -> Result<(), ApiError>;

    /// Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: VehicleId) -> Result<bool, ApiError>;
}
