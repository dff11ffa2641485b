use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use fleetpulse_api::domain::repository::{UserRepository, VehicleRepository};
use fleetpulse_api::domain::types::User;
use fleetpulse_api::error::ApiError;
use fleetpulse_api::usecase::session::TokenKeys;
use fleetpulse_domain::id::{UserId, VehicleId};
use fleetpulse_domain::vehicle::Vehicle;
use fleetpulse_testing::auth::{TEST_ACCESS_SECRET, TEST_REFRESH_SECRET};

/// bcrypt's minimum cost keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_keys() -> TokenKeys {
    TokenKeys {
        access_secret: TEST_ACCESS_SECRET.to_owned(),
        refresh_secret: TEST_REFRESH_SECRET.to_owned(),
        bcrypt_cost: TEST_BCRYPT_COST,
    }
}

/// A stored user whose password is `password`.
pub fn test_user(email: &str, username: Option<&str>, password: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId(Uuid::now_v7()),
        email: email.to_owned(),
        username: username.map(str::to_owned),
        password_hash: bcrypt::hash(password, TEST_BCRYPT_COST).unwrap(),
        phone_number: None,
        refresh_token_hash: None,
        created_at: now,
        updated_at: now,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(ApiError::UserNotFound)?;
        stored.username = user.username.clone();
        stored.phone_number = user.phone_number.clone();
        stored.password_hash = user.password_hash.clone();
        stored.updated_at = user.updated_at;
        Ok(())
    }

    async fn set_refresh_token_hash(
        &self,
        id: UserId,
        hash: Option<String>,
    ) -> Result<(), ApiError> {
        if let Some(u) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            u.refresh_token_hash = hash;
        }
        Ok(())
    }
}

// ── MockVehicleRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockVehicleRepo {
    pub vehicles: Arc<Mutex<Vec<Vehicle>>>,
}

impl MockVehicleRepo {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles: Arc::new(Mutex::new(vehicles)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: VehicleId) -> Option<Vehicle> {
        self.vehicles
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.vehicles.lock().unwrap().len()
    }
}

impl VehicleRepository for MockVehicleRepo {
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Vehicle>, ApiError> {
        let mut owned: Vec<Vehicle> = self
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.owner == owner)
            .cloned()
            .collect();
        owned.sort_by_key(|v| v.created_at);
        Ok(owned)
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, ApiError> {
        Ok(self.get(id))
    }

    async fn find_by_registration(
        &self,
        registration_no: &str,
    ) -> Result<Option<Vehicle>, ApiError> {
        Ok(self
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.details.registration_no == registration_no)
            .cloned())
    }

    async fn create(&self, vehicle: &Vehicle) -> Result<(), ApiError> {
        self.vehicles.lock().unwrap().push(vehicle.clone());
        Ok(())
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<(), ApiError> {
        let mut vehicles = self.vehicles.lock().unwrap();
        let stored = vehicles
            .iter_mut()
            .find(|v| v.id == vehicle.id)
            .ok_or(ApiError::VehicleNotFound)?;
        stored.details = vehicle.details.clone();
        stored.updated_at = vehicle.updated_at;
        Ok(())
    }

    async fn delete(&self, id: VehicleId) -> Result<bool, ApiError> {
        let mut vehicles = self.vehicles.lock().unwrap();
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        Ok(vehicles.len() < before)
    }
}
