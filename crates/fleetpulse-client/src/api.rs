//! Typed calls against the FleetPulse REST API.

use serde::Deserialize;

use fleetpulse_domain::id::VehicleId;
use fleetpulse_domain::user::{
    AccessTokenResponse, LoginRequest, Profile, RegisterRequest, UpdateProfileRequest,
};
use fleetpulse_domain::vehicle::{Vehicle, VehicleDetails};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{AuthClient, LOGOUT_PATH, expect_success, parse_json};
use crate::storage::KeyValueStore;

/// `{ "message": ... }` acknowledgement body.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub struct FleetApi<S> {
    client: AuthClient<S>,
}

impl<S: KeyValueStore> FleetApi<S> {
    pub fn new(config: &ClientConfig, store: S) -> Result<Self, ClientError> {
        Ok(Self {
            client: AuthClient::new(config, store)?,
        })
    }

    pub fn client(&self) -> &AuthClient<S> {
        &self.client
    }

    pub fn is_signed_in(&self) -> bool {
        self.client.token().is_some()
    }

    // ── auth ────────────────────────────────────────────────────────────────

    /// Create an account and keep the returned access token.
    pub async fn register(&self, req: &RegisterRequest) -> Result<AccessTokenResponse, ClientError> {
        let response = self.client.post("/api/auth/register", req).await?;
        let body: AccessTokenResponse = parse_json(response).await?;
        self.client.set_token(&body.access_token)?;
        Ok(body)
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<AccessTokenResponse, ClientError> {
        let response = self.client.post("/api/auth/login", req).await?;
        let body: AccessTokenResponse = parse_json(response).await?;
        self.client.set_token(&body.access_token)?;
        Ok(body)
    }

    /// Ends the server session and forgets the local token, even if the server call fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = match self.client.post_empty(LOGOUT_PATH).await {
            Ok(response) => expect_success(response).await,
            Err(e) => Err(e),
        };
        self.client.clear_token()?;
        result
    }

    pub async fn me(&self) -> Result<Profile, ClientError> {
        parse_json(self.client.get("/api/auth/me").await?).await
    }

    pub async fn profile(&self) -> Result<Profile, ClientError> {
        parse_json(self.client.get("/api/auth/profile").await?).await
    }

    pub async fn update_profile(&self, req: &UpdateProfileRequest) -> Result<Profile, ClientError> {
        parse_json(self.client.put("/api/auth/profile", req).await?).await
    }

    // ── vehicles ────────────────────────────────────────────────────────────

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ClientError> {
        parse_json(self.client.get("/api/vehicles").await?).await
    }

    pub async fn create_vehicle(&self, details: &VehicleDetails) -> Result<Vehicle, ClientError> {
        parse_json(self.client.post("/api/vehicles", details).await?).await
    }

    pub async fn get_vehicle(&self, id: VehicleId) -> Result<Vehicle, ClientError> {
        parse_json(self.client.get(&format!("/api/vehicles/{id}")).await?).await
    }

    pub async fn update_vehicle(
        &self,
        id: VehicleId,
        details: &VehicleDetails,
    ) -> Result<Vehicle, ClientError> {
        parse_json(self.client.put(&format!("/api/vehicles/{id}"), details).await?).await
    }

    pub async fn delete_vehicle(&self, id: VehicleId) -> Result<MessageResponse, ClientError> {
        parse_json(self.client.delete(&format!("/api/vehicles/{id}")).await?).await
    }
}
