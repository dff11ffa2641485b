//! Vehicle records as stored by the API and returned to clients.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{UserId, VehicleId};

/// First year a production automobile existed; earlier years are rejected.
pub const MIN_VEHICLE_YEAR: i32 = 1886;

/// Descriptive attributes of a vehicle, as submitted on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    pub name: String,
    pub year: i32,
    pub location: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_favorited: bool,
    pub fuel_type: String,
    pub registered_name: String,
    pub transmission_type: String,
    pub registration_no: String,
}

/// Reasons a [`VehicleDetails`] payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VehicleValidationError {
    #[error("please provide the {0}")]
    MissingField(&'static str),
    #[error("vehicle year {0} is out of range")]
    YearOutOfRange(i32),
}

impl VehicleDetails {
    /// Trim every text field and check required values.
    ///
    /// `current_year` bounds the model year from above (next year's models are allowed).
    pub fn validated(mut self, current_year: i32) -> Result<Self, VehicleValidationError> {
        let required = [
            (&mut self.name, "vehicle name"),
            (&mut self.location, "location"),
            (&mut self.fuel_type, "fuel type"),
            (&mut self.registered_name, "registered name"),
            (&mut self.transmission_type, "transmission type"),
            (&mut self.registration_no, "registration number"),
        ];
        for (value, label) in required {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(VehicleValidationError::MissingField(label));
            }
            if trimmed.len() != value.len() {
                *value = trimmed.to_owned();
            }
        }
        self.image_url = self.image_url.trim().to_owned();

        if self.year < MIN_VEHICLE_YEAR || self.year > current_year + 1 {
            return Err(VehicleValidationError::YearOutOfRange(self.year));
        }
        Ok(self)
    }

    /// [`validated`](Self::validated) against the current UTC year.
    pub fn validated_now(self) -> Result<Self, VehicleValidationError> {
        self.validated(Utc::now().year())
    }
}

/// A vehicle owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(rename = "user")]
    pub owner: UserId,
    #[serde(flatten)]
    pub details: VehicleDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }
}
