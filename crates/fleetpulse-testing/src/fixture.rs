//! Sample domain values for tests.

use chrono::Utc;
use uuid::Uuid;

use fleetpulse_domain::id::{UserId, VehicleId};
use fleetpulse_domain::vehicle::{Vehicle, VehicleDetails};

/// Valid vehicle details with the given registration number.
pub fn vehicle_details(registration_no: &str) -> VehicleDetails {
    VehicleDetails {
        name: "Swift Dzire".to_owned(),
        year: 2022,
        location: "Pune".to_owned(),
        image_url: String::new(),
        is_favorited: false,
        fuel_type: "Petrol".to_owned(),
        registered_name: "A. Kumar".to_owned(),
        transmission_type: "Manual".to_owned(),
        registration_no: registration_no.to_owned(),
    }
}

/// A stored vehicle owned by `owner`.
pub fn vehicle(owner: UserId, registration_no: &str) -> Vehicle {
    let now = Utc::now();
    Vehicle {
        id: VehicleId(Uuid::now_v7()),
        owner,
        details: vehicle_details(registration_no),
        created_at: now,
        updated_at: now,
    }
}
