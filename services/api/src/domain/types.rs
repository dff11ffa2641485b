use chrono::{DateTime, Utc};

use fleetpulse_domain::id::UserId;
use fleetpulse_domain::user::Profile;

/// Stored account, including credential hashes. Never serialized to clients.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub refresh_token_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}
