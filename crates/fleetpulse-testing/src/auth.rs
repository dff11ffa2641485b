//! Mock auth helpers for integration tests.
//!
//! Protected routes expect `Authorization: Bearer <access token>`. `MockAuth`
//! signs a real access token with the test secret so the production extractor
//! runs unchanged.

use axum::http::HeaderValue;
use uuid::Uuid;

use fleetpulse_auth_types::token::issue_access_token;
use fleetpulse_domain::id::UserId;

/// Secret shared by test routers and `MockAuth`.
pub const TEST_ACCESS_SECRET: &str = "test-access-secret";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret";

/// Identity whose bearer token is attached to test requests.
pub struct MockAuth {
    pub user_id: UserId,
    secret: String,
}

impl MockAuth {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            secret: TEST_ACCESS_SECRET.to_owned(),
        }
    }

    /// A fresh random user.
    pub fn random() -> Self {
        Self::new(UserId(Uuid::now_v7()))
    }

    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_owned();
        self
    }

    pub fn token(&self) -> String {
        issue_access_token(self.user_id, &self.secret)
            .expect("test token signing failed")
            .0
    }

    /// `Authorization: Bearer <token>` value.
    pub fn bearer(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token()))
            .expect("token is a valid header value")
    }
}
