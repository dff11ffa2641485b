use chrono::Utc;
use uuid::Uuid;

use fleetpulse_auth_types::token::{decode_token, issue_access_token};
use fleetpulse_domain::id::UserId;
use fleetpulse_domain::user::{
    LoginRequest, Profile, RegisterRequest, UpdateProfileRequest, looks_like_email,
};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;
use crate::usecase::password::{hash_secret, verify_secret};
use crate::usecase::session::{Session, TokenKeys, start_session};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub keys: TokenKeys,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterRequest) -> Result<Session, ApiError> {
        let email = input.email.trim().to_owned();
        if !looks_like_email(&email) {
            return Err(ApiError::InvalidInput(
                "please provide a valid email".to_owned(),
            ));
        }
        if input.password.is_empty() {
            return Err(ApiError::InvalidInput("please provide a password".to_owned()));
        }
        let username = non_blank(input.username);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }
        if let Some(name) = &username {
            if self.users.find_by_username(name).await?.is_some() {
                return Err(ApiError::UsernameTaken);
            }
        }

        let password_hash = hash_secret(input.password, self.keys.bcrypt_cost).await?;
        let now = Utc::now();
        let user = User {
            id: UserId(Uuid::now_v7()),
            email,
            username,
            password_hash,
            phone_number: None,
            refresh_token_hash: None,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");

        start_session(&self.users, user.id, &self.keys).await
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub keys: TokenKeys,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginRequest) -> Result<Session, ApiError> {
        let user = self
            .users
            .find_by_email(input.email.trim())
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_secret(input.password, user.password_hash).await? {
            return Err(ApiError::InvalidCredentials);
        }

        start_session(&self.users, user.id, &self.keys).await
    }
}

// ── Refresh ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshOutput {
    pub user_id: UserId,
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct RefreshUseCase<U: UserRepository> {
    pub users: U,
    pub keys: TokenKeys,
}

impl<U: UserRepository> RefreshUseCase<U> {
    /// Mint a new access token. The refresh token itself is not rotated.
    pub async fn execute(&self, refresh_token: &str) -> Result<RefreshOutput, ApiError> {
        let user = active_session_owner(&self.users, refresh_token, &self.keys)
            .await?
            .ok_or(ApiError::InvalidRefreshToken)?;

        let (access_token, access_token_exp) =
            issue_access_token(user.id, &self.keys.access_secret)
                .map_err(|e| ApiError::Internal(e.into()))?;

        Ok(RefreshOutput {
            user_id: user.id,
            access_token,
            access_token_exp,
        })
    }
}

/// The user whose stored refresh hash matches `refresh_token`, if any.
async fn active_session_owner<U: UserRepository>(
    users: &U,
    refresh_token: &str,
    keys: &TokenKeys,
) -> Result<Option<User>, ApiError> {
    let claims = match decode_token(refresh_token, &keys.refresh_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "refresh token rejected");
            return Ok(None);
        }
    };
    let (Ok(user_id), Some(jti)) = (claims.user_id(), claims.jti) else {
        return Ok(None);
    };
    let Some(user) = users.find_by_id(user_id).await? else {
        return Ok(None);
    };
    let Some(stored) = user.refresh_token_hash.clone() else {
        return Ok(None);
    };

    if verify_secret(jti, stored).await? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<U: UserRepository> {
    pub users: U,
    pub keys: TokenKeys,
}

impl<U: UserRepository> LogoutUseCase<U> {
    /// Clear the stored refresh hash of the session `refresh_token` belongs to.
    /// Returns whether a session was ended; stale or foreign tokens are ignored.
    pub async fn execute(&self, refresh_token: &str) -> Result<bool, ApiError> {
        match active_session_owner(&self.users, refresh_token, &self.keys).await? {
            Some(user) => {
                self.users.set_refresh_token_hash(user.id, None).await?;
                tracing::info!(user_id = %user.id, "session ended");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Profile ──────────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: UserId) -> Result<Profile, ApiError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|user| user.profile())
            .ok_or(ApiError::UserNotFound)
    }
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
    pub bcrypt_cost: u32,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(
        &self,
        user_id: UserId,
        input: UpdateProfileRequest,
    ) -> Result<Profile, ApiError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if let Some(name) = non_blank(input.username) {
            if user.username.as_deref() != Some(name.as_str()) {
                if let Some(holder) = self.users.find_by_username(&name).await? {
                    if holder.id != user.id {
                        return Err(ApiError::UsernameTaken);
                    }
                }
                user.username = Some(name);
            }
        }

        if let Some(phone_number) = input.phone_number {
            user.phone_number = phone_number;
        }

        if let Some(password) = input.password.filter(|p| !p.is_empty()) {
            user.password_hash = hash_secret(password, self.bcrypt_cost).await?;
        }

        user.updated_at = Utc::now();
        self.users.update_profile(&user).await?;
        Ok(user.profile())
    }
}
