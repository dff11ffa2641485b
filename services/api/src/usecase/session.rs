use fleetpulse_auth_types::token::{issue_access_token, issue_refresh_token};
use fleetpulse_domain::id::UserId;

use crate::domain::repository::UserRepository;
use crate::error::ApiError;
use crate::usecase::password::hash_secret;

/// Signing secrets and hashing cost shared by the auth use cases.
#[derive(Clone)]
pub struct TokenKeys {
    pub access_secret: String,
    pub refresh_secret: String,
    pub bcrypt_cost: u32,
}

#[derive(Debug)]
pub struct Session {
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// Issue an access/refresh pair and store the refresh token's `jti` hash,
/// replacing any previously active refresh token.
pub async fn start_session<U: UserRepository>(
    users: &U,
    user_id: UserId,
    keys: &TokenKeys,
) -> Result<Session, ApiError> {
    let (access_token, access_token_exp) = issue_access_token(user_id, &keys.access_secret)
        .map_err(|e| ApiError::Internal(e.into()))?;
    let refresh = issue_refresh_token(user_id, &keys.refresh_secret)
        .map_err(|e| ApiError::Internal(e.into()))?;

    let jti_hash = hash_secret(refresh.jti, keys.bcrypt_cost).await?;
    users
        .set_refresh_token_hash(user_id, Some(jti_hash))
        .await?;

    Ok(Session {
        access_token,
        access_token_exp,
        refresh_token: refresh.token,
    })
}
