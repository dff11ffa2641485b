//! JWT access- and refresh-token encoding and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fleetpulse_domain::id::UserId;

/// Access-token lifetime in seconds (1 hour).
pub const ACCESS_TOKEN_EXP: u64 = 3600;

/// Refresh-token lifetime and cookie Max-Age in seconds (7 days).
pub const REFRESH_TOKEN_EXP: u64 = 604800;

/// User identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: UserId,
    pub access_token_exp: u64,
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token encoding failed")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload for both token kinds.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user ID (UUID string) |
/// | `jti` | refresh tokens only: random ID whose hash is stored on the user |
/// | `exp` | expiration, seconds since UNIX epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    pub exp: u64,
}

impl JwtClaims {
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub
            .parse::<Uuid>()
            .map(UserId)
            .map_err(|_| AuthError::Malformed)
    }
}

/// A freshly minted refresh token plus the `jti` the caller must hash and store.
#[derive(Debug)]
pub struct IssuedRefreshToken {
    pub token: String,
    pub jti: String,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn sign(claims: &JwtClaims, secret: &str) -> Result<String, AuthError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Encoding)
}

/// Issue an access token. Returns the token and its expiry timestamp.
pub fn issue_access_token(user_id: UserId, secret: &str) -> Result<(String, u64), AuthError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        jti: None,
        exp,
    };
    Ok((sign(&claims, secret)?, exp))
}

/// Issue a refresh token carrying a fresh random `jti`.
pub fn issue_refresh_token(user_id: UserId, secret: &str) -> Result<IssuedRefreshToken, AuthError> {
    let jti = Uuid::new_v4().to_string();
    let claims = JwtClaims {
        sub: user_id.to_string(),
        jti: Some(jti.clone()),
        exp: now_secs() + REFRESH_TOKEN_EXP,
    };
    Ok(IssuedRefreshToken {
        token: sign(&claims, secret)?,
        jti,
    })
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims `exp` + `sub`.
pub fn decode_token(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate an access token, returning the caller's identity.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_token(token, secret)?;
    Ok(TokenInfo {
        user_id: claims.user_id()?,
        access_token_exp: claims.exp,
    })
}
