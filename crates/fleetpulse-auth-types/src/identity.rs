//! Bearer access-token extractor.

use axum::extract::{FromRef, FromRequestParts};
use http::header::AUTHORIZATION;
use http::request::Parts;

use fleetpulse_core::error::AppError;
use fleetpulse_domain::id::UserId;

use crate::token::validate_access_token;

/// Secret used to sign and verify access tokens. Router state exposes it via `FromRef`.
#[derive(Clone)]
pub struct AccessTokenSecret(pub String);

/// Caller identity taken from `Authorization: Bearer <access token>`.
///
/// Rejects with 401 when the header is absent, not a bearer credential, or the
/// token fails validation (bad signature, expired, malformed subject).
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    pub user_id: UserId,
    pub access_token_exp: u64,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for BearerIdentity
where
    AccessTokenSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // Validation is synchronous; the returned future borrows nothing from `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = AccessTokenSecret::from_ref(state);
        let result = match bearer_token(parts) {
            None => Err(AppError::Unauthorized),
            Some(token) => validate_access_token(token, &secret.0)
                .map(|info| Self {
                    user_id: info.user_id,
                    access_token_exp: info.access_token_exp,
                })
                .map_err(|e| {
                    tracing::debug!(error = %e, "access token rejected");
                    AppError::Unauthorized
                }),
        };

        async move { result }
    }
}
