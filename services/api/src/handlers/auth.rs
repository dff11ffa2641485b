use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use fleetpulse_auth_types::{
    cookie::{clear_refresh_token_cookie, refresh_token_from, set_refresh_token_cookie},
    identity::BearerIdentity,
};
use fleetpulse_domain::user::{
    AccessTokenResponse, LoginRequest, Profile, RegisterRequest, UpdateProfileRequest,
};

use crate::error::ApiError;
use crate::handlers::extract::ApiJson;
use crate::state::AppState;
use crate::usecase::auth::{
    GetProfileUseCase, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterUseCase,
    UpdateProfileUseCase,
};

// ── POST /api/auth/register ───────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        keys: state.keys.clone(),
    };
    let session = usecase.execute(body).await?;

    let jar = set_refresh_token_cookie(jar, session.refresh_token, &state.cookie);
    let body = AccessTokenResponse {
        message: Some("User registered successfully".to_owned()),
        access_token: session.access_token,
    };
    Ok((StatusCode::CREATED, jar, Json(body)))
}

// ── POST /api/auth/login ──────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        keys: state.keys.clone(),
    };
    let session = usecase.execute(body).await?;

    let jar = set_refresh_token_cookie(jar, session.refresh_token, &state.cookie);
    let body = AccessTokenResponse {
        message: Some("Login successful".to_owned()),
        access_token: session.access_token,
    };
    Ok((jar, Json(body)))
}

// ── POST /api/auth/refresh ────────────────────────────────────────────────────

pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let refresh_token = refresh_token_from(&jar).ok_or(ApiError::MissingRefreshToken)?;

    let usecase = RefreshUseCase {
        users: state.user_repo(),
        keys: state.keys.clone(),
    };
    match usecase.execute(&refresh_token).await {
        Ok(out) => {
            let body = AccessTokenResponse {
                message: None,
                access_token: out.access_token,
            };
            Ok(Json(body).into_response())
        }
        Err(ApiError::InvalidRefreshToken) => {
            let jar = clear_refresh_token_cookie(jar, &state.cookie);
            Ok((jar, ApiError::InvalidRefreshToken).into_response())
        }
        Err(e) => Err(e),
    }
}

// ── POST /api/auth/logout ─────────────────────────────────────────────────────

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let Some(refresh_token) = refresh_token_from(&jar) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let usecase = LogoutUseCase {
        users: state.user_repo(),
        keys: state.keys.clone(),
    };
    usecase.execute(&refresh_token).await?;

    let jar = clear_refresh_token_cookie(jar, &state.cookie);
    Ok((jar, Json(json!({ "message": "Logged out successfully" }))).into_response())
}

// ── GET /api/auth/me, GET /api/auth/profile ───────────────────────────────────

pub async fn get_profile(
    State(state): State<AppState>,
    identity: BearerIdentity,
) -> Result<Json<Profile>, ApiError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(identity.user_id).await?))
}

// ── PUT /api/auth/profile ─────────────────────────────────────────────────────

pub async fn update_profile(
    State(state): State<AppState>,
    identity: BearerIdentity,
    ApiJson(body): ApiJson<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
        bcrypt_cost: state.keys.bcrypt_cost,
    };
    Ok(Json(usecase.execute(identity.user_id, body).await?))
}
