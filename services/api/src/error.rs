use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use fleetpulse_core::error::error_body;
use fleetpulse_domain::vehicle::VehicleValidationError;

/// API error variants. Rendered as `{kind, message}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("user already exists with that email")]
    EmailTaken,
    #[error("username is already taken")]
    UsernameTaken,
    #[error("a vehicle with that registration number already exists")]
    RegistrationTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no refresh token")]
    MissingRefreshToken,
    #[error("invalid or expired refresh token")]
    InvalidRefreshToken,
    #[error("not authorized to access this vehicle")]
    NotVehicleOwner,
    #[error("user not found")]
    UserNotFound,
    #[error("vehicle not found")]
    VehicleNotFound,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::RegistrationTaken => "REGISTRATION_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingRefreshToken => "MISSING_REFRESH_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::NotVehicleOwner => "NOT_VEHICLE_OWNER",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::VehicleNotFound => "VEHICLE_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_)
            | Self::EmailTaken
            | Self::UsernameTaken
            | Self::RegistrationTaken
            | Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::MissingRefreshToken => StatusCode::UNAUTHORIZED,
            Self::InvalidRefreshToken | Self::NotVehicleOwner => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::VehicleNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<VehicleValidationError> for ApiError {
    fn from(e: VehicleValidationError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // TraceLayer records every status; only 500s carry a cause worth logging.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_body(self.status(), self.kind(), self.to_string())
    }
}
