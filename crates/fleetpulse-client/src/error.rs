use reqwest::StatusCode;

/// Errors surfaced by the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),
    /// Non-2xx response, parsed from the server's `{kind, message}` envelope.
    #[error("{status}: {message}")]
    Api {
        status: StatusCode,
        kind: Option<String>,
        message: String,
    },
    /// The access token was rejected and could not be refreshed. Sign in again.
    #[error("session expired")]
    SessionExpired,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::SessionExpired => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }
}

/// Errors writing to a key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}
