//! Authenticated HTTP client with one silent token refresh.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use fleetpulse_domain::user::AccessTokenResponse;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::storage::KeyValueStore;

/// Store key holding the current access token.
pub const TOKEN_KEY: &str = "token";

pub const REFRESH_PATH: &str = "/api/auth/refresh";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// HTTP client that attaches the stored bearer token and recovers from one
/// expired token per request.
///
/// On `401` (except from the refresh endpoint itself) it calls
/// `POST /api/auth/refresh` once; the refresh cookie travels in the client's
/// cookie jar. A successful refresh stores the new token and the original
/// request is retried exactly once, with its result returned as-is. A refresh
/// the server rejects (non-2xx) clears the stored token, calls logout
/// best-effort and yields [`ClientError::SessionExpired`]; transport and decode
/// failures are returned unchanged and leave the token in place.
///
/// Concurrent callers are not coordinated; each may refresh on its own.
pub struct AuthClient<S> {
    http: reqwest::Client,
    base_url: String,
    store: S,
}

impl<S: KeyValueStore> AuthClient<S> {
    pub fn new(config: &ClientConfig, store: S) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            store,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        self.store.set(TOKEN_KEY, token)?;
        Ok(())
    }

    pub fn clear_token(&self) -> Result<(), ClientError> {
        self.store.remove(TOKEN_KEY)?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build<B: Serialize + ?Sized>(
        &self,
        method: &Method,
        path: &str,
        body: Option<&B>,
    ) -> RequestBuilder {
        let mut req = self.http.request(method.clone(), self.url(path));
        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        req
    }

    /// Send a request, refreshing and retrying once on `401`.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ClientError> {
        let response = self.build(&method, path, body).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED || path == REFRESH_PATH {
            return Ok(response);
        }

        tracing::debug!(%method, path, "access token rejected, refreshing");
        match self.refresh().await {
            Ok(()) => Ok(self.build(&method, path, body).send().await?),
            Err(e @ ClientError::Api { .. }) => {
                tracing::warn!(error = %e, "token refresh rejected, ending session");
                self.end_session().await;
                Err(ClientError::SessionExpired)
            }
            // Transport or decode failure; the refresh cookie may still be valid.
            Err(e) => {
                tracing::warn!(error = %e, "token refresh did not complete");
                Err(e)
            }
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response, ClientError> {
        self.send::<()>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ClientError> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn post_empty(&self, path: &str) -> Result<Response, ClientError> {
        self.send::<()>(Method::POST, path, None).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ClientError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, ClientError> {
        self.send::<()>(Method::DELETE, path, None).await
    }

    /// Exchange the refresh cookie for a new access token and store it.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.url(REFRESH_PATH)).send().await?;
        let body: AccessTokenResponse = parse_json(response).await?;
        self.set_token(&body.access_token)
    }

    async fn end_session(&self) {
        if let Err(e) = self.clear_token() {
            tracing::warn!(error = %e, "failed to clear stored token");
        }
        if let Err(e) = self.http.post(self.url(LOGOUT_PATH)).send().await {
            tracing::debug!(error = %e, "logout after failed refresh did not complete");
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    kind: Option<String>,
    message: Option<String>,
}

fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    let envelope = serde_json::from_slice::<ErrorEnvelope>(body).ok();
    let kind = envelope.as_ref().and_then(|e| e.kind.clone());
    let message = envelope
        .and_then(|e| e.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_owned());
    ClientError::Api {
        status,
        kind,
        message,
    }
}

/// Decode a 2xx JSON body, or turn the error envelope into [`ClientError::Api`].
pub async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(api_error(status, &body));
    }
    serde_json::from_slice(&body).map_err(ClientError::Decode)
}

/// Like [`parse_json`] but discards the body.
pub async fn expect_success(response: Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.bytes().await?;
    Err(api_error(status, &body))
}
