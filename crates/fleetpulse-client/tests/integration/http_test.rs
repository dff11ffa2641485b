use fleetpulse_client::error::ClientError;
use fleetpulse_client::http::{REFRESH_PATH, TOKEN_KEY};
use fleetpulse_client::storage::KeyValueStore;
use mockito::Matcher;
use reqwest::StatusCode;

use crate::helpers::{api, server};

#[tokio::test]
async fn should_attach_bearer_token() {
    let mut server = server().await;
    let list = server
        .mock("GET", "/api/vehicles")
        .match_header("authorization", "Bearer token-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let (api, _) = api(&server, Some("token-1"));
    assert!(api.list_vehicles().await.unwrap().is_empty());
    list.assert_async().await;
}

#[tokio::test]
async fn should_send_no_authorization_without_token() {
    let mut server = server().await;
    let login = server
        .mock("POST", "/api/auth/login")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"message":"login successful","accessToken":"fresh"}"#)
        .expect(1)
        .create_async()
        .await;

    let (api, store) = api(&server, None);
    let body = api
        .login(&fleetpulse_domain::user::LoginRequest {
            email: "a@b.in".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();
    assert_eq!(body.access_token, "fresh");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("fresh"));
    login.assert_async().await;
}

#[tokio::test]
async fn should_refresh_once_and_retry_on_401() {
    let mut server = server().await;
    let rejected = server
        .mock("GET", "/api/vehicles")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .with_body(r#"{"kind":"UNAUTHORIZED","message":"not authorized"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", REFRESH_PATH)
        .with_status(200)
        .with_body(r#"{"accessToken":"renewed"}"#)
        .expect(1)
        .create_async()
        .await;
    let retried = server
        .mock("GET", "/api/vehicles")
        .match_header("authorization", "Bearer renewed")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let (api, store) = api(&server, Some("stale"));
    assert!(api.list_vehicles().await.unwrap().is_empty());
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("renewed"));

    rejected.assert_async().await;
    refresh.assert_async().await;
    retried.assert_async().await;
}

#[tokio::test]
async fn should_surface_second_401_without_refreshing_again() {
    let mut server = server().await;
    server
        .mock("GET", "/api/auth/me")
        .with_status(401)
        .with_body(r#"{"kind":"UNAUTHORIZED","message":"not authorized"}"#)
        .expect(2)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", REFRESH_PATH)
        .with_status(200)
        .with_body(r#"{"accessToken":"renewed"}"#)
        .expect(1)
        .create_async()
        .await;

    let (api, _) = api(&server, Some("stale"));
    let err = api.me().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(matches!(err, ClientError::Api { .. }));
    refresh.assert_async().await;
}

#[tokio::test]
async fn should_clear_token_and_logout_when_refresh_fails() {
    let mut server = server().await;
    server
        .mock("GET", "/api/auth/profile")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("POST", REFRESH_PATH)
        .with_status(403)
        .with_body(r#"{"kind":"INVALID_REFRESH_TOKEN","message":"invalid refresh token"}"#)
        .expect(1)
        .create_async()
        .await;
    let logout = server
        .mock("POST", "/api/auth/logout")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let (api, store) = api(&server, Some("stale"));
    let err = api.profile().await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired));
    assert_eq!(store.get(TOKEN_KEY), None);
    logout.assert_async().await;
}

#[tokio::test]
async fn should_not_refresh_when_refresh_itself_is_rejected() {
    let mut server = server().await;
    let refresh = server
        .mock("POST", REFRESH_PATH)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let (api, store) = api(&server, Some("stale"));
    let response = api.client().post_empty(REFRESH_PATH).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("stale"));
    refresh.assert_async().await;
}

#[tokio::test]
async fn should_keep_session_when_refresh_body_is_unreadable() {
    let mut server = server().await;
    server
        .mock("GET", "/api/vehicles")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("POST", REFRESH_PATH)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>proxy</html>")
        .expect(1)
        .create_async()
        .await;
    let logout = server
        .mock("POST", "/api/auth/logout")
        .expect(0)
        .create_async()
        .await;

    let (api, store) = api(&server, Some("stale"));
    let err = api.list_vehicles().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("stale"));
    logout.assert_async().await;
}

#[tokio::test]
async fn should_send_refresh_cookie_received_at_login() {
    let mut server = server().await;
    server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_header("set-cookie", "refreshToken=r1; Path=/api/auth; HttpOnly")
        .with_body(r#"{"message":"Login successful","accessToken":"first"}"#)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/api/vehicles")
        .match_header("authorization", "Bearer first")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", REFRESH_PATH)
        .match_header("cookie", Matcher::Regex("refreshToken=r1".into()))
        .with_status(200)
        .with_body(r#"{"accessToken":"second"}"#)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/api/vehicles")
        .match_header("authorization", "Bearer second")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let (api, store) = api(&server, None);
    api.login(&fleetpulse_domain::user::LoginRequest {
        email: "a@b.in".into(),
        password: "pw".into(),
    })
    .await
    .unwrap();

    assert!(api.list_vehicles().await.unwrap().is_empty());
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("second"));
    refresh.assert_async().await;
}
