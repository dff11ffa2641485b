//! Router-level checks for paths that answer before touching the database.

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use fleetpulse_api::router::{build_router, cors_layer};
use fleetpulse_api::state::AppState;
use fleetpulse_auth_types::cookie::CookieSettings;
use fleetpulse_core::middleware::REQUEST_ID_HEADER;
use fleetpulse_testing::auth::MockAuth;
use fleetpulse_testing::fixture::vehicle_details;

use crate::helpers::test_keys;

fn server_with(cors: CorsLayer) -> TestServer {
    let state = AppState {
        db: DatabaseConnection::default(),
        keys: test_keys(),
        cookie: CookieSettings::default(),
    };
    TestServer::new(build_router(state, cors)).unwrap()
}

fn server() -> TestServer {
    server_with(CorsLayer::new())
}

fn refresh_cookie(value: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("refreshToken={value}")).unwrap()
}

// ── Meta ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_greet_on_api_root() {
    let resp = server().get("/api").await;
    resp.assert_status_ok();
    assert_eq!(
        resp.json::<Value>(),
        json!({ "message": "Welcome to FleetPulse API!" })
    );
}

#[tokio::test]
async fn should_report_live_but_not_ready_without_database() {
    let server = server();
    server.get("/healthz").await.assert_status_ok();
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_render_unknown_route_as_not_found_envelope() {
    let resp = server().get("/api/nowhere").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>()["kind"], "NOT_FOUND");
}

#[tokio::test]
async fn should_echo_request_id() {
    let resp = server()
        .get("/healthz")
        .add_header(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_static("req-42"),
        )
        .await;
    assert_eq!(resp.header(REQUEST_ID_HEADER), "req-42");
}

#[tokio::test]
async fn should_allow_credentialed_cors_from_configured_origin() {
    let server = server_with(cors_layer("http://localhost:5173").unwrap());
    let resp = server
        .get("/api")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
        .await;
    assert_eq!(
        resp.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        "http://localhost:5173"
    );
    assert_eq!(resp.header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS), "true");
}

// ── Bearer protection ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_vehicle_routes_without_bearer() {
    let resp = server().get("/api/vehicles").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<Value>()["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let auth = MockAuth::random().with_secret("someone-else");
    let resp = server()
        .get("/api/auth/me")
        .add_header(header::AUTHORIZATION, auth.bearer())
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_treat_malformed_vehicle_id_as_not_found() {
    let auth = MockAuth::random();
    let resp = server()
        .get("/api/vehicles/not-a-uuid")
        .add_header(header::AUTHORIZATION, auth.bearer())
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>()["kind"], "VEHICLE_NOT_FOUND");
}

#[tokio::test]
async fn should_validate_vehicle_before_storing() {
    let auth = MockAuth::random();
    let mut details = vehicle_details("MH12AB1234");
    details.fuel_type = String::new();

    let resp = server()
        .post("/api/vehicles")
        .add_header(header::AUTHORIZATION, auth.bearer())
        .json(&details)
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<Value>(),
        json!({ "kind": "INVALID_INPUT", "message": "please provide the fuel type" })
    );
}

// ── Auth ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_unparseable_body_with_envelope() {
    let resp = server()
        .post("/api/auth/login")
        .json(&json!({ "email": "a@example.com" }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_reject_register_with_invalid_email() {
    let resp = server()
        .post("/api/auth/register")
        .json(&json!({ "email": "nope", "password": "pw" }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_require_refresh_cookie() {
    let resp = server().post("/api/auth/refresh").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<Value>()["kind"], "MISSING_REFRESH_TOKEN");
}

#[tokio::test]
async fn should_clear_cookie_when_refresh_token_is_invalid() {
    let resp = server()
        .post("/api/auth/refresh")
        .add_header(header::COOKIE, refresh_cookie("garbage"))
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(resp.json::<Value>()["kind"], "INVALID_REFRESH_TOKEN");

    let set_cookie = resp.header(header::SET_COOKIE);
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("refreshToken=;"), "{set_cookie}");
    assert!(set_cookie.contains("Max-Age=0"), "{set_cookie}");
}

#[tokio::test]
async fn should_answer_logout_without_cookie_with_no_content() {
    let resp = server().post("/api/auth/logout").await;
    resp.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn should_clear_cookie_on_logout_with_stale_token() {
    let resp = server()
        .post("/api/auth/logout")
        .add_header(header::COOKIE, refresh_cookie("stale"))
        .await;
    resp.assert_status_ok();
    assert_eq!(
        resp.json::<Value>(),
        json!({ "message": "Logged out successfully" })
    );
    let set_cookie = resp.header(header::SET_COOKIE);
    assert!(set_cookie.to_str().unwrap().contains("Max-Age=0"));
}
