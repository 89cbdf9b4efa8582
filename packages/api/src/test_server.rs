//! In-process stand-in for the API gateway, used by this crate's tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::json;

use crate::navigation::{Destination, Navigator};
use crate::{build_http_client, CookiePolicy, Environment, Settings};

const SESSION_VALUE: &str = "valid-session";

pub struct TestGateway {
    addr: SocketAddr,
    settings: Arc<Settings>,
    client: reqwest::Client,
}

impl TestGateway {
    pub fn settings(&self) -> Arc<Settings> {
        self.settings.clone()
    }

    pub fn client(&self) -> reqwest::Client {
        self.client.clone()
    }

    /// Settings pointing at `path_prefix` on this server, overlaid with `extra_toml`.
    pub fn settings_with(&self, path_prefix: &str, extra_toml: &str) -> Arc<Settings> {
        let toml = format!(
            "gateway_url = \"http://{}{}\"\n{}",
            self.addr, path_prefix, extra_toml
        );
        Arc::new(Settings::from_toml_str(&toml).unwrap())
    }

    /// Simulate the end of the provider round-trip: the gateway sets the cookie.
    pub async fn sign_in(&self) {
        let response = self
            .client
            .post(format!("http://{}/test/sign-in", self.addr))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains(&format!("{}={}", CookiePolicy::NAME, SESSION_VALUE)))
}

fn policy() -> CookiePolicy {
    CookiePolicy::for_environment(Environment::Development)
}

async fn me(headers: HeaderMap) -> impl IntoResponse {
    if has_session(&headers) {
        (
            StatusCode::OK,
            Json(json!({
                "user_id": "u1",
                "email": "a@b.com",
                "name": "Kim",
                "company_name": "Acme Steel",
                "industry_type": "manufacturing"
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "authentication token missing" })),
        )
    }
}

async fn sign_in() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, policy().set_cookie(SESSION_VALUE))],
        Json(json!({ "ok": true })),
    )
}

async fn logout(headers: HeaderMap) -> axum::response::Response {
    if has_session(&headers) {
        (
            [(header::SET_COOKIE, policy().clear_cookie())],
            Json(json!({ "message": "logged out" })),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "authentication token missing" })),
        )
            .into_response()
    }
}

async fn reports(headers: HeaderMap) -> axum::response::Response {
    if has_session(&headers) {
        Json(json!([{ "id": 1, "title": "TCFD 2025" }])).into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn forbidden() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "message": "insufficient scope" })),
    )
}

async fn broken() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "boom", "code": "E500" })),
    )
}

async fn echo(Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    Json(json!({ "echo": body }))
}

/// Never answers within any timeout the tests use.
async fn stalled() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(30)).await;
    StatusCode::OK
}

async fn delete_report() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

pub async fn spawn_gateway() -> TestGateway {
    let app = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/test/sign-in", post(sign_in))
        .route("/api/reports", get(reports))
        .route("/api/reports/1", axum::routing::delete(delete_report))
        .route("/api/forbidden", get(forbidden))
        .route("/api/broken", get(broken))
        .route("/api/echo", post(echo).put(echo).patch(echo))
        .route("/stalled/auth/me", get(stalled))
        .route("/api/stalled", get(stalled));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let settings = Arc::new(
        Settings::from_toml_str(&format!(r#"gateway_url = "http://{addr}""#)).unwrap(),
    );
    let client = build_http_client().unwrap();

    TestGateway {
        addr,
        settings,
        client,
    }
}

/// Navigator that only records where it was sent.
#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Destination> {
        self.visited.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: &Destination) {
        self.visited.lock().push(destination.clone());
    }
}
