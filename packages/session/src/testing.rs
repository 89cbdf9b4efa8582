//! Shared helpers for this crate's tests.

use api::{ApiError, AuthGateway, Destination, Navigator, User};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use parking_lot::Mutex;
use serde_json::json;

use crate::token::{self, VerifiedToken};

/// Fixed "now" used across tests (2025-01-01T00:00:00Z).
pub const NOW: i64 = 1_735_689_600;

/// Build an unsigned compact JWT around `claims`.
pub fn encode_token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

pub fn token_for(sub: &str, exp: i64) -> String {
    encode_token(json!({
        "sub": sub,
        "email": "a@b.com",
        "exp": exp,
        "iat": NOW - 60,
    }))
}

pub fn verified_token(sub: &str, exp: i64) -> VerifiedToken {
    token::verify(&token_for(sub, exp), NOW).unwrap()
}

pub fn sample_user(id: &str) -> User {
    User {
        user_id: id.to_string(),
        email: "a@b.com".to_string(),
        username: None,
        name: None,
        company_name: None,
        industry_type: None,
        picture: None,
    }
}

/// Gateway with a canned identity response.
pub struct FakeGateway {
    identity: Result<User, ApiError>,
    revoke: Result<(), ApiError>,
    pub identity_calls: Mutex<u32>,
    pub revoke_calls: Mutex<u32>,
}

impl FakeGateway {
    pub fn returning(identity: Result<User, ApiError>) -> Self {
        Self {
            identity,
            revoke: Ok(()),
            identity_calls: Mutex::new(0),
            revoke_calls: Mutex::new(0),
        }
    }

    pub fn with_revoke(mut self, revoke: Result<(), ApiError>) -> Self {
        self.revoke = revoke;
        self
    }
}

impl AuthGateway for FakeGateway {
    async fn fetch_current_user(&self) -> Result<User, ApiError> {
        *self.identity_calls.lock() += 1;
        self.identity.clone()
    }

    fn initiate_login(&self, navigator: &dyn Navigator) {
        navigator.navigate(&Destination::External("https://idp.test/login".to_string()));
    }

    async fn revoke_session(&self) -> Result<(), ApiError> {
        *self.revoke_calls.lock() += 1;
        self.revoke.clone()
    }
}

impl AuthGateway for &FakeGateway {
    async fn fetch_current_user(&self) -> Result<User, ApiError> {
        (**self).fetch_current_user().await
    }

    fn initiate_login(&self, navigator: &dyn Navigator) {
        (**self).initiate_login(navigator)
    }

    async fn revoke_session(&self) -> Result<(), ApiError> {
        (**self).revoke_session().await
    }
}

/// Navigator that records destinations.
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
