//! # Auth gateway
//!
//! [`AuthGateway`] covers the three network calls that create or end a server-side
//! session. They bypass [`crate::ApiClient`] on purpose: a 401 from `/auth/me` during the
//! OAuth callback is an expected outcome the caller handles, not a forced logout.
//!
//! | Operation | Request | Failure |
//! |-----------|---------|---------|
//! | [`fetch_current_user`](AuthGateway::fetch_current_user) | `GET /auth/me` (credentialed) | non-2xx → [`ApiError::NotAuthenticated`], transport → [`ApiError::Network`] |
//! | [`initiate_login`](AuthGateway::initiate_login) | navigate to `/auth/google/login` | none, fire-and-forget |
//! | [`revoke_session`](AuthGateway::revoke_session) | `POST /auth/logout` (credentialed) | returned, but callers must not let it block local logout |

use std::sync::Arc;
use std::time::Duration;

use crate::navigation::{Destination, Navigator};
use crate::{credentialed, ApiError, Settings, User};

pub const IDENTITY_PATH: &str = "/auth/me";
pub const PROVIDER_LOGIN_PATH: &str = "/auth/google/login";
pub const LOGOUT_PATH: &str = "/auth/logout";

/// Network operations that establish or tear down the server-side session.
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    async fn fetch_current_user(&self) -> Result<User, ApiError>;

    fn initiate_login(&self, navigator: &dyn Navigator);

    async fn revoke_session(&self) -> Result<(), ApiError>;
}

/// [`AuthGateway`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpAuthGateway {
    http: reqwest::Client,
    settings: Arc<Settings>,
}

impl HttpAuthGateway {
    pub fn new(settings: Arc<Settings>, http: reqwest::Client) -> Self {
        Self { http, settings }
    }

    /// URL of the provider login entry point on the gateway.
    pub fn login_url(&self) -> String {
        self.settings.endpoint(PROVIDER_LOGIN_PATH)
    }
}

impl AuthGateway for HttpAuthGateway {
    async fn fetch_current_user(&self) -> Result<User, ApiError> {
        let url = self.settings.endpoint(IDENTITY_PATH);
        let request = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(self.settings.identity_timeout_secs));

        let response = credentialed(request).send().await.map_err(|e| {
            tracing::warn!("Identity request failed: {}", e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "No authenticated identity");
            return Err(ApiError::NotAuthenticated {
                status: status.as_u16(),
            });
        }

        response
            .json::<User>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn initiate_login(&self, navigator: &dyn Navigator) {
        let url = self.login_url();
        tracing::info!(%url, "Redirecting to identity provider");
        navigator.navigate(&Destination::External(url));
    }

    async fn revoke_session(&self) -> Result<(), ApiError> {
        let url = self.settings.endpoint(LOGOUT_PATH);
        let request = self
            .http
            .post(&url)
            .timeout(Duration::from_secs(self.settings.request_timeout_secs));
        let response = credentialed(request).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status_body(status.as_u16(), &body))
        }
    }
}
