//! # API crate: network layer of the climate-disclosure client
//!
//! Everything that talks to the gateway lives here, along with the types that cross
//! that boundary. The session crate builds its state machine on top of these seams.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`settings`] | Client configuration (`config` crate: defaults, optional `config.toml`, `CLIMATE_*` env vars) and the expected credential [`CookiePolicy`]. |
//! | [`models`] | The [`User`] identity record shared by token claims and `/auth/me`. |
//! | [`gateway`] | [`AuthGateway`] trait and its reqwest implementation: identity fetch, provider login redirect, revocation. |
//! | [`client`] | [`ApiClient`], the wrapper every other outbound call goes through, with the [`ResponseInterceptor`] seam. |
//! | [`navigation`] | [`Destination`] and the [`Navigator`] seam used for redirects. |
//! | [`error`] | [`ApiError`] taxonomy. |
//!
//! ## Credentials
//!
//! The gateway authenticates requests with an HttpOnly cookie that scripts cannot read.
//! No request built here carries a bearer header; instead requests are "credentialed":
//! `credentials: include` on wasm, a shared cookie jar on native.

pub mod client;
pub mod error;
pub mod gateway;
pub mod models;
pub mod navigation;
pub mod settings;

pub use client::{ApiClient, ResponseInterceptor};
pub use error::ApiError;
pub use gateway::{AuthGateway, HttpAuthGateway};
pub use models::User;
pub use navigation::{Destination, Navigator};
pub use settings::{CookiePolicy, Environment, SameSite, Settings};

pub use reqwest::{Method, StatusCode, Url};

/// Build the HTTP client shared by [`ApiClient`] and [`HttpAuthGateway`].
///
/// Both must use the same client so that, on native targets, the cookie set during
/// the OAuth round-trip is visible to every later request.
pub fn build_http_client() -> Result<reqwest::Client, ApiError> {
    let builder = reqwest::Client::builder();

    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder.cookie_store(true);

    Ok(builder.build()?)
}

/// Mark a request as credentialed so the browser attaches the session cookie.
pub(crate) fn credentialed(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    #[cfg(target_arch = "wasm32")]
    {
        request.fetch_credentials_include()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        request
    }
}

#[cfg(test)]
mod test_server;
