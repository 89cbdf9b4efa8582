//! # Client settings
//!
//! Loaded with the `config` crate in three layers, later layers winning:
//!
//! 1. built-in defaults (a compile-time `CLIMATE_GATEWAY_URL` replaces the default URL),
//! 2. an optional `config.toml` next to the binary (native builds),
//! 3. environment variables prefixed `CLIMATE_`, e.g. `CLIMATE_GATEWAY_URL`,
//!    `CLIMATE_ENVIRONMENT=production`.
//!
//! ```toml
//! gateway_url = "https://gateway.example.org"
//! environment = "production"
//! request_timeout_secs = 30
//! identity_timeout_secs = 5
//! ```

use config::{Config, ConfigBuilder, File, FileFormat};
use serde::Deserialize;

use crate::ApiError;

const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";

/// Deployment flavour; decides whether the credential cookie is `Secure`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Base URL of the API gateway, without a trailing slash.
    pub gateway_url: String,
    pub environment: Environment,
    /// Per-request timeout for API calls.
    pub request_timeout_secs: u64,
    /// Timeout for the identity check (`GET /auth/me`).
    pub identity_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            environment: Environment::Development,
            request_timeout_secs: 30,
            identity_timeout_secs: 5,
        }
    }
}

impl Settings {
    /// Load defaults, `config.toml` and `CLIMATE_*` environment variables.
    pub fn new() -> Result<Self, ApiError> {
        let config = Self::defaults()?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix("CLIMATE"))
            .build()?;

        Self::finish(config)
    }

    /// Load defaults overlaid with a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, ApiError> {
        let config = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(config)
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ApiError> {
        let gateway_url = option_env!("CLIMATE_GATEWAY_URL").unwrap_or(DEFAULT_GATEWAY_URL);
        Ok(Config::builder()
            .set_default("gateway_url", gateway_url)?
            .set_default("environment", "development")?
            .set_default("request_timeout_secs", 30_i64)?
            .set_default("identity_timeout_secs", 5_i64)?)
    }

    fn finish(config: Config) -> Result<Self, ApiError> {
        let mut settings: Settings = config.try_deserialize()?;
        while settings.gateway_url.ends_with('/') {
            settings.gateway_url.pop();
        }
        if settings.gateway_url.is_empty() {
            return Err(ApiError::Config("gateway_url is empty".to_string()));
        }
        Ok(settings)
    }

    /// Absolute URL for a gateway path such as `/auth/me`.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.gateway_url, path)
        } else {
            format!("{}/{}", self.gateway_url, path)
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
}

/// Contract for the server-set credential cookie.
///
/// The client never reads the cookie; this type documents (and lets test servers
/// reproduce) exactly what the gateway sets after the provider redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    pub name: String,
    pub max_age_secs: u64,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl CookiePolicy {
    pub const NAME: &'static str = "access_token";
    /// 7 days.
    pub const MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

    pub fn for_environment(environment: Environment) -> Self {
        Self {
            name: Self::NAME.to_string(),
            max_age_secs: Self::MAX_AGE_SECS,
            secure: environment == Environment::Production,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
        }
    }

    /// `Set-Cookie` value that installs `value` as the credential.
    pub fn set_cookie(&self, value: &str) -> String {
        self.render(value, self.max_age_secs)
    }

    /// `Set-Cookie` value that deletes the credential.
    pub fn clear_cookie(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: u64) -> String {
        let mut cookie = format!(
            "{}={}; Max-Age={}; Path={}",
            self.name, value, max_age, self.path
        );
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(match self.same_site {
            SameSite::Strict => "; SameSite=Strict",
            SameSite::Lax => "; SameSite=Lax",
        });
        cookie
    }
}
