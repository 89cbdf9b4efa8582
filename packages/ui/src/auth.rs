//! Session context and hooks for the UI.
//!
//! [`AuthProvider`] builds the [`AuthServices`] once, bootstraps the session before any
//! child renders and mirrors every later transition into a signal, so a forced logout
//! from the API interceptor re-renders the page like any other state change.

use std::sync::Arc;

use api::{ApiClient, ApiError, AuthGateway, Destination, HttpAuthGateway, Navigator, Settings};
use dioxus::prelude::*;
use session::{SessionInterceptor, SessionSnapshot, SessionStore};

use crate::navigator::BrowserNavigator;
use crate::storage::make_store;

/// Everything the views need to talk to the gateway on behalf of the session.
#[derive(Clone)]
pub struct AuthServices {
    pub session: SessionStore,
    pub gateway: HttpAuthGateway,
    /// Client for application API calls; 401/403 responses sign the user out.
    pub api: ApiClient,
    pub navigator: Arc<dyn Navigator>,
}

impl PartialEq for AuthServices {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session
    }
}

impl AuthServices {
    pub fn new(
        settings: Settings,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let settings = Arc::new(settings);
        let http = api::build_http_client()?;
        let interceptor = SessionInterceptor::new(session.clone(), navigator.clone());

        Ok(Self {
            api: ApiClient::new(settings.clone(), http.clone()).with_interceptor(Arc::new(interceptor)),
            gateway: HttpAuthGateway::new(settings, http),
            session,
            navigator,
        })
    }

    /// Services wired to the platform store and the browser location.
    pub fn for_platform() -> Result<Self, ApiError> {
        Self::new(
            load_settings(),
            SessionStore::new(make_store()),
            Arc::new(BrowserNavigator),
        )
    }
}

fn load_settings() -> Settings {
    // No filesystem or process environment in the browser; only compile-time values apply
    #[cfg(target_arch = "wasm32")]
    let loaded = Settings::from_toml_str("");
    #[cfg(not(target_arch = "wasm32"))]
    let loaded = Settings::new();

    let settings = loaded.unwrap_or_else(|e| {
        tracing::warn!("Falling back to default settings: {}", e);
        Settings::default()
    });
    tracing::info!(
        gateway = %settings.gateway_url,
        production = settings.is_production(),
        "Settings loaded"
    );
    settings
}

/// True while the provider asks the gateway whether a cookie session exists.
#[derive(Clone, Copy)]
pub(crate) struct IdentityCheck(pub(crate) Signal<bool>);

/// Current session snapshot. Updates on login, logout and forced logout.
pub fn use_auth() -> Signal<SessionSnapshot> {
    use_context::<Signal<SessionSnapshot>>()
}

pub fn use_auth_services() -> AuthServices {
    use_context::<AuthServices>()
}

pub(crate) fn use_identity_check() -> Signal<bool> {
    use_context::<IdentityCheck>().0
}

/// Provider component that owns the session.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let services = use_hook(|| {
        let services = AuthServices::for_platform();
        if let Err(e) = &services {
            tracing::error!("Failed to initialise authentication: {}", e);
        }
        services
    });

    match services {
        Ok(services) => rsx! {
            SessionScope { services, {children} }
        },
        Err(e) => rsx! {
            div {
                class: "auth-unavailable",
                style: "padding: 2rem; color: #9b1c1c;",
                "Sign-in is unavailable: {e}"
            }
        },
    }
}

#[component]
fn SessionScope(services: AuthServices, children: Element) -> Element {
    let services = use_context_provider(move || services);

    // Bootstrap inside the first hook so children never see an uninitialised session
    let mut snapshot = use_signal(|| services.session.bootstrap());
    use_context_provider(|| snapshot);

    let mut checking = use_signal(|| !snapshot.peek().is_authenticated);
    use_context_provider(|| IdentityCheck(checking));

    use_hook({
        let session = services.session.clone();
        move || {
            let mut changes = session.subscribe();
            spawn(async move {
                while changes.changed().await.is_ok() {
                    let next = changes.borrow_and_update().snapshot();
                    snapshot.set(next);
                }
            });
        }
    });

    // A cookie-only session has no token to restore; ask the gateway once
    use_hook({
        let services = services.clone();
        move || {
            if services.session.is_authenticated() {
                return;
            }
            spawn(async move {
                let result = services.session.revalidate(&services.gateway).await;
                tracing::debug!(
                    authenticated = result.is_authenticated,
                    "Server identity checked"
                );
                checking.set(false);
            });
        }
    });

    rsx! {
        {children}
    }
}

/// Button that sends the browser to the identity provider.
#[component]
pub fn LoginButton(
    #[props(default = "Continue with Google".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_auth_services();
    let mut redirecting = use_signal(|| false);

    let onclick = move |_| {
        redirecting.set(true);
        services.gateway.initiate_login(services.navigator.as_ref());
    };

    rsx! {
        button {
            class: "{class}",
            disabled: redirecting(),
            onclick: onclick,
            if redirecting() {
                "Redirecting..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to log out the current user.
///
/// The local session is cleared before the gateway is asked to revoke the cookie, so
/// the UI flips to signed-out even when the gateway is unreachable.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_auth_services();

    let onclick = move |_| {
        let services = services.clone();
        async move {
            services.session.sign_out(&services.gateway).await;
            services.navigator.navigate(&Destination::Login);
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
