use api::Destination;
use dioxus::prelude::*;

use crate::auth::{use_auth, use_auth_services, use_identity_check};

/// Renders `children` only for an authenticated session; otherwise sends the browser
/// to the login page once the session (and any cookie identity check) has settled.
#[component]
pub fn RequireAuth(children: Element) -> Element {
    let auth = use_auth();
    let checking = use_identity_check();
    let services = use_auth_services();

    use_effect(move || {
        let snapshot = auth();
        if snapshot.is_initialized && !checking() && !snapshot.is_authenticated {
            tracing::debug!("Protected page without a session, redirecting to login");
            services.navigator.navigate(&Destination::Login);
        }
    });

    let snapshot = auth();
    if snapshot.is_authenticated {
        rsx! {
            {children}
        }
    } else {
        rsx! {
            div {
                class: "auth-guard-pending",
                style: "display: flex; align-items: center; justify-content: center; min-height: 50vh; color: #787774;",
                "Checking your session..."
            }
        }
    }
}
