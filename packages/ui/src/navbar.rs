use dioxus::prelude::*;

use crate::auth::{use_auth, LoginButton, LogoutButton};

/// Top bar with the caller's links on the left and the session controls on the right.
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let snapshot = auth();

    let session_controls = match snapshot.display_name() {
        Some(name) => rsx! {
            span { class: "navbar-user", "{name}" }
            LogoutButton { class: "navbar-button" }
        },
        None if snapshot.is_initialized => rsx! {
            LoginButton { label: "Sign in", class: "navbar-button" }
        },
        None => rsx! {},
    };

    rsx! {
        nav {
            class: "navbar",
            style: "display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; border-bottom: 1px solid #e9e9e7;",
            div {
                class: "navbar-links",
                style: "display: flex; gap: 1rem;",
                {children}
            }
            div {
                class: "navbar-session",
                style: "display: flex; align-items: center; gap: 0.75rem;",
                {session_controls}
            }
        }
    }
}
