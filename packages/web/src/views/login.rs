//! Login page view with the provider button.

use dioxus::prelude::*;
use ui::{use_auth, LoginButton};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // Already signed in: nothing to do here
    use_effect(move || {
        if auth().is_authenticated {
            nav.replace(Route::Home {});
        }
    });

    rsx! {
        div {
            class: "login-container",
            style: "display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; padding: 2rem; background: #ffffff;",

            h1 {
                style: "margin-bottom: 0.5rem; color: #37352f; font-weight: 700; font-size: 1.75rem;",
                "Climate Disclosure Portal"
            }

            p {
                style: "margin-bottom: 2rem; color: #787774; font-size: 0.9375rem;",
                "Sign in to prepare and review your disclosure reports."
            }

            div {
                class: "login-buttons",
                style: "display: flex; flex-direction: column; gap: 0.75rem; width: 100%; max-width: 320px;",

                LoginButton {
                    label: "Continue with Google",
                    class: "login-btn google-btn",
                }
            }
        }

        style {
            r#"
            .login-btn {{
                display: flex;
                align-items: center;
                justify-content: center;
                padding: 0.625rem 1.25rem;
                border: none;
                border-radius: 4px;
                font-size: 0.9375rem;
                font-weight: 500;
                cursor: pointer;
                transition: background-color 0.15s;
                font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
            }}

            .login-btn:disabled {{
                opacity: 0.5;
                cursor: not-allowed;
            }}

            .google-btn {{
                background-color: #4285f4;
                color: white;
            }}

            .google-btn:hover:not(:disabled) {{
                background-color: #357abd;
            }}
            "#
        }
    }
}
