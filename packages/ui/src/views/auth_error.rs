//! Error page the gateway redirects to when the provider round-trip fails.

use std::rc::Rc;
use std::time::Duration;

use api::Destination;
use dioxus::prelude::*;
use session::ScheduledTask;

use crate::auth::use_auth_services;

/// How long the error stays on screen before returning home.
pub const AUTH_ERROR_REDIRECT_DELAY: Duration = Duration::from_secs(5);

/// User-facing text for an error code from the gateway. Unknown codes get the
/// generic message.
pub fn auth_error_message(code: &str) -> &'static str {
    match code {
        "access_denied" => "You declined the sign-in request.",
        "missing_code" => "No authorization code was received.",
        "missing_token" => "No access token was received.",
        "auth_failed" => "Authentication could not be completed.",
        "server_error" => "The server encountered an error.",
        _ => "An unknown error occurred.",
    }
}

#[component]
pub fn AuthErrorView(#[props(default = "unknown_error".to_string())] message: String) -> Element {
    let services = use_auth_services();

    let redirect = use_hook({
        let navigator = services.navigator.clone();
        move || {
            let (task, work) = ScheduledTask::new(AUTH_ERROR_REDIRECT_DELAY, move || {
                navigator.navigate(&Destination::Home)
            });
            spawn(work);
            Rc::new(task)
        }
    });
    let seconds = redirect.delay().as_secs();
    use_drop(move || redirect.cancel());

    let text = auth_error_message(&message);
    let go_home = move |_| services.navigator.navigate(&Destination::Home);

    rsx! {
        div {
            class: "auth-error",
            style: "display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; padding: 2rem; background: #f7f7f5; text-align: center;",
            h2 { style: "margin: 0 0 0.5rem; color: #37352f; font-size: 1.75rem;", "Sign-in failed" }
            p { style: "margin: 0 0 2rem; color: #787774;", "{text}" }
            button {
                class: "auth-error-home",
                style: "padding: 0.625rem 1.25rem; border: none; border-radius: 6px; background: #2383e2; color: #ffffff; cursor: pointer;",
                onclick: go_home,
                "Back to the home page"
            }
            p { style: "margin-top: 1rem; font-size: 0.875rem; color: #9b9a97;", "You will be returned to the home page in {seconds} seconds." }
        }
    }
}
