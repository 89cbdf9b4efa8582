use dioxus::prelude::*;

use ui::views::{AuthCallbackView, AuthErrorView};
use ui::{AuthProvider, Navbar};
use views::{Dashboard, Home, Login};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/dashboard")]
        Dashboard {},
    #[end_layout]
    #[route("/login")]
    Login {},
    #[route("/auth/callback")]
    AuthCallback {},
    #[route("/auth/error?:message")]
    AuthError { message: String },
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Pages that share the top bar.
#[component]
fn Shell() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Home {}, "Home" }
            Link { to: Route::Dashboard {}, "Dashboard" }
        }
        Outlet::<Route> {}
    }
}

#[component]
fn AuthCallback() -> Element {
    rsx! { AuthCallbackView {} }
}

#[component]
fn AuthError(message: String) -> Element {
    let message = if message.is_empty() {
        "unknown_error".to_string()
    } else {
        message
    };
    rsx! { AuthErrorView { message } }
}
