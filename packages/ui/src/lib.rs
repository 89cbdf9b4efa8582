//! This crate contains all shared UI for the workspace: the session provider and
//! hooks, auth buttons, the route guard and the OAuth landing views.

mod auth;
pub use auth::{use_auth, use_auth_services, AuthProvider, AuthServices, LoginButton, LogoutButton};

mod guard;
pub use guard::RequireAuth;

mod navbar;
pub use navbar::Navbar;

mod navigator;
pub use navigator::{current_href, BrowserNavigator};

mod storage;
pub use storage::make_store;

pub mod views;
