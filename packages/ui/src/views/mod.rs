mod auth_callback;
pub use auth_callback::AuthCallbackView;

mod auth_error;
pub use auth_error::{auth_error_message, AuthErrorView, AUTH_ERROR_REDIRECT_DELAY};
