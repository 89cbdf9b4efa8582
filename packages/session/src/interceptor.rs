//! Forced logout on rejected API calls.
//!
//! Installed on [`api::ApiClient`]. Any 401 or 403 from an API route means the server no
//! longer honours the client's credential, so the session is cleared and the browser is
//! sent to the login surface. The caller still receives the error.
//!
//! Concurrent rejections each run the same idempotent logout; repeated navigation to
//! the login page is harmless.

use std::sync::Arc;

use api::{Destination, Navigator, ResponseInterceptor, StatusCode};

use crate::SessionStore;

pub struct SessionInterceptor {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl SessionInterceptor {
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }
}

impl ResponseInterceptor for SessionInterceptor {
    fn on_response(&self, status: StatusCode, url: &str) {
        if status != StatusCode::UNAUTHORIZED && status != StatusCode::FORBIDDEN {
            return;
        }

        tracing::warn!(status = status.as_u16(), %url, "API rejected credential, signing out");
        // Clear before navigating so the login page never renders an authenticated session
        self.session.logout();
        self.navigator.navigate(&Destination::Login);
    }
}
