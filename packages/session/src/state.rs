//! # Session state machine (pure)
//!
//! [`next_state`] is a total function from the current [`SessionState`] and a
//! [`SessionEvent`] to the next state. It does no I/O: token verification happens
//! before an event is built, persistence happens in [`crate::SessionStore`] around it.

use api::User;

use crate::token::VerifiedToken;

/// What proves the current identity to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// A decoded, unexpired bearer token held by the client.
    Bearer(String),
    /// Only the HttpOnly cookie is held; the identity was confirmed by `GET /auth/me`.
    ServerCookie,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Before the first bootstrap of this page load.
    #[default]
    Unknown,
    Anonymous,
    Authenticated { user: User, credential: Credential },
}

impl SessionState {
    pub fn is_initialized(&self) -> bool {
        !matches!(self, SessionState::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated {
                credential: Credential::Bearer(token),
                ..
            } => Some(token),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: self.is_authenticated(),
            is_initialized: self.is_initialized(),
            user: self.user().cloned(),
            token: self.token().map(str::to_string),
        }
    }
}

/// Flat read-only view handed to consumers (pages, headers, guards).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub is_initialized: bool,
    pub user: Option<User>,
    pub token: Option<String>,
}

impl SessionSnapshot {
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(User::display_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Bootstrap finished; `None` when there was no usable persisted token.
    Restored(Option<VerifiedToken>),
    LoggedIn(VerifiedToken),
    /// A login attempt with a bad or expired token.
    LoginRejected,
    /// The server vouched for this identity via the credential cookie.
    IdentityConfirmed(User),
    LoggedOut,
}

pub fn next_state(current: &SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::Restored(Some(verified)) | SessionEvent::LoggedIn(verified) => {
            SessionState::Authenticated {
                user: verified.user(),
                credential: Credential::Bearer(verified.token),
            }
        }
        SessionEvent::Restored(None) | SessionEvent::LoggedOut => SessionState::Anonymous,
        SessionEvent::LoginRejected => current.clone(),
        SessionEvent::IdentityConfirmed(user) => SessionState::Authenticated {
            user,
            credential: Credential::ServerCookie,
        },
    }
}
