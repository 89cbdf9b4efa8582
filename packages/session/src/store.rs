//! # Session store
//!
//! [`SessionStore`] is the effectful shell around [`next_state`]. It is constructed once
//! when the application starts and handed to consumers explicitly (the UI puts it in a
//! context); cloning the handle shares the same session.
//!
//! ## Transitions
//!
//! | Operation | Storage | Event |
//! |-----------|---------|-------|
//! | [`bootstrap`](SessionStore::bootstrap) | read record | `Restored`, or `logout` when the token is bad |
//! | [`login`](SessionStore::login) | write record (on success) | `LoggedIn` / `LoginRejected` |
//! | [`establish`](SessionStore::establish) | write record without token | `IdentityConfirmed` |
//! | [`logout`](SessionStore::logout) | remove record | `LoggedOut` |
//!
//! Each operation is synchronous and replaces the state in one step through a
//! `tokio::sync::watch` cell, so readers and [`subscribe`](SessionStore::subscribe)rs
//! only ever see whole states. Storage failures are logged and do not stop the
//! in-memory transition.
//!
//! ## Durable record
//!
//! One JSON document under [`STORAGE_KEY`] holds the raw token, the user and the
//! authenticated flag, written with a single `set` so the three can never disagree.
//! `is_initialized` is never stored; every page load starts `Unknown`.
//!
//! Tabs sharing the same storage overwrite each other's record (last writer wins).

use std::fmt;
use std::sync::Arc;

use api::{AuthGateway, User};
use serde::{Deserialize, Serialize};
use store::{KeyValueStore, KeyValueStoreExt};
use tokio::sync::watch;

use crate::clock::{Clock, SystemClock};
use crate::state::{next_state, SessionEvent, SessionSnapshot, SessionState};
use crate::token;
use crate::SessionError;

/// Storage key of the durable session record.
pub const STORAGE_KEY: &str = "auth-storage";

/// The durable session record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl PersistedSession {
    pub fn authenticated(token: Option<String>, user: User) -> Self {
        Self {
            token,
            user: Some(user),
            is_authenticated: true,
        }
    }
}

struct Inner {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

/// Shared handle to the client session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            inner: Arc::new(Inner {
                state,
                storage,
                clock,
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.state.borrow().is_initialized()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user().cloned()
    }

    /// Receiver that is notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Recover the session from the durable record. Runs once per page load, before
    /// consumers read [`is_initialized`](Self::is_initialized).
    pub fn bootstrap(&self) -> SessionSnapshot {
        let record = match self.load_record() {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session record: {}", e);
                None
            }
        };

        match record.and_then(|r| r.token) {
            None => {
                tracing::debug!("No persisted token, starting anonymous");
                self.apply(SessionEvent::Restored(None));
            }
            Some(raw) => match token::verify(&raw, self.inner.clock.now()) {
                Ok(verified) => {
                    tracing::info!(user_id = %verified.payload.sub, "Session restored");
                    self.apply(SessionEvent::Restored(Some(verified)));
                }
                Err(e) => {
                    tracing::info!("Discarding persisted token: {}", e);
                    self.logout();
                }
            },
        }

        self.snapshot()
    }

    /// Sign in with a bearer token.
    ///
    /// A bad or expired token leaves the session untouched and raises nothing; check
    /// `is_authenticated` on the returned snapshot.
    pub fn login(&self, raw_token: &str) -> SessionSnapshot {
        match token::verify(raw_token, self.inner.clock.now()) {
            Ok(verified) => {
                let record =
                    PersistedSession::authenticated(Some(verified.token.clone()), verified.user());
                self.persist(&record);
                tracing::info!(user_id = %verified.payload.sub, "Logged in");
                self.apply(SessionEvent::LoggedIn(verified));
            }
            Err(e) => {
                tracing::warn!("Login rejected: {}", e);
                self.apply(SessionEvent::LoginRejected);
            }
        }
        self.snapshot()
    }

    /// Adopt an identity the server confirmed through the credential cookie.
    pub fn establish(&self, user: User) -> SessionSnapshot {
        self.persist(&PersistedSession::authenticated(None, user.clone()));
        tracing::info!(user_id = %user.user_id, "Session established from server identity");
        self.apply(SessionEvent::IdentityConfirmed(user));
        self.snapshot()
    }

    /// Clear the durable record and become anonymous. Idempotent; performs no network
    /// revocation (see [`sign_out`](Self::sign_out)).
    pub fn logout(&self) -> SessionSnapshot {
        if let Err(e) = self.inner.storage.remove(STORAGE_KEY) {
            tracing::warn!("Failed to clear session record: {}", e);
        }
        if self.apply(SessionEvent::LoggedOut) {
            tracing::info!("Logged out");
        }
        self.snapshot()
    }

    /// Ask the server who is signed in and align the session with its answer. Any
    /// failure, including network errors, ends in a silent logout.
    ///
    /// The answer is only applied if the session is still in the state it was in when
    /// the request started. A login or logout that lands while the request is in flight
    /// (for example the OAuth callback storing a bearer token) wins.
    pub async fn revalidate<G: AuthGateway>(&self, gateway: &G) -> SessionSnapshot {
        let seen = self.state();
        let answer = gateway.fetch_current_user().await;

        if self.state() != seen {
            tracing::debug!("Session changed during identity check, discarding the answer");
            return self.snapshot();
        }

        match answer {
            Ok(user) => self.establish(user),
            Err(e) => {
                tracing::debug!("Server identity check failed: {}", e);
                self.logout()
            }
        }
    }

    /// Local logout followed by best-effort server revocation. The local state is
    /// anonymous before the network call starts; a failed revocation is only logged.
    pub async fn sign_out<G: AuthGateway>(&self, gateway: &G) -> SessionSnapshot {
        let snapshot = self.logout();
        if let Err(e) = gateway.revoke_session().await {
            tracing::warn!("Server-side session revocation failed: {}", e);
        }
        snapshot
    }

    fn load_record(&self) -> Result<Option<PersistedSession>, SessionError> {
        Ok(self.inner.storage.get_json(STORAGE_KEY)?)
    }

    fn persist(&self, record: &PersistedSession) {
        if let Err(e) = self.inner.storage.set_json(STORAGE_KEY, record) {
            tracing::warn!("Failed to persist session record: {}", e);
        }
    }

    /// Returns whether the state changed.
    fn apply(&self, event: SessionEvent) -> bool {
        self.inner.state.send_if_modified(|state| {
            let next = next_state(state, event);
            if *state == next {
                false
            } else {
                *state = next;
                true
            }
        })
    }
}
