//! # Session crate: who is signed in
//!
//! Owns the client's belief about the current identity and keeps it consistent with
//! the durable client record, the server's credential cookie and live API responses.
//!
//! ## Layers
//!
//! | Module | Kind | Purpose |
//! |--------|------|---------|
//! | [`token`] | pure | Decode a bearer token's claims and check expiry. |
//! | [`state`] | pure | [`SessionState`] and the [`next_state`] transition function. |
//! | [`store`] | effectful | [`SessionStore`]: applies transitions, persists/restores the record, publishes snapshots. |
//! | [`interceptor`] | effectful | [`SessionInterceptor`]: forced logout + redirect on 401/403. |
//! | [`callback`] | effectful | [`CallbackHandler`]: the post-OAuth-redirect flow and its delayed redirects. |
//! | [`schedule`] | effectful | Cancellable [`ScheduledTask`] used for those redirects. |
//! | [`clock`] | seam | Wall-clock source for expiry checks. |
//!
//! ## Lifecycle
//!
//! ```text
//!            bootstrap (no/invalid token)
//!   Unknown ───────────────────────────────▶ Anonymous ◀─┐
//!      │                                       │  ▲      │ logout / 401 / 403
//!      │ bootstrap (valid token)        login  │  │      │
//!      ▼                                       ▼  │      │
//!   Authenticated ◀───────────────────────────────┘──────┘
//! ```
//!
//! `Unknown` is only ever the state before the first bootstrap; after that the
//! session is always initialized.

pub mod callback;
pub mod clock;
mod error;
pub mod interceptor;
pub mod schedule;
pub mod state;
pub mod store;
pub mod token;

pub use callback::{
    extract_token, CallbackHandler, CallbackOutcome, CallbackState, ScheduledRedirect,
    FAILURE_REDIRECT_DELAY, SUCCESS_REDIRECT_DELAY,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SessionError;
pub use interceptor::SessionInterceptor;
pub use schedule::ScheduledTask;
pub use state::{next_state, Credential, SessionEvent, SessionSnapshot, SessionState};
pub use store::{PersistedSession, SessionStore, STORAGE_KEY};
pub use token::{TokenPayload, VerifiedToken};

#[cfg(test)]
pub(crate) mod testing;
