//! # OAuth callback flow
//!
//! The identity provider sends the browser back to `/auth/callback` after it has set
//! the credential cookie on the gateway. [`CallbackHandler::run`] asks the gateway who
//! is signed in, updates the [`SessionStore`] and decides where to go next:
//!
//! | Outcome | Session | Redirect |
//! |---------|---------|----------|
//! | identity returned, `?token=` verifies | `login(token)` | Home after [`SUCCESS_REDIRECT_DELAY`] |
//! | identity returned, no usable token | `establish(user)` | Home after [`SUCCESS_REDIRECT_DELAY`] |
//! | identity request failed | untouched | Login after [`FAILURE_REDIRECT_DELAY`] |
//!
//! The redirect itself is not performed here. [`CallbackHandler::scheduled_redirect`]
//! describes it and [`ScheduledRedirect::schedule`] turns it into a cancellable
//! [`ScheduledTask`] that the view owns.

use std::future::Future;
use std::time::Duration;

use api::{ApiError, AuthGateway, Destination, Url};

use crate::schedule::ScheduledTask;
use crate::SessionStore;

pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(1000);
pub const FAILURE_REDIRECT_DELAY: Duration = Duration::from_millis(3000);

const MISSING_IDENTITY_MESSAGE: &str = "Could not load your account information.";
const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while processing authentication.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Success,
    Failed { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CallbackState {
    #[default]
    Pending,
    Complete(CallbackOutcome),
}

impl CallbackState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CallbackState::Pending)
    }

    /// True only once the callback succeeded.
    pub fn is_complete(&self) -> bool {
        matches!(self, CallbackState::Complete(CallbackOutcome::Success))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CallbackState::Complete(CallbackOutcome::Failed { message }) => Some(message),
            _ => None,
        }
    }
}

/// A redirect that should happen after a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledRedirect {
    pub destination: Destination,
    pub delay: Duration,
}

impl ScheduledRedirect {
    /// Returns the cancel handle and the future that performs the redirect. Dropping
    /// the handle before the delay elapses means `on_fire` is never called.
    pub fn schedule<F>(&self, on_fire: F) -> (ScheduledTask, impl Future<Output = ()>)
    where
        F: FnOnce(Destination) + 'static,
    {
        let destination = self.destination.clone();
        ScheduledTask::new(self.delay, move || {
            tracing::debug!(href = %destination.href(), "Callback redirect firing");
            on_fire(destination)
        })
    }
}

/// The `token` query parameter of a callback URL, if present and non-empty.
///
/// Accepts absolute URLs and paths such as `/auth/callback?token=...`.
pub fn extract_token(callback_url: &str) -> Option<String> {
    let url = Url::parse(callback_url)
        .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(callback_url)))
        .ok()?;

    url.query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

pub struct CallbackHandler<G> {
    gateway: G,
    session: SessionStore,
    state: CallbackState,
    started: bool,
}

impl<G: AuthGateway> CallbackHandler<G> {
    pub fn new(gateway: G, session: SessionStore) -> Self {
        Self {
            gateway,
            session,
            state: CallbackState::Pending,
            started: false,
        }
    }

    pub fn state(&self) -> &CallbackState {
        &self.state
    }

    /// Process the callback. Only the first call does any work; later calls return
    /// the state reached by the first.
    pub async fn run(&mut self, callback_url: &str) -> &CallbackState {
        if self.started {
            tracing::debug!("Auth callback already processed");
            return &self.state;
        }
        self.started = true;

        let outcome = match self.gateway.fetch_current_user().await {
            Ok(user) => {
                let via_token = extract_token(callback_url)
                    .map(|token| self.session.login(&token).is_authenticated)
                    .unwrap_or(false);
                if !via_token {
                    self.session.establish(user);
                }
                tracing::info!("Auth callback completed");
                CallbackOutcome::Success
            }
            Err(e) => {
                tracing::warn!("Auth callback failed: {}", e);
                let message = match e {
                    ApiError::NotAuthenticated { .. } => MISSING_IDENTITY_MESSAGE,
                    _ => GENERIC_FAILURE_MESSAGE,
                };
                CallbackOutcome::Failed {
                    message: message.to_string(),
                }
            }
        };

        self.state = CallbackState::Complete(outcome);
        &self.state
    }

    /// Where to go once the callback has finished; `None` while it is pending.
    pub fn scheduled_redirect(&self) -> Option<ScheduledRedirect> {
        match &self.state {
            CallbackState::Pending => None,
            CallbackState::Complete(CallbackOutcome::Success) => Some(ScheduledRedirect {
                destination: Destination::Home,
                delay: SUCCESS_REDIRECT_DELAY,
            }),
            CallbackState::Complete(CallbackOutcome::Failed { .. }) => Some(ScheduledRedirect {
                destination: Destination::Login,
                delay: FAILURE_REDIRECT_DELAY,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use api::Navigator;
    use crate::state::Credential;
    use crate::testing::{sample_user, token_for, FakeGateway, RecordingNavigator, NOW};
    use std::sync::Arc;
    use store::MemoryStore;
    use tokio::time::Instant;

    const CALLBACK: &str = "https://app.example/auth/callback";

    fn session() -> SessionStore {
        let session = SessionStore::with_clock(
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::new(NOW)),
        );
        session.bootstrap();
        session
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(
            extract_token("https://app.example/auth/callback?token=abc.def.ghi&x=1"),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(
            extract_token("/auth/callback?state=s&token=t1"),
            Some("t1".to_string())
        );
        assert_eq!(extract_token(CALLBACK), None);
        assert_eq!(extract_token("/auth/callback?token="), None);
    }

    #[test]
    fn test_pending_state() {
        let handler = CallbackHandler::new(FakeGateway::returning(Ok(sample_user("u1"))), session());
        assert!(handler.state().is_loading());
        assert!(!handler.state().is_complete());
        assert!(handler.scheduled_redirect().is_none());
    }

    #[tokio::test]
    async fn test_success_establishes_server_identity() {
        let session = session();
        let mut handler =
            CallbackHandler::new(FakeGateway::returning(Ok(sample_user("u7"))), session.clone());

        let state = handler.run(CALLBACK).await;

        assert!(state.is_complete());
        assert!(!state.is_loading());
        assert_eq!(state.error(), None);
        assert_eq!(
            session.state(),
            crate::SessionState::Authenticated {
                user: sample_user("u7"),
                credential: Credential::ServerCookie,
            }
        );
        assert_eq!(
            handler.scheduled_redirect(),
            Some(ScheduledRedirect {
                destination: Destination::Home,
                delay: SUCCESS_REDIRECT_DELAY,
            })
        );
    }

    #[tokio::test]
    async fn test_success_with_token_logs_in() {
        let session = session();
        let token = token_for("u1", NOW + 3600);
        let url = format!("{CALLBACK}?token={token}");
        let mut handler =
            CallbackHandler::new(FakeGateway::returning(Ok(sample_user("u1"))), session.clone());

        handler.run(&url).await;

        assert_eq!(session.snapshot().token.as_deref(), Some(token.as_str()));
    }

    #[tokio::test]
    async fn test_expired_token_falls_back_to_server_identity() {
        let session = session();
        let url = format!("{CALLBACK}?token={}", token_for("u1", NOW - 10));
        let mut handler =
            CallbackHandler::new(FakeGateway::returning(Ok(sample_user("u1"))), session.clone());

        assert!(handler.run(&url).await.is_complete());
        assert!(session.is_authenticated());
        assert!(session.snapshot().token.is_none());
    }

    #[tokio::test]
    async fn test_network_failure() {
        let session = session();
        let mut handler = CallbackHandler::new(
            FakeGateway::returning(Err(ApiError::Network("connection refused".to_string()))),
            session.clone(),
        );

        let state = handler.run(CALLBACK).await;

        assert!(!state.is_complete());
        assert!(!state.is_loading());
        assert_eq!(
            state.error(),
            Some("An error occurred while processing authentication.")
        );
        assert!(!session.is_authenticated());
        assert_eq!(
            handler.scheduled_redirect(),
            Some(ScheduledRedirect {
                destination: Destination::Login,
                delay: FAILURE_REDIRECT_DELAY,
            })
        );
    }

    #[tokio::test]
    async fn test_missing_identity_message() {
        let mut handler = CallbackHandler::new(
            FakeGateway::returning(Err(ApiError::NotAuthenticated { status: 401 })),
            session(),
        );

        let state = handler.run(CALLBACK).await;
        assert_eq!(state.error(), Some("Could not load your account information."));
    }

    #[tokio::test]
    async fn test_runs_at_most_once() {
        let gateway = FakeGateway::returning(Ok(sample_user("u1")));
        let mut handler = CallbackHandler::new(&gateway, session());

        handler.run(CALLBACK).await;
        let second = handler.run(CALLBACK).await.clone();

        assert!(second.is_complete());
        assert_eq!(*gateway.identity_calls.lock(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_redirects_to_login_after_delay() {
        let navigator = Arc::new(RecordingNavigator::default());
        let mut handler = CallbackHandler::new(
            FakeGateway::returning(Err(ApiError::Network("offline".to_string()))),
            session(),
        );
        handler.run(CALLBACK).await;

        let redirect = handler.scheduled_redirect().unwrap();
        let target = navigator.clone();
        let start = Instant::now();
        let (_task, work) = redirect.schedule(move |destination| target.navigate(&destination));
        work.await;

        assert!(start.elapsed() >= FAILURE_REDIRECT_DELAY);
        assert_eq!(navigator.visited(), vec![Destination::Login]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_redirects_home_after_delay() {
        let navigator = Arc::new(RecordingNavigator::default());
        let mut handler =
            CallbackHandler::new(FakeGateway::returning(Ok(sample_user("u1"))), session());
        handler.run(CALLBACK).await;

        let target = navigator.clone();
        let start = Instant::now();
        let (_task, work) = handler
            .scheduled_redirect()
            .unwrap()
            .schedule(move |destination| target.navigate(&destination));
        work.await;

        assert!(start.elapsed() >= SUCCESS_REDIRECT_DELAY);
        assert_eq!(navigator.visited(), vec![Destination::Home]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_task_never_navigates() {
        let navigator = Arc::new(RecordingNavigator::default());
        let mut handler = CallbackHandler::new(
            FakeGateway::returning(Err(ApiError::Network("offline".to_string()))),
            session(),
        );
        handler.run(CALLBACK).await;

        let target = navigator.clone();
        let (task, work) = handler
            .scheduled_redirect()
            .unwrap()
            .schedule(move |destination| target.navigate(&destination));
        futures::join!(work, async move {
            crate::schedule::sleep(Duration::from_millis(1500)).await;
            drop(task);
        });

        assert!(navigator.visited().is_empty());
    }
}
