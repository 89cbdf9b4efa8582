//! Delayed, cancellable work.
//!
//! [`ScheduledTask::new`] splits a delayed action into a handle and a future. The caller
//! drives the future on whatever executor it owns (the UI runtime in the browser,
//! tokio in tests); the handle cancels it. Dropping the handle cancels too, so a
//! redirect scheduled by a view cannot fire after the view is gone.

use std::future::Future;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable};
use futures::FutureExt;

/// Sleep on the platform timer.
pub async fn sleep(delay: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(delay).await;

    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(delay).await;
}

#[derive(Debug)]
pub struct ScheduledTask {
    handle: AbortHandle,
    delay: Duration,
}

impl ScheduledTask {
    /// Schedule `action` to run once after `delay`.
    ///
    /// Nothing happens until the returned future is polled.
    pub fn new<F>(delay: Duration, action: F) -> (Self, impl Future<Output = ()>)
    where
        F: FnOnce() + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let work = Abortable::new(
            async move {
                sleep(delay).await;
                action();
            },
            registration,
        )
        .map(|result| {
            if result.is_err() {
                tracing::debug!("Scheduled task cancelled");
            }
        });

        (Self { handle, delay }, work)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
