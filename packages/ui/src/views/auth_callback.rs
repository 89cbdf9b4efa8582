//! Landing page for the identity provider's redirect.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use session::{CallbackHandler, CallbackOutcome, CallbackState, ScheduledTask};

use crate::auth::use_auth_services;
use crate::navigator::current_href;

const CARD_STYLE: &str = "max-width: 28rem; width: 100%; background: #ffffff; border-radius: 0.75rem; box-shadow: 0 10px 25px rgba(0,0,0,0.08); padding: 2rem; text-align: center;";

#[component]
pub fn AuthCallbackView() -> Element {
    let services = use_auth_services();
    let mut state = use_signal(CallbackState::default);
    let pending_redirect = use_hook(|| Rc::new(RefCell::new(None::<ScheduledTask>)));

    use_hook({
        let pending_redirect = pending_redirect.clone();
        move || {
            spawn(async move {
                let mut handler =
                    CallbackHandler::new(services.gateway.clone(), services.session.clone());
                let reached = handler.run(&current_href()).await.clone();
                state.set(reached);

                let Some(redirect) = handler.scheduled_redirect() else {
                    return;
                };
                let navigator = services.navigator.clone();
                let (task, work) =
                    redirect.schedule(move |destination| navigator.navigate(&destination));
                pending_redirect.borrow_mut().replace(task);
                work.await;
            });
        }
    });

    // Leaving the page must not let a pending redirect fire later
    use_drop(move || {
        if let Some(task) = pending_redirect.borrow_mut().take() {
            task.cancel();
        }
    });

    let body = match state() {
        CallbackState::Pending => rsx! {
            h2 { style: "margin: 0 0 0.5rem; color: #37352f;", "Completing sign-in..." }
            p { style: "margin: 0; color: #787774;", "Checking your Google account." }
        },
        CallbackState::Complete(CallbackOutcome::Success) => rsx! {
            h2 { style: "margin: 0 0 0.5rem; color: #1a7f37;", "Signed in" }
            p { style: "margin: 0; color: #787774;", "Taking you to the home page..." }
        },
        CallbackState::Complete(CallbackOutcome::Failed { message }) => rsx! {
            h2 { style: "margin: 0 0 0.5rem; color: #9b1c1c;", "Sign-in failed" }
            p { style: "margin: 0 0 1rem; color: #787774;", "{message}" }
            p { style: "margin: 0; font-size: 0.875rem; color: #9b9a97;", "Returning to the login page..." }
        },
    };

    rsx! {
        div {
            class: "auth-callback",
            style: "display: flex; align-items: center; justify-content: center; min-height: 100vh; padding: 1rem; background: #f7f7f5;",
            div { style: CARD_STYLE, {body} }
        }
    }
}
