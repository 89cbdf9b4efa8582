use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let snapshot = auth();

    let greeting = match &snapshot.user {
        Some(user) => format!("Welcome back, {}.", user.display_name()),
        None => "Prepare climate-related disclosures aligned with your industry.".to_string(),
    };
    let needs_profile = snapshot
        .user
        .as_ref()
        .is_some_and(|user| !user.has_company_info());

    rsx! {
        div {
            class: "home",
            style: "max-width: 48rem; margin: 0 auto; padding: 3rem 1.5rem;",
            h1 { style: "margin: 0 0 0.75rem; color: #37352f;", "Climate Disclosure Portal" }
            p { style: "margin: 0 0 1.5rem; color: #787774;", "{greeting}" }
            if needs_profile {
                p {
                    class: "home-profile-hint",
                    style: "padding: 0.75rem 1rem; border-radius: 6px; background: #fbf3db; color: #6b4f00;",
                    "Add your company name and industry to tailor the disclosure requirements."
                }
            }
            if snapshot.is_authenticated {
                Link { to: Route::Dashboard {}, "Go to your dashboard" }
            } else if snapshot.is_initialized {
                Link { to: Route::Login {}, "Sign in to get started" }
            }
        }
    }
}
