//! Saved reports of the signed-in user.
//!
//! Loaded through the intercepted [`api::ApiClient`], so an expired cookie on this page
//! signs the user out and lands them on the login page.

use dioxus::prelude::*;
use serde::Deserialize;
use ui::{use_auth, use_auth_services, RequireAuth};

const SAVED_REPORTS_PATH: &str = "/api/report/reports/saved";

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct SavedReportBrief {
    id: String,
    title: String,
    status: String,
    updated_at: String,
}

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        RequireAuth {
            SavedReports {}
        }
    }
}

#[component]
fn SavedReports() -> Element {
    let services = use_auth_services();
    let auth = use_auth();

    let reports = use_resource(move || {
        let api = services.api.clone();
        async move { api.get::<Vec<SavedReportBrief>>(SAVED_REPORTS_PATH).await }
    });

    let company = auth()
        .user
        .and_then(|user| user.company_name)
        .unwrap_or_else(|| "your company".to_string());

    let list = match &*reports.read() {
        None => rsx! {
            p { style: "color: #787774;", "Loading reports..." }
        },
        Some(Err(e)) => {
            let message = e.message();
            rsx! {
                p { class: "dashboard-error", style: "color: #9b1c1c;", "{message}" }
            }
        }
        Some(Ok(items)) if items.is_empty() => rsx! {
            p { style: "color: #787774;", "No saved reports yet." }
        },
        Some(Ok(items)) => rsx! {
            ul {
                class: "report-list",
                style: "list-style: none; margin: 0; padding: 0;",
                for report in items.iter() {
                    li {
                        key: "{report.id}",
                        style: "display: flex; justify-content: space-between; padding: 0.75rem 0; border-bottom: 1px solid #e9e9e7;",
                        span { "{report.title}" }
                        span { style: "color: #787774; font-size: 0.875rem;", "{report.status} · {report.updated_at}" }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "dashboard",
            style: "max-width: 48rem; margin: 0 auto; padding: 2rem 1.5rem;",
            h1 { style: "margin: 0 0 0.25rem; color: #37352f;", "Dashboard" }
            p { style: "margin: 0 0 1.5rem; color: #787774;", "Saved reports for {company}" }
            {list}
        }
    }
}
