//! Browser navigation for the session layer.

use api::{Destination, Navigator};

/// [`Navigator`] that performs a full page navigation.
///
/// A full load (rather than a router push) means the next page bootstraps its
/// session from storage, which is what a forced logout needs. Native builds have no
/// location to change and only log the destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, destination: &Destination) {
        let href = destination.href();

        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(&href) {
                    tracing::error!("Failed to navigate to {}: {:?}", href, e);
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::info!("Navigate to {}", href);
        }
    }
}

/// The page URL as the browser sees it, including the query string.
pub fn current_href() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.location().href().ok())
            .unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}
