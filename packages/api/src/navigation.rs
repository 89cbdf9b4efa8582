//! Redirect targets and the seam that performs them.

/// Where a redirect sends the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Application home surface.
    Home,
    /// Login surface.
    Login,
    /// A URL outside the application, e.g. the identity provider.
    External(String),
}

impl Destination {
    pub fn href(&self) -> String {
        match self {
            Destination::Home => "/".to_string(),
            Destination::Login => "/login".to_string(),
            Destination::External(url) => url.clone(),
        }
    }
}

/// Performs a navigation. Implementations live at the edge (browser, router, tests).
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: &Destination);
}
