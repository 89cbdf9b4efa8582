//! Platform storage for the session record.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Native**: JSON files under the user data directory via [`store::FileStore`]
//! - **WASM without `web`**: in-memory, lost on reload

use std::sync::Arc;

use store::KeyValueStore;

/// Create the platform-appropriate key-value store.
pub fn make_store() -> Arc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStorageStore::new())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Arc::new(store::MemoryStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Arc::new(store::FileStore::default_location())
    }
}
