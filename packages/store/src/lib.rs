//! # Durable client-side storage
//!
//! The session layer keeps a small record that has to survive a page reload (or an app
//! restart on native targets). This crate provides the [`KeyValueStore`] seam it writes
//! through, plus one backend per platform:
//!
//! | Backend | Platform | Notes |
//! |---------|----------|-------|
//! | [`MemoryStore`] | all | Process-local, used by tests and as a fallback. |
//! | [`FileStore`] | native | One file per key under a data directory, replaced atomically. |
//! | [`LocalStorageStore`] | wasm32 + `web` | The browser's `window.localStorage`. |
//!
//! Values are plain strings; [`KeyValueStoreExt`] layers JSON (de)serialisation on top
//! so callers can persist whole records with one write.

mod error;
mod kv;

pub use error::StoreError;
pub use kv::{KeyValueStore, KeyValueStoreExt};

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;
