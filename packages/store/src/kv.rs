use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::StoreError;

/// Synchronous string key/value storage.
///
/// Mirrors the shape of the browser's `localStorage`: every call completes before it
/// returns, so a caller can update its in-memory state and the durable copy within the
/// same event-loop turn.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// JSON helpers available on every [`KeyValueStore`], including trait objects.
pub trait KeyValueStoreExt: KeyValueStore {
    /// Read and decode a JSON record. A missing key yields `Ok(None)`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON and store it under `key` in a single write.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
