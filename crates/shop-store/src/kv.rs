//! Key-value store trait and typed wrapper with automatic serialization.

use crate::StoreError;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// A string-keyed, string-valued store.
///
/// Implementations replace the whole value on `set`. Reads of a missing key
/// return `None`, and deleting a missing key is not an error.
pub trait KeyValueStore: Send + Sync {
    /// Get the raw value for a key.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value for a key.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Type-safe handle over any [`KeyValueStore`].
///
/// Cheap to clone; clones share the same backend.
///
/// # Example
///
/// ```rust,ignore
/// let store = Store::new(MemoryStore::new());
/// store.set_json("cart", &cart)?;
/// let cart: Option<Cart> = store.get_json("cart")?;
/// ```
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
}

impl Store {
    /// Wrap a backend.
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wrap an already shared backend.
    pub fn from_shared(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Get the raw stored string.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.backend.get(key)?;
        tracing::debug!(key, present = value.is_some(), "store read");
        Ok(value)
    }

    /// Replace the raw stored string.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tracing::debug!(key, bytes = value.len(), "store write");
        self.backend.set(key, value)
    }

    /// Get a value and decode it from JSON.
    ///
    /// Returns `None` if the key doesn't exist. A value that does not
    /// decode as `T` is an error; the caller decides whether to discard it.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode a value as JSON and store it.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }

    /// Remove a key.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        tracing::debug!(key, "store delete");
        self.backend.delete(key)
    }

    /// Remove several keys, stopping at the first failure.
    pub fn delete_all<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Result<(), StoreError> {
        keys.into_iter().try_for_each(|key| self.delete(key))
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.exists(key)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
