//! Durable key-value storage used to persist the cart between sessions.

use std::sync::{Mutex, PoisonError};

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Key holding the JSON-encoded line items.
pub const CART_ITEMS_KEY: &str = "cart";

/// Key holding the plain salon id the cart is scoped to.
pub const CART_SALON_KEY: &str = "cartSalonId";

/// Errors raised by a [`DurableStore`] implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium could not be read or written.
    #[error("storage i/o failed")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded.
    #[error("storage encoding failed")]
    Encoding(#[from] serde_json::Error),

    /// A previous writer panicked while holding the store.
    #[error("storage lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StorageError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// String-valued key-value store that survives process restarts.
#[automock]
pub trait DurableStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Erase `key`. Erasing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store, mostly useful for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()?
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock()?.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_then_get_returns_value() -> TestResult {
        let store = MemoryStore::new();

        store.set(CART_SALON_KEY, "abc")?;

        assert_eq!(store.get(CART_SALON_KEY)?.as_deref(), Some("abc"));

        Ok(())
    }

    #[test]
    fn remove_missing_key_is_ok() -> TestResult {
        let store = MemoryStore::new();

        store.remove(CART_ITEMS_KEY)?;

        assert!(store.get(CART_ITEMS_KEY)?.is_none());

        Ok(())
    }

    #[test]
    fn with_entries_prepopulates() -> TestResult {
        let store = MemoryStore::with_entries([(CART_ITEMS_KEY, "[]")]);

        assert_eq!(store.get(CART_ITEMS_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }
}
