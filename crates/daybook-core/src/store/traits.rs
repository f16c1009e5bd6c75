//! Persistence contract for the entry store.
//!
//! The `KeyValueStore` trait is the only thing the entry store needs from a
//! persistence layer: read and write a string blob under a string key. This
//! keeps the store independent of where bytes end up (a directory on disk,
//! memory in tests, or any other local key-value facility).

use crate::error::Result;

/// Local key-value storage.
///
/// Implementations must ensure:
/// - `set` replaces the previous value atomically where possible
/// - `get` of a key that was never written returns `Ok(None)`
/// - `remove` of an absent key is not an error
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(value))` if present, `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::Storage` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::Storage` if:
    /// - The backend is unavailable or out of space
    /// - The write cannot be completed atomically
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
