//! # lather-store
//!
//! Small key-value persistence layer for Lather.
//!
//! Values are JSON. Two implementations ship:
//! - [`JsonFileStore`]: one JSON object on disk, rewritten atomically on every
//!   mutation under an advisory file lock (the equivalent of a
//!   per-installation preferences file)
//! - [`MemoryStore`]: process-local, for tests and ephemeral hosts
//!
//! Both lock internally and are safe to share behind an `Arc`.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde_json::Value;

/// A string-keyed store of JSON values.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write `value` under `key`. Durable when this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails; the store is unchanged.
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails; the store is unchanged.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Read-modify-write `key` as one step. `apply` sees the current value
    /// and returns the replacement, or `None` to leave the key untouched.
    ///
    /// Stores shared between processes override this so that `apply` runs
    /// against the latest persisted value while writers are excluded. The
    /// default is a plain `get` followed by `set`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on read or write failure, or whatever `apply`
    /// returns; the store is unchanged in both cases.
    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<Value>) -> Result<Option<Value>, StorageError>,
    ) -> Result<(), StorageError> {
        match apply(self.get(key)?)? {
            Some(value) => self.set(key, value),
            None => Ok(()),
        }
    }

    /// Read a string value. A non-string value under `key` is
    /// [`StorageError::Corrupt`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on read failure or type mismatch.
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(StorageError::corrupt(
                key,
                format!("expected string, found {other}"),
            )),
        }
    }

    /// Write a string value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set(key, Value::String(value.to_string()))
    }
}
