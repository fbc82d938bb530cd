//! Cart Storage

use std::sync::{Mutex, PoisonError};

use mockall::automock;
use rustc_hash::FxHashMap;

use crate::domain::carts::errors::CartStorageError;

/// A string key-value store carts are persisted in.
#[automock]
pub trait CartStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, CartStorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), CartStorageError>;

    fn clear(&self, key: &str) -> Result<(), CartStorageError>;
}

/// Process-local cart storage.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryCartStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CartStorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        entries.insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), CartStorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        entries.remove(key);

        Ok(())
    }
}

impl<S: CartStorage + ?Sized> CartStorage for &S {
    fn read(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CartStorageError> {
        (**self).write(key, value)
    }

    fn clear(&self, key: &str) -> Result<(), CartStorageError> {
        (**self).clear(key)
    }
}
