//! In-memory key-value store.
//!
//! Used by tests and by embedders that want the full ticket layer without
//! touching the filesystem.

use std::collections::HashMap;
use std::sync::Mutex;

use ticketapp_core::error::{Result, TicketError};
use ticketapp_core::store::KeyValueStore;

/// A [`KeyValueStore`] holding slots in a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| TicketError::internal("slot map lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
