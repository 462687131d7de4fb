//! File-backed key-value store.
//!
//! Each slot maps to one `<slot>.json` file under a base directory. Writes
//! go through a temp file followed by an atomic rename, so a reader never
//! observes a partially written slot - the guarantee the
//! [`KeyValueStore`] contract requires.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use ticketapp_core::error::{Result, TicketError};
use ticketapp_core::store::KeyValueStore;

use crate::paths::TicketappPaths;

/// A [`KeyValueStore`] backed by a directory of per-slot JSON files.
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `base_dir`, creating the directory if it
    /// does not exist yet.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Creates a store rooted at the platform data directory
    /// (`<data_dir>/ticketapp/`).
    pub fn open_default() -> Result<Self> {
        let base_dir = TicketappPaths::data_dir()
            .map_err(|e| TicketError::storage(e.to_string()))?;
        Self::new(base_dir)
    }

    /// Returns the directory the store persists into.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        // Slot names are simple identifiers; anything path-like would escape
        // the base directory.
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(TicketError::storage(format!("invalid slot name: '{key}'")));
        }
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let tmp_path = self.base_dir.join(format!(".{key}.json.tmp"));

        // Write to a temp file, flush to disk, then rename over the slot.
        // Rename is atomic on all supported platforms, so the slot file
        // always holds either the old or the new value in full.
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(value.as_bytes())?;
        tmp.sync_all()?;
        drop(tmp);

        fs::rename(&tmp_path, &path)?;
        tracing::debug!(slot = key, bytes = value.len(), "slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_absent_slot_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        assert_eq!(store.get("tickets").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.set("session", r#"{"email":"a@b.c","token":"t"}"#).unwrap();
        assert_eq!(
            store.get("session").unwrap().as_deref(),
            Some(r#"{"email":"a@b.c","token":"t"}"#)
        );
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.set("tickets", "[]").unwrap();
        store.set("tickets", r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(store.get("tickets").unwrap().as_deref(), Some(r#"[{"id":"1"}]"#));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.set("session", "x").unwrap();
        store.remove("session").unwrap();
        assert_eq!(store.get("session").unwrap(), None);
        // Removing again is still a success.
        store.remove("session").unwrap();
    }

    #[test]
    fn test_values_survive_reopening_the_store() {
        let dir = tempdir().unwrap();
        {
            let store = JsonFileStore::new(dir.path()).unwrap();
            store.set("tickets", "[]").unwrap();
        }
        let reopened = JsonFileStore::new(dir.path()).unwrap();
        assert_eq!(reopened.get("tickets").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_path_like_slot_names_are_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        assert!(store.get("../escape").is_err());
        assert!(store.set("a/b", "x").is_err());
        assert!(store.remove("").is_err());
    }
}
