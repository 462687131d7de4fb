//! The key-value store abstraction behind all persisted state.
//!
//! Ticketapp keeps its entire state in two string-valued slots of a local
//! key-value store. The store is deliberately narrow (get/set/delete of
//! whole strings) so the backing can be swapped: a directory of files in
//! production, an in-memory map in tests.

use crate::error::Result;

/// Slot holding the serialized [`Session`](crate::session::Session); absent
/// when logged out.
pub const SESSION_SLOT: &str = "session";

/// Slot holding the serialized ordered ticket collection; absent when no
/// tickets exist.
pub const TICKETS_SLOT: &str = "tickets";

/// An abstract string-keyed store of string-valued slots.
///
/// # Implementation Notes
///
/// Implementations must guarantee that a slot is never observable in a
/// partially written state: a reader sees either the previous value or the
/// new one, never a mix. That guarantee is what makes the whole-collection
/// replace write policy of the ticket layer safe.
pub trait KeyValueStore: Send + Sync {
    /// Reads a slot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: the slot holds a value
    /// - `Ok(None)`: the slot is absent (a normal outcome, not an error)
    /// - `Err(_)`: the store itself failed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a slot, replacing any previous value atomically.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes a slot. Deleting an absent slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
