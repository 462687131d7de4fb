//! Storage backends for Ticketapp.
//!
//! Implements the [`KeyValueStore`](ticketapp_core::store::KeyValueStore)
//! contract from `ticketapp-core`: a directory of per-slot JSON files for
//! production use, and an in-memory map for tests and embedding.

pub mod json_file_store;
pub mod memory_store;
pub mod paths;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use paths::TicketappPaths;
