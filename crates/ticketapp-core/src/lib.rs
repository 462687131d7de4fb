//! Domain layer of Ticketapp: models, validation, derived statistics, and
//! the key-value store abstraction everything persists through.
//!
//! This crate performs no I/O. Storage backends live in
//! `ticketapp-infrastructure`; the gated operations that tie store, gate,
//! and validation together live in `ticketapp-application`.

pub mod error;
pub mod session;
pub mod stats;
pub mod store;
pub mod ticket;

// Re-export common types at the crate root
pub use error::{Result, TicketError};
pub use session::Session;
pub use stats::{TicketStats, compute_stats};
pub use store::{KeyValueStore, SESSION_SLOT, TICKETS_SLOT};
pub use ticket::{FieldErrors, Ticket, TicketDraft, TicketStatus, ValidDraft, validate};
