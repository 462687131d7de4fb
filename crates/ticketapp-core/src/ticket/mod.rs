//! Ticket domain: entity, editable draft, and validation.

pub mod model;
pub mod validate;

pub use model::{Ticket, TicketDraft, TicketStatus};
pub use validate::{FieldErrors, ValidDraft, validate};
