//! Use-case layer of Ticketapp.
//!
//! Ties the domain layer together into the operations a presentation layer
//! calls: a session gate with login/logout, and session-gated CRUD plus
//! statistics over the persisted ticket collection. Both services hold an
//! `Arc<dyn KeyValueStore>`, so any backend from
//! `ticketapp-infrastructure` (or an embedder's own) plugs in.

pub mod session_service;
pub mod ticket_service;

pub use session_service::SessionService;
pub use ticket_service::TicketService;
