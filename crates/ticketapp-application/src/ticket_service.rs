//! Gated CRUD and statistics over the persisted ticket collection.
//!
//! The collection is one serialized JSON array in one slot. Every mutation
//! is a whole-collection replace: read the array, change it in memory,
//! write the whole array back. No partial update ever touches the slot, so
//! a reader always sees either the old collection or the new one.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use ticketapp_core::error::{Result, TicketError};
use ticketapp_core::stats::{TicketStats, compute_stats};
use ticketapp_core::store::{KeyValueStore, TICKETS_SLOT};
use ticketapp_core::ticket::{Ticket, TicketDraft, validate};

use crate::session_service::SessionService;

/// The ticket store: session-gated operations over the persisted collection.
///
/// Exclusively owns read/write access to the tickets slot; no other
/// component writes it. Every operation first consults the gate and bails
/// out with [`TicketError::Unauthorized`] before touching the store.
#[derive(Clone)]
pub struct TicketService {
    store: Arc<dyn KeyValueStore>,
    gate: SessionService,
}

impl TicketService {
    /// Creates a service over the given store and authorization gate.
    ///
    /// The gate is expected to read from the same store, but nothing here
    /// depends on that.
    pub fn new(store: Arc<dyn KeyValueStore>, gate: SessionService) -> Self {
        Self { store, gate }
    }

    /// Returns the current collection in insertion order.
    ///
    /// An absent or unparsable slot yields an empty collection; corruption
    /// is logged, never surfaced.
    pub fn list_tickets(&self) -> Result<Vec<Ticket>> {
        self.authorize()?;
        self.load_collection()
    }

    /// Looks up one ticket by id.
    pub fn get_ticket(&self, id: &str) -> Result<Option<Ticket>> {
        self.authorize()?;
        Ok(self
            .load_collection()?
            .into_iter()
            .find(|ticket| ticket.id == id))
    }

    /// Validates the draft and appends a new ticket to the collection.
    ///
    /// The ticket gets a fresh id (creation millis plus a random suffix, so
    /// two tickets created in the same millisecond never collide) and a
    /// `created_at` timestamp in ISO-8601. On validation failure nothing is
    /// written and the field errors come back as
    /// [`TicketError::Validation`].
    pub fn create_ticket(&self, draft: &TicketDraft) -> Result<Ticket> {
        self.authorize()?;
        let valid = validate(draft)?;

        let mut tickets = self.load_collection()?;
        let now = Utc::now();
        let ticket = Ticket {
            id: new_ticket_id(now),
            title: valid.title,
            description: valid.description,
            status: valid.status,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        tickets.push(ticket.clone());
        self.store_collection(&tickets)?;

        tracing::debug!(id = %ticket.id, status = %ticket.status, "ticket created");
        Ok(ticket)
    }

    /// Validates the draft and replaces the editable fields of the matching
    /// ticket, preserving its id and creation timestamp.
    ///
    /// # Returns
    ///
    /// - `Ok(Ticket)`: the updated ticket
    /// - `Err(Validation)`: the draft is invalid; nothing was written
    /// - `Err(NotFound)`: no ticket has this id
    pub fn update_ticket(&self, id: &str, draft: &TicketDraft) -> Result<Ticket> {
        self.authorize()?;
        let valid = validate(draft)?;

        let mut tickets = self.load_collection()?;
        let Some(ticket) = tickets.iter_mut().find(|ticket| ticket.id == id) else {
            return Err(TicketError::not_found("ticket", id));
        };

        ticket.title = valid.title;
        ticket.description = valid.description;
        ticket.status = valid.status;
        let updated = ticket.clone();
        self.store_collection(&tickets)?;

        tracing::debug!(id = %updated.id, status = %updated.status, "ticket updated");
        Ok(updated)
    }

    /// Removes the matching ticket. Removing an absent id is a no-op, not
    /// an error.
    pub fn delete_ticket(&self, id: &str) -> Result<()> {
        self.authorize()?;

        let mut tickets = self.load_collection()?;
        let before = tickets.len();
        tickets.retain(|ticket| ticket.id != id);
        if tickets.len() == before {
            tracing::debug!(id, "delete of unknown ticket id, nothing to remove");
        }
        self.store_collection(&tickets)
    }

    /// Derives per-status counts from the current collection.
    pub fn ticket_stats(&self) -> Result<TicketStats> {
        Ok(compute_stats(&self.list_tickets()?))
    }

    fn authorize(&self) -> Result<()> {
        if self.gate.is_authorized() {
            Ok(())
        } else {
            Err(TicketError::Unauthorized)
        }
    }

    fn load_collection(&self) -> Result<Vec<Ticket>> {
        match self.store.get(TICKETS_SLOT)? {
            None => Ok(Vec::new()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(tickets) => Ok(tickets),
                Err(e) => {
                    tracing::warn!("ticket collection is unreadable, treating as empty: {e}");
                    Ok(Vec::new())
                }
            },
        }
    }

    fn store_collection(&self, tickets: &[Ticket]) -> Result<()> {
        let payload = serde_json::to_string(tickets)?;
        self.store.set(TICKETS_SLOT, &payload)
    }
}

/// Builds a fresh ticket id from the creation instant.
///
/// The millisecond prefix keeps ids roughly ordered by creation time; the
/// UUID suffix guarantees uniqueness within a millisecond.
fn new_ticket_id(now: DateTime<Utc>) -> String {
    format!("{}-{}", now.timestamp_millis(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketapp_core::store::SESSION_SLOT;
    use ticketapp_core::ticket::TicketStatus;
    use ticketapp_infrastructure::MemoryStore;

    fn logged_in_service() -> (Arc<MemoryStore>, TicketService) {
        let store = Arc::new(MemoryStore::new());
        let gate = SessionService::new(store.clone());
        gate.login("ada@example.com", None).unwrap();
        let service = TicketService::new(store.clone(), gate);
        (store, service)
    }

    fn logged_out_service() -> (Arc<MemoryStore>, TicketService) {
        let store = Arc::new(MemoryStore::new());
        let gate = SessionService::new(store.clone());
        let service = TicketService::new(store.clone(), gate);
        (store, service)
    }

    fn draft(title: &str, status: &str) -> TicketDraft {
        TicketDraft::new(title, None, status)
    }

    #[test]
    fn test_list_is_empty_before_first_write() {
        let (_, service) = logged_in_service();
        assert!(service.list_tickets().unwrap().is_empty());
    }

    #[test]
    fn test_create_then_list_round_trips() {
        let (_, service) = logged_in_service();
        let created = service
            .create_ticket(&TicketDraft::new(
                "Printer jam",
                Some("3rd floor".to_string()),
                "open",
            ))
            .unwrap();

        assert!(!created.id.is_empty());
        assert!(created.created_at.ends_with('Z'));

        let listed = service.list_tickets().unwrap();
        assert_eq!(listed, vec![created.clone()]);

        // id and created_at are stable across reads.
        let again = service.get_ticket(&created.id).unwrap().unwrap();
        assert_eq!(again, created);
    }

    #[test]
    fn test_created_tickets_keep_insertion_order() {
        let (_, service) = logged_in_service();
        for title in ["first", "second", "third"] {
            service.create_ticket(&draft(title, "open")).unwrap();
        }

        let titles: Vec<String> = service
            .list_tickets()
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn test_rapid_creation_yields_distinct_ids() {
        let (_, service) = logged_in_service();
        let mut ids: Vec<String> = (0..50)
            .map(|i| {
                service
                    .create_ticket(&draft(&format!("t{i}"), "open"))
                    .unwrap()
                    .id
            })
            .collect();

        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_invalid_draft_is_rejected_without_write() {
        let (store, service) = logged_in_service();
        let err = service.create_ticket(&draft("", "bogus")).unwrap_err();

        let errors = err.field_errors().expect("validation error");
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("status"), Some("Invalid status"));
        assert_eq!(store.get(TICKETS_SLOT).unwrap(), None);
    }

    #[test]
    fn test_update_preserves_id_and_created_at() {
        let (_, service) = logged_in_service();
        let created = service.create_ticket(&draft("Printer jam", "open")).unwrap();

        let updated = service
            .update_ticket(
                &created.id,
                &TicketDraft::new("Printer jam", Some("fixed by Dana".to_string()), "closed"),
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.status, TicketStatus::Closed);
        assert_eq!(updated.description.as_deref(), Some("fixed by Dana"));

        let fetched = service.get_ticket(&created.id).unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[test]
    fn test_update_of_unknown_id_is_not_found() {
        let (_, service) = logged_in_service();
        let err = service
            .update_ticket("missing", &draft("title", "open"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_update_leaves_ticket_unchanged() {
        let (_, service) = logged_in_service();
        let created = service.create_ticket(&draft("Printer jam", "open")).unwrap();

        let err = service
            .update_ticket(&created.id, &draft("", "open"))
            .unwrap_err();
        assert!(err.is_validation());

        let fetched = service.get_ticket(&created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_delete_removes_only_the_matching_ticket() {
        let (_, service) = logged_in_service();
        let keep = service.create_ticket(&draft("keep", "open")).unwrap();
        let gone = service.create_ticket(&draft("gone", "closed")).unwrap();

        service.delete_ticket(&gone.id).unwrap();
        assert_eq!(service.list_tickets().unwrap(), vec![keep]);
    }

    #[test]
    fn test_delete_of_absent_id_is_a_no_op() {
        let (_, service) = logged_in_service();
        let created = service.create_ticket(&draft("Printer jam", "open")).unwrap();

        service.delete_ticket("missing").unwrap();
        assert_eq!(service.list_tickets().unwrap(), vec![created]);
    }

    #[test]
    fn test_stats_reflect_the_collection() {
        let (_, service) = logged_in_service();
        service.create_ticket(&draft("a", "open")).unwrap();
        service.create_ticket(&draft("b", "open")).unwrap();
        service.create_ticket(&draft("c", "in_progress")).unwrap();
        service.create_ticket(&draft("d", "closed")).unwrap();

        let stats = service.ticket_stats().unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.open, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.closed, 1);
    }

    #[test]
    fn test_every_operation_is_gated_and_writes_nothing() {
        let (store, service) = logged_out_service();

        assert!(service.list_tickets().unwrap_err().is_unauthorized());
        assert!(service.get_ticket("1").unwrap_err().is_unauthorized());
        assert!(
            service
                .create_ticket(&draft("Printer jam", "open"))
                .unwrap_err()
                .is_unauthorized()
        );
        assert!(
            service
                .update_ticket("1", &draft("t", "open"))
                .unwrap_err()
                .is_unauthorized()
        );
        assert!(service.delete_ticket("1").unwrap_err().is_unauthorized());
        assert!(service.ticket_stats().unwrap_err().is_unauthorized());

        assert_eq!(store.get(TICKETS_SLOT).unwrap(), None);
    }

    #[test]
    fn test_corrupt_collection_reads_as_empty() {
        let (store, service) = logged_in_service();
        store.set(TICKETS_SLOT, "{definitely not an array").unwrap();

        assert!(service.list_tickets().unwrap().is_empty());

        // The next write replaces the corrupt value wholesale.
        let created = service.create_ticket(&draft("fresh start", "open")).unwrap();
        assert_eq!(service.list_tickets().unwrap(), vec![created]);
    }

    #[test]
    fn test_printer_jam_scenario() {
        let (store, service) = logged_in_service();

        let created = service
            .create_ticket(&draft("Printer jam", "open"))
            .unwrap();
        let listed = service.list_tickets().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Printer jam");
        assert_eq!(listed[0].status, TicketStatus::Open);
        assert!(!listed[0].id.is_empty());
        assert!(listed[0].created_at.contains('T'));

        let updated = service
            .update_ticket(&created.id, &draft("Printer jam", "closed"))
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(
            service.get_ticket(&created.id).unwrap().unwrap().status,
            TicketStatus::Closed
        );

        service.delete_ticket(&created.id).unwrap();
        assert!(service.list_tickets().unwrap().is_empty());
        assert_eq!(service.ticket_stats().unwrap(), TicketStats::default());

        // The slot now holds an empty array, not garbage.
        assert_eq!(store.get(TICKETS_SLOT).unwrap().as_deref(), Some("[]"));
    }
}
