//! Derived per-status statistics over a ticket collection.

use serde::{Deserialize, Serialize};

use crate::ticket::{Ticket, TicketStatus};

/// Per-status counts derived from a ticket collection.
///
/// Never persisted; recomputed on demand from the current collection.
/// Serializes with camelCase field names (`inProgress`) for presentation
/// layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    /// Total number of tickets.
    pub total: usize,
    /// Tickets with status `open`.
    pub open: usize,
    /// Tickets with status `in_progress`.
    pub in_progress: usize,
    /// Tickets with status `closed`.
    pub closed: usize,
}

/// Computes per-status counts in a single pass.
///
/// Pure and deterministic: `total` always equals the collection length and
/// the three buckets always sum to `total`.
pub fn compute_stats(tickets: &[Ticket]) -> TicketStats {
    let mut stats = TicketStats {
        total: tickets.len(),
        ..TicketStats::default()
    };

    for ticket in tickets {
        match ticket.status {
            TicketStatus::Open => stats.open += 1,
            TicketStatus::InProgress => stats.in_progress += 1,
            TicketStatus::Closed => stats.closed += 1,
        }
    }

    stats
}
