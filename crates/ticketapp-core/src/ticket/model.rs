//! Ticket domain model.
//!
//! This module contains the core Ticket entity and its value objects as they
//! appear in the application's domain layer and in the persisted collection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Represents the workflow state of a ticket.
///
/// The wire representation (persisted slot value and presentation input) is
/// the lowercase snake_case form: `open`, `in_progress`, `closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// The ticket has been created and nobody is working on it yet.
    Open,
    /// Someone is actively working on the ticket.
    InProgress,
    /// The ticket has been resolved.
    Closed,
}

impl TicketStatus {
    /// All statuses in display order.
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Closed,
    ];

    /// Returns the wire form of the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Closed => "closed",
        }
    }

    /// Returns the human-readable label used by presentation layers.
    pub const fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In progress",
            TicketStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    /// Parses the wire form. Anything other than the three exact strings is
    /// rejected; there is no trimming or case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(format!("invalid ticket status: '{other}'")),
        }
    }
}

/// A trackable unit of work.
///
/// Field names on the wire are camelCase (`createdAt`) to match the persisted
/// collection layout.
///
/// # Invariants
///
/// - `id` is unique within the collection and never changes after creation.
/// - `title` is non-empty after trimming.
/// - `created_at` is an ISO-8601 UTC timestamp assigned once at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique ticket identifier (creation millis plus a uniqueness suffix).
    pub id: String,
    /// Short summary of the work.
    pub title: String,
    /// Optional free-form details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current workflow state.
    pub status: TicketStatus,
    /// Creation timestamp (ISO-8601 format), set once and never updated.
    pub created_at: String,
}

/// The editable fields of a ticket, exactly as entered by the presentation
/// layer.
///
/// `status` is kept as a raw string because it is user input; the validator
/// is responsible for turning it into a [`TicketStatus`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDraft {
    /// Ticket title as entered (may be blank; validation rejects it).
    pub title: String,
    /// Optional description as entered.
    pub description: Option<String>,
    /// Requested status in wire form.
    pub status: String,
}

impl TicketDraft {
    /// Creates a draft from its parts.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description,
            status: status.into(),
        }
    }
}

impl Default for TicketDraft {
    /// An empty draft with the status the creation form starts from.
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            status: TicketStatus::Open.as_str().to_string(),
        }
    }
}
