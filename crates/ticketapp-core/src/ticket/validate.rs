//! Ticket field validation.
//!
//! Validation is pure: the same draft always produces the same outcome, and
//! both rules are evaluated independently so a caller receives every
//! violation at once rather than the first one found.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{TicketDraft, TicketStatus};

/// A field → message mapping describing every validation violation found in
/// a draft.
///
/// Ordered by field name so rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation for a field, replacing any earlier message.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Returns the message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// True when no violations were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with violations.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// A draft that passed validation.
///
/// The title is carried through exactly as entered (trimming is only applied
/// for the emptiness check, not to the stored value), and the status string
/// has been parsed into its typed form.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    /// Title as entered.
    pub title: String,
    /// Description as entered.
    pub description: Option<String>,
    /// Parsed workflow state.
    pub status: TicketStatus,
}

/// Validates the editable fields of a draft.
///
/// Rules:
/// - the trimmed title must be non-empty, else `title: "Title is required"`;
/// - the status must be one of `open`, `in_progress`, `closed`, else
///   `status: "Invalid status"`.
///
/// # Returns
///
/// - `Ok(ValidDraft)`: no rule was violated
/// - `Err(FieldErrors)`: every violated rule, keyed by field name
pub fn validate(draft: &TicketDraft) -> Result<ValidDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.title.trim().is_empty() {
        errors.insert("title", "Title is required");
    }

    let status = match draft.status.parse::<TicketStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.insert("status", "Invalid status");
            None
        }
    };

    match (status, errors.is_empty()) {
        (Some(status), true) => Ok(ValidDraft {
            title: draft.title.clone(),
            description: draft.description.clone(),
            status,
        }),
        _ => Err(errors),
    }
}
