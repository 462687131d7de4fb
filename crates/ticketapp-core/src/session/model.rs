//! Session domain model.

use serde::{Deserialize, Serialize};

/// Marker of an authenticated actor, held in the persisted store.
///
/// Presence of a stored session is the sole authorization check: the token
/// carries no signature and is never verified against anything. Consumers
/// that need the actor's identity parse the stored value; the authorization
/// gate itself only checks that the slot is occupied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Email address the actor signed in with.
    pub email: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Opaque session token assigned at login.
    pub token: String,
}

impl Session {
    /// Returns the name to greet the actor with: the display name when set,
    /// the email otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}
