//! Unified path management for Ticketapp persisted data.
//!
//! All slots of the file-backed store live under one application data
//! directory so the whole persisted state can be inspected, backed up, or
//! wiped in one place.
//!
//! This ensures consistency across all platforms (Linux, macOS, Windows).

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform data directory could not be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::DataDirNotFound => write!(f, "Cannot find platform data directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Ticketapp.
///
/// # Directory Structure
///
/// ```text
/// <platform data dir>/ticketapp/   # e.g. ~/.local/share/ticketapp on Linux
/// ├── session.json                 # serialized session (absent when logged out)
/// └── tickets.json                 # serialized ticket collection
/// ```
pub struct TicketappPaths;

impl TicketappPaths {
    /// Returns the Ticketapp data directory.
    ///
    /// The directory is not created here; store constructors create it on
    /// first use.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("ticketapp"))
            .ok_or(PathError::DataDirNotFound)
    }
}
