//! Stored event documents with file metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::{KlycsError, KlycsResult};
use crate::event::Event;

/// An event as it lives in a card's directory (one JSON document per event).
#[derive(Debug, Clone)]
pub struct StoredEvent {
    /// Path to the .json document
    pub path: PathBuf,
    /// The event data
    pub event: Event,
    /// File modification time
    pub modified: Option<DateTime<Utc>>,
}

impl StoredEvent {
    pub fn from_file(path: PathBuf) -> KlycsResult<Self> {
        let content = std::fs::read_to_string(&path)?;

        let event: Event = serde_json::from_str(&content).map_err(|e| {
            KlycsError::Store(format!("Failed to parse event from {}: {e}", path.display()))
        })?;

        let modified = std::fs::metadata(&path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);

        Ok(StoredEvent {
            path,
            event,
            modified,
        })
    }
}
