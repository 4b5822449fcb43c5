//! Card directory management.
//!
//! Each klycs profile card owns a directory of JSON event documents under the
//! configured cards directory. A `.klycs` subdirectory marks a directory as a
//! card and holds its local configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::card_config::CardConfig;
use crate::date_range::DateRange;
use crate::error::{KlycsError, KlycsResult};
use crate::event::{Event, EventTime};
use crate::klycs::Klycs;
use crate::schedule;
use crate::stored_event::StoredEvent;

#[derive(Clone, Serialize, Deserialize)]
pub struct Card {
    pub slug: String,
    pub config: CardConfig,
}

impl Card {
    pub fn load(slug: &str) -> KlycsResult<Self> {
        let card_dir = Self::data_dir_path(slug)?;

        if !card_dir.join(".klycs").exists() {
            return Err(KlycsError::CardNotFound(slug.to_string()));
        }

        let config = CardConfig::load(&card_dir)?;

        Ok(Card {
            slug: slug.to_string(),
            config,
        })
    }

    /// Create the card directory (with its .klycs marker) and return the card.
    pub fn create(slug: &str, title: Option<String>) -> KlycsResult<Self> {
        let card_dir = Self::data_dir_path(slug)?;
        std::fs::create_dir_all(&card_dir)?;

        let config = CardConfig {
            title,
            ..CardConfig::default()
        };
        config.save(&card_dir)?;

        Ok(Card {
            slug: slug.to_string(),
            config,
        })
    }

    pub fn data_dir_path(slug: &str) -> KlycsResult<PathBuf> {
        let klycs = Klycs::load()?;
        Ok(klycs.data_path().join(slug))
    }

    pub fn data_dir(&self) -> KlycsResult<PathBuf> {
        Self::data_dir_path(&self.slug)
    }

    /// Display title from the card config, falling back to the slug.
    pub fn display_title(&self) -> &str {
        self.config.title.as_deref().unwrap_or(&self.slug)
    }

    /// Load events from the card directory
    pub fn events(&self) -> KlycsResult<Vec<StoredEvent>> {
        load_events(&self.data_dir()?)
    }

    /// Events visible in `range`: plain events inside the window plus
    /// expanded recurring instances, sorted by start.
    pub fn events_in_range(&self, range: &DateRange) -> KlycsResult<Vec<Event>> {
        let events = self.events()?.into_iter().map(|e| e.event).collect();
        Ok(schedule::events_in_range(events, range))
    }

    // =========================================================================
    // Event operations
    // =========================================================================

    pub fn create_event(&self, event: &Event) -> KlycsResult<()> {
        let dir = self.data_dir()?;
        std::fs::create_dir_all(&dir)?;
        write_event(&dir, event)
    }

    pub fn update_event(&self, event_id: &str, event: &Event) -> KlycsResult<()> {
        self.delete_event(event_id)?;
        self.create_event(event)
    }

    /// Delete an event document by id. Returns true if one was removed.
    pub fn delete_event(&self, event_id: &str) -> KlycsResult<bool> {
        if let Some(stored) = self.find_event(event_id)? {
            std::fs::remove_file(&stored.path)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn find_event(&self, event_id: &str) -> KlycsResult<Option<StoredEvent>> {
        Ok(self
            .events()?
            .into_iter()
            .find(|e| e.event.id == event_id))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.slug)
    }
}

/// Load every event document (*.json) in a card directory.
fn load_events(dir: &Path) -> KlycsResult<Vec<StoredEvent>> {
    let entries = std::fs::read_dir(dir)?;

    let events = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "json"))
        .filter_map(|path| StoredEvent::from_file(path).ok())
        .collect();

    Ok(events)
}

/// Serialize an event document into `dir` under a collision-safe filename.
fn write_event(dir: &Path, event: &Event) -> KlycsResult<()> {
    let content = serde_json::to_string_pretty(event)
        .map_err(|e| KlycsError::Serialization(e.to_string()))?;
    let filename = filename_for(event, dir)?;

    std::fs::write(dir.join(filename), content)?;
    Ok(())
}

// =============================================================================
// Filename generation
// =============================================================================

/// Generate a unique filename for an event, handling collisions.
fn filename_for(event: &Event, dir: &Path) -> KlycsResult<String> {
    let base = base_filename(event);
    let stem = base.trim_end_matches(".json");

    // Try base filename first
    if !dir.join(&base).exists() || file_has_id(dir, &base, &event.id) {
        return Ok(base);
    }

    // Collision - try suffixes
    for n in 2..=100 {
        let suffixed = format!("{}-{}.json", stem, n);
        if !dir.join(&suffixed).exists() || file_has_id(dir, &suffixed, &event.id) {
            return Ok(suffixed);
        }
    }

    Err(KlycsError::Store(format!(
        "Too many filename collisions for {}",
        base
    )))
}

fn file_has_id(dir: &Path, filename: &str, id: &str) -> bool {
    StoredEvent::from_file(dir.join(filename)).is_ok_and(|e| e.event.id == id)
}

fn base_filename(event: &Event) -> String {
    let slug = slugify(&event.title);

    if event.is_recurring() {
        return format!("_recurring__{}.json", slug);
    }

    let date = match &event.start {
        EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
        EventTime::DateTime(dt) => dt.format("%Y-%m-%dT%H%M").to_string(),
    };

    format!("{}__{}.json", date, slug)
}

pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}
