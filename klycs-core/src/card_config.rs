//! Per-card local configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KlycsError, KlycsResult};

/// Configuration stored in each card's .klycs/card.toml
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct CardConfig {
    /// Display title for the card (defaults to the directory slug).
    pub title: Option<String>,
    /// Default display color for the card's events.
    pub color: Option<String>,
}

impl CardConfig {
    /// Load config from .klycs/card.toml
    pub fn load(card_dir: &Path) -> KlycsResult<Self> {
        let path = card_dir.join(".klycs/card.toml");

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: CardConfig =
                toml::from_str(&content).map_err(|e| KlycsError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to .klycs/card.toml
    pub fn save(&self, card_dir: &Path) -> KlycsResult<()> {
        let dir = card_dir.join(".klycs");
        std::fs::create_dir_all(&dir)?;

        let path = dir.join("card.toml");

        let content =
            toml::to_string_pretty(self).map_err(|e| KlycsError::Config(e.to_string()))?;

        std::fs::write(&path, content)?;

        Ok(())
    }
}
