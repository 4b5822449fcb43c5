//! Klycs root directory management.

use std::path::PathBuf;

use config::{Config, File};

use crate::card::Card;
use crate::error::{KlycsError, KlycsResult};
use crate::klycs_config::KlycsConfig;

#[derive(Clone)]
pub struct Klycs {
    config: KlycsConfig,
}

impl Klycs {
    pub fn load() -> KlycsResult<Self> {
        let config_path = KlycsConfig::config_path()?;

        if !config_path.exists() {
            KlycsConfig::create_default_config(&config_path)?;
        }

        let config: KlycsConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| KlycsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| KlycsError::Config(e.to_string()))?;

        Ok(Klycs { config })
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.cards_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Returns the cards directory path in display-friendly form,
    /// keeping `~` instead of expanding to the full home directory.
    pub fn display_path(&self) -> PathBuf {
        self.config.cards_dir.clone()
    }

    /// Discover cards by scanning cards_dir for subdirectories
    /// with a .klycs marker directory.
    pub fn cards(&self) -> Vec<Card> {
        let data_path = self.data_path();

        let Ok(entries) = std::fs::read_dir(&data_path) else {
            return Vec::new();
        };

        let mut cards: Vec<Card> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && path.join(".klycs").exists())
            .filter_map(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|slug| Card::load(slug).ok())
            })
            .collect();

        cards.sort_by(|a, b| a.slug.cmp(&b.slug));
        cards
    }

    pub fn default_card(&self) -> Option<Card> {
        let slug = self.config.default_card.as_ref()?;
        self.cards().into_iter().find(|c| &c.slug == slug)
    }

    /// Set the default card if one isn't already configured.
    /// Returns true if the default was set.
    pub fn set_default_card_if_unset(&mut self, slug: &str) -> KlycsResult<bool> {
        if self.config.default_card.is_some() {
            return Ok(false);
        }
        self.config.default_card = Some(slug.to_string());
        self.config.save()?;
        Ok(true)
    }
}
