//! Global klycs configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{KlycsError, KlycsResult};

static DEFAULT_CARDS_PATH: &str = "~/klycs";

fn default_cards_path() -> PathBuf {
    PathBuf::from(DEFAULT_CARDS_PATH)
}

fn is_default_cards_path(p: &PathBuf) -> bool {
    *p == default_cards_path()
}

/// Global configuration at ~/.config/klycs/config.toml
///
/// Card-specific configuration (display title, color) is stored in each
/// card's .klycs/card.toml file instead.
#[derive(Serialize, Deserialize, Clone)]
pub struct KlycsConfig {
    #[serde(default = "default_cards_path", skip_serializing_if = "is_default_cards_path")]
    pub cards_dir: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_card: Option<String>,
}

impl KlycsConfig {
    pub fn config_path() -> KlycsResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| KlycsError::Config("Could not determine config directory".into()))?
            .join("klycs");

        Ok(config_dir.join("config.toml"))
    }

    /// Save the current config to ~/.config/klycs/config.toml
    pub fn save(&self) -> KlycsResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| KlycsError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| KlycsError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> KlycsResult<()> {
        let contents = format!(
            "\
# klycs configuration

# Where your cards live:
# cards_dir = \"{}\"

# Default card for new events:
# default_card = \"my-card\"
",
            DEFAULT_CARDS_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                KlycsError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| KlycsError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
