use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use runcal_core::RunCalError;
use serde::{Deserialize, Serialize};

/// Global configuration at ~/.config/runcal/config.toml
///
/// Remembers the last-used choices so repeat runs only need the schedule
/// file. Every field can be overridden per run from the command line or
/// the interactive prompts.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct Settings {
    /// Google account the CLI is authenticated as.
    pub account: Option<String>,

    /// Provider name the schedule was last filtered by.
    pub provider_name: Option<String>,

    /// Target calendar id and its display name.
    pub calendar_id: Option<String>,
    pub calendar_label: Option<String>,

    /// IANA timezone for event times (engine default when unset).
    pub timezone: Option<String>,
}

impl Settings {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("runcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load saved settings, or defaults when no config file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Resolve the configured timezone, falling back to the engine default.
    pub fn timezone(&self) -> Result<Tz> {
        match &self.timezone {
            Some(name) => name
                .parse()
                .map_err(|_| RunCalError::UnknownTimezone(name.clone()).into()),
            None => Ok(runcal_core::constants::DEFAULT_TIMEZONE),
        }
    }

    /// The authenticated account, or a helpful error if none is saved.
    pub fn require_account(&self) -> Result<&str> {
        self.account.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No Google account connected.\n\n\
                Connect one with:\n  \
                runcal auth"
            )
        })
    }
}
