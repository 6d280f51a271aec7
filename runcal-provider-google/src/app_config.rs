//! OAuth client registration for the Google provider.
//!
//! runcal does not ship a client id of its own; each install registers one
//! in Google Cloud and drops it at ~/.config/runcal/google/app_config.toml.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

pub fn base_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Could not determine config directory")?
        .join("runcal")
        .join("google"))
}

pub fn load() -> Result<Credentials> {
    let path = base_dir()?.join("app_config.toml");

    if !path.exists() {
        anyhow::bail!(
            "No Google OAuth client is configured yet.\n\n\
            Register a desktop OAuth client at\n\
            https://console.cloud.google.com/apis/credentials (with the\n\
            Calendar API enabled), then write its id and secret to\n\
            {}:\n\n\
            client_id = \"...apps.googleusercontent.com\"\n\
            client_secret = \"...\"",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read OAuth client config from {}", path.display()))?;

    let creds: Credentials = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse OAuth client config from {}", path.display()))?;

    Ok(creds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_is_namespaced_to_runcal() {
        let dir = base_dir().unwrap();
        assert!(dir.ends_with("runcal/google"), "{}", dir.display());
    }
}
