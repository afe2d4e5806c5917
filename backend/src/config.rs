//! Backend configuration.
//!
//! Loaded once at startup from a YAML file; every field has a default so a
//! missing file section never blocks boot.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Credentials for the administrator account seeded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub full_name: String,
    pub email: String,
    /// Plaintext in the config file, hashed before storage
    pub password: String,
}

/// Runtime configuration of the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Allow recording attendance before the event date (on-site check-in)
    #[serde(default)]
    pub allow_onsite_checkin: bool,
    /// Admin account seeded at startup unless its email already exists
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl BackendConfig {
    /// Load configuration from a YAML file.
    pub fn load_yaml(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());

        let yaml_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: BackendConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }
}
