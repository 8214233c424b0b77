//! Loading application configuration (storage settings) from TOML.
//!
//! Everything here is optional: the backend runs with defaults when no config
//! file is provided, and environment variables take precedence over the file.

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub storage: StorageCfg,
}

/// Settings for the external key-value store binding.
/// `base_url` left unset means the in-memory store is used instead.
#[derive(Clone, Debug, Deserialize)]
pub struct StorageCfg {
  #[serde(default)] pub base_url: Option<String>,
  #[serde(default)] pub api_token: Option<String>,
  #[serde(default = "default_timeout_secs")] pub timeout_secs: u64,
}

impl Default for StorageCfg {
  fn default() -> Self {
    Self { base_url: None, api_token: None, timeout_secs: default_timeout_secs() }
  }
}

fn default_timeout_secs() -> u64 { 20 }

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  let raw = std::fs::read_to_string(&path)
    .map_err(|e| error!(target: "mathquest_backend", %path, error = %e, "Failed to read TOML config file"))
    .ok()?;
  match toml::from_str::<AppConfig>(&raw) {
    Ok(cfg) => {
      info!(target: "mathquest_backend", %path, "Loaded app config (TOML)");
      Some(cfg)
    }
    Err(e) => {
      error!(target: "mathquest_backend", %path, error = %e, "Failed to parse TOML config");
      None
    }
  }
}
