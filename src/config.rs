use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_PATH: &str = "config.toml";

/// Application configuration, read from `config.toml` when present.
///
/// Every field has a default reproducing the stock deployment, so the
/// server runs without any config file at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for the root document and static assets.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backing file holding the serialized location list.
    pub locations_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            locations_path: PathBuf::from("locations.json"),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml`, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        match std::fs::read_to_string(CONFIG_PATH) {
            Ok(raw) => {
                toml::from_str(&raw).with_context(|| format!("Failed to parse {}", CONFIG_PATH))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err).with_context(|| format!("Failed to read {}", CONFIG_PATH)),
        }
    }
}
