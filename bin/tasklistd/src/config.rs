//! Server configuration — loaded from a TOML file.
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/tasklist"
//! # db_path = "/var/lib/tasklist/tasks.redb"
//! ```

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the service's persistent data.
    pub data_dir: String,

    /// Explicit database file path. Defaults to `{data_dir}/data.redb`.
    pub db_path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            db_path: None,
        }
    }
}

impl ServerConfig {
    /// Load and parse a TOML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
        let config = toml::from_str(&text)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Verify the configuration is usable.
    pub fn verify(&self) -> anyhow::Result<()> {
        if self.storage.data_dir.is_empty() {
            anyhow::bail!("storage data_dir is empty in configuration");
        }
        Ok(())
    }
}
