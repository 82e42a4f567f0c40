//! Configuration file handling

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration, read from `<config dir>/melodeon/config.json`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the library server.
    pub server_url: String,
    pub request_timeout_secs: u64,
    /// Per-group cap on rendered search results.
    pub search_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8233".to_string(),
            request_timeout_secs: 10,
            search_limit: 40,
        }
    }
}

impl Config {
    /// Try to read an existing config file.
    ///
    /// If none is found, a default one is written and returned. The
    /// `MELODEON_SERVER_URL` environment variable overrides the file's
    /// server URL either way.
    pub fn load() -> Result<Config> {
        let path = Self::config_path()?;

        let mut config = if path.is_file() {
            tracing::debug!(path = %path.display(), "Reading config file");
            let file = File::open(&path)
                .with_context(|| format!("Error opening config file at {path:?}"))?;
            serde_json::from_reader(file)
                .with_context(|| format!("Error deserializing config file at {path:?}"))?
        } else {
            tracing::info!(path = %path.display(), "No config file found, writing defaults");
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Error creating config directory at {parent:?}"))?;
            }
            let file = File::create(&path)
                .with_context(|| format!("Error creating config file at {path:?}"))?;
            serde_json::to_writer_pretty(file, &config)
                .with_context(|| format!("Error serializing config to {path:?}"))?;
            config
        };

        if let Ok(url) = std::env::var("MELODEON_SERVER_URL") {
            config.server_url = url;
        }

        Ok(config)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Couldn't determine config directory")?;
        Ok(config_dir.join("melodeon").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"server_url": "http://music.local"}"#).unwrap();
        assert_eq!(config.server_url, "http://music.local");
        assert_eq!(config.search_limit, Config::default().search_limit);
    }
}
