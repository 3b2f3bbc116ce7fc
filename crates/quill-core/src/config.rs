//! Configuration management for Quill.
//!
//! Loads configuration from ${QUILL_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for Quill configuration and data directories.
    //!
    //! QUILL_HOME resolution order:
    //! 1. QUILL_HOME environment variable (if set)
    //! 2. ~/.config/quill (default)

    use std::path::PathBuf;

    /// Returns the Quill home directory.
    ///
    /// Checks QUILL_HOME env var first, falls back to ~/.config/quill
    pub fn quill_home() -> PathBuf {
        if let Ok(home) = std::env::var("QUILL_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("quill"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        quill_home().join("config.toml")
    }

    /// Returns the path to the persisted session token file.
    pub fn token_path() -> PathBuf {
        quill_home().join("token")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        quill_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the blog API.
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Config::DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

    /// Loads configuration from the default config path.
    ///
    /// The QUILL_API_URL environment variable overrides the configured base URL.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        if let Ok(url) = std::env::var("QUILL_API_URL")
            && !url.trim().is_empty()
        {
            config.api_base_url = url.trim().to_string();
        }
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the default config template to the default path.
    ///
    /// Fails if a config file already exists.
    pub fn init() -> Result<std::path::PathBuf> {
        let path = paths::config_path();
        Self::init_at(&path)?;
        Ok(path)
    }

    /// Writes the default config template to a specific path.
    pub fn init_at(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Default config file contents, with commented-out optional fields.
pub fn default_config_template() -> &'static str {
    r#"# Quill configuration

# Base URL of the blog API.
api_base_url = "http://localhost:3000"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_base_url, Config::DEFAULT_API_BASE_URL);
    }

    #[test]
    fn load_from_parses_api_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base_url = \"https://blog.example.com\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "https://blog.example.com");
    }

    #[test]
    fn template_parses_back_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.api_base_url, Config::DEFAULT_API_BASE_URL);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::init_at(&path).unwrap();
        assert!(Config::init_at(&path).is_err());
    }
}
