use anyhow::{Context, Result};
use dirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::rsync::{DEFAULT_OPTIONS, DEFAULT_REMOTE};

const APP_DIR: &str = "myrient-picker";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub remote_host: String,
    pub default_options: String,
    pub default_destination: String,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote_host: DEFAULT_REMOTE.to_string(),
            default_options: DEFAULT_OPTIONS.to_string(),
            default_destination: "destination".to_string(),
            log_dir: None,
        }
    }
}

#[derive(Debug)]
pub struct ConfigManager {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join(APP_DIR);
        Self::with_dir(config_dir)
    }

    pub fn with_dir(config_dir: PathBuf) -> Result<Self> {
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }
        let config_file = config_dir.join(CONFIG_FILE);
        Ok(Self {
            config_dir,
            config_file,
        })
    }

    /// Use an explicit config file instead of the default location.
    pub fn with_file(config_file: PathBuf) -> Result<Self> {
        let config_dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self {
            config_dir,
            config_file,
        })
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        // If config file doesn't exist, create it with default values
        if !self.config_file.exists() {
            let default_config = AppConfig::default();
            self.save_config(&default_config)?;
        }

        let content: String =
            fs::read_to_string(&self.config_file).context("Failed to read config file")?;

        let mut config: AppConfig =
            toml::from_str(&content).context("Failed to parse config file")?;

        if config.default_options.trim().is_empty() {
            config.default_options = DEFAULT_OPTIONS.to_string();
        }

        Ok(config)
    }

    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let toml = toml::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.config_file, toml).context("Failed to write config file")?;
        Ok(())
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_file
    }

    pub fn log_dir(&self, config: &AppConfig) -> PathBuf {
        config
            .log_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.config_dir.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_default_config_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().join("nested")).unwrap();

        let config = manager.load_config().unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(manager.get_config_path().exists());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        fs::write(&file, "remote_host = \"rsync://mirror.example\"\ndefault_options = \"  \"\n").unwrap();
        let manager = ConfigManager::with_file(file).unwrap();

        let config = manager.load_config().unwrap();

        assert_eq!(config.remote_host, "rsync://mirror.example");
        assert_eq!(config.default_options, DEFAULT_OPTIONS);
        assert_eq!(config.default_destination, "destination");
        assert_eq!(manager.log_dir(&config), dir.path().join("logs"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.get_config_path(), "remote_host = [").unwrap();

        assert!(manager.load_config().is_err());
    }
}
