//! Configuration manager for loading and saving page configuration
//!
//! Configuration lives in `config.json` inside the data directory and is
//! written atomically (temp file + persist) to prevent corruption.

use crate::config::models::FolioConfig;
use crate::error::{FolioError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "FOLIO_DATA_DIR";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Resolve the data directory
    ///
    /// Order: `FOLIO_DATA_DIR`, `%APPDATA%\Folio`, `$XDG_CONFIG_HOME/folio`,
    /// `$HOME/.config/folio`, then `./.folio`.
    pub fn data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return PathBuf::from(dir);
        }
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("Folio");
        }
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("folio");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join("folio");
        }
        PathBuf::from(".folio")
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        Self::data_dir().join("config.json")
    }

    /// Load configuration from the default location
    pub fn load() -> Result<FolioConfig> {
        Self::load_from(&Self::get_config_path())
    }

    /// Load configuration, writing the defaults out on first start
    ///
    /// A failed write is logged and the loaded configuration is still returned.
    pub fn load_or_init() -> Result<FolioConfig> {
        let config = Self::load()?;
        if !Self::get_config_path().exists() {
            match Self::save(&config) {
                Ok(()) => info!("Wrote default configuration"),
                Err(e) => warn!("Failed to write default configuration: {}", e),
            }
        }
        Ok(config)
    }

    /// Load configuration from `path`
    ///
    /// If the file doesn't exist or is corrupt, returns default configuration.
    pub fn load_from(path: &Path) -> Result<FolioConfig> {
        if !path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(FolioConfig::default());
        }

        let json = std::fs::read_to_string(path)?;

        match serde_json::from_str(&json) {
            Ok(config) => {
                info!("Configuration loaded from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(FolioConfig::default())
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(config: &FolioConfig) -> Result<()> {
        Self::save_to(&Self::get_config_path(), config)
    }

    /// Save configuration to `path` with an atomic write
    pub fn save_to(path: &Path, config: &FolioConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(path, json.as_bytes())?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Write `contents` to `path` through a sibling temp file and an atomic rename.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| FolioError::ConfigError(crate::error::StringError::new("Invalid path")))?;
    std::fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| FolioError::IoError(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{DataDirGuard, create_test_dir};

    #[test]
    fn test_config_path_honours_override() {
        let temp_dir = create_test_dir();
        let _guard = DataDirGuard::new(&temp_dir);

        let path = ConfigManager::get_config_path();
        assert_eq!(path, temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_load_or_init_writes_defaults_once() {
        let temp_dir = create_test_dir();
        let _guard = DataDirGuard::new(&temp_dir);
        let path = ConfigManager::get_config_path();

        assert_eq!(ConfigManager::load_or_init().unwrap(), FolioConfig::default());
        assert!(path.exists());

        // An edited file is loaded, not overwritten
        let mut edited = FolioConfig::default();
        edited.timings.notification_ms = 1234;
        ConfigManager::save(&edited).unwrap();
        assert_eq!(ConfigManager::load_or_init().unwrap(), edited);
        assert_eq!(ConfigManager::load().unwrap(), edited);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = create_test_dir();
        let config = ConfigManager::load_from(&temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("nested").join("config.json");

        let mut config = FolioConfig::default();
        config.timings.submit_delay_ms = 10;
        config.submission.endpoint = Some("http://localhost:9/submit".to_string());
        ConfigManager::save_to(&path, &config).unwrap();

        let loaded = ConfigManager::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_corrupt_config_falls_back_to_defaults() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = ConfigManager::load_from(&path).unwrap();
        assert_eq!(config, FolioConfig::default());
    }
}
