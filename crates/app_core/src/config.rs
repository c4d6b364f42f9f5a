//! Application configuration

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub device: DeviceConfig,
    pub filer: FilerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            device: DeviceConfig::default(),
            filer: FilerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub language: String,
    pub theme: String,
    pub remember_window_state: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            theme: "dark".to_string(),
            remember_window_state: true,
        }
    }
}

/// Device bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Explicit adb binary path; discovery runs when unset
    pub bridge_path: Option<PathBuf>,

    /// How often the caller polls for attached devices
    pub poll_interval_secs: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            bridge_path: None,
            poll_interval_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilerConfig {
    pub show_hidden_files: bool,
    pub confirm_delete: bool,

    /// How often the caller re-fingerprints the current directory
    pub refresh_interval_secs: u64,
}

impl Default for FilerConfig {
    fn default() -> Self {
        Self {
            show_hidden_files: false,
            confirm_delete: true,
            refresh_interval_secs: 2,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "DroidFiler", "DroidFiler")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.device.poll_interval_secs, 5);
        assert_eq!(parsed.filer.refresh_interval_secs, 2);
        assert!(parsed.device.bridge_path.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: AppConfig =
            toml::from_str("[device]\nbridge_path = \"/usr/local/bin/adb\"\n").unwrap();

        assert_eq!(
            parsed.device.bridge_path,
            Some(PathBuf::from("/usr/local/bin/adb"))
        );
        assert_eq!(parsed.device.poll_interval_secs, 5);
        assert!(parsed.filer.confirm_delete);
    }
}
