//! Configuration management for the exporter
//!
//! Supports environment variables, config files, and runtime overrides.
//! Only scalar runtime settings live here; the combination catalog and the
//! export plan are code-level declarations (see `export::catalog`).
//!
//! Config file location: ~/.config/hiringlab-exporter/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{ExporterError, Result};

/// Main configuration for the exporter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Target site configuration
    pub site: SiteConfig,
    /// Browser configuration
    pub browser: BrowserRunConfig,
    /// Export output configuration
    pub export: ExportConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the dashboard site
    pub base_url: String,
    /// Bound on waiting for the dashboard tile group to appear, in seconds
    pub dashboard_wait_secs: u64,
    /// Bound on waiting for a dashboard's data load to finish, in seconds.
    /// The site can take minutes on slow days, hence the generous default.
    pub data_load_timeout_secs: u64,
    /// Bound on waiting for a triggered download to land on disk, in seconds
    pub download_timeout_secs: u64,
}

/// Browser launch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserRunConfig {
    /// Whether to run without a visible window
    pub headless: bool,
    /// Explicit Chrome/Chromium executable; autodetected when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_executable: Option<PathBuf>,
}

/// Export output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the CSV files are written to. Wiped and recreated on every
    /// run; a run is a complete refresh, never an increment.
    pub output_dir: PathBuf,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            browser: BrowserRunConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("HIRINGLAB_BASE_URL")
                .unwrap_or_else(|_| "https://data.indeed.com".to_string()),
            dashboard_wait_secs: 20,
            data_load_timeout_secs: 720,
            download_timeout_secs: 120,
        }
    }
}

impl Default for BrowserRunConfig {
    fn default() -> Self {
        Self {
            headless: env::var("HIRINGLAB_HEADLESS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            chrome_executable: env::var("HIRINGLAB_CHROME").ok().map(PathBuf::from),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: env::var("HIRINGLAB_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("exported_data")),
        }
    }
}

impl ExporterConfig {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hiringlab-exporter")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(config) = Self::load_from_file(&Self::config_file()) {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExporterError::config("Config file not found"));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ExporterError::config(format!("Failed to read config: {}", e)))?;

        let config: ExporterConfig = toml::from_str(&content)
            .map_err(|e| ExporterError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| ExporterError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ExporterError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| ExporterError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExporterConfig::default();
        assert_eq!(config.site.base_url, "https://data.indeed.com");
        assert_eq!(config.site.dashboard_wait_secs, 20);
        assert_eq!(config.site.data_load_timeout_secs, 720);
        assert_eq!(config.export.output_dir, PathBuf::from("exported_data"));
    }

    #[test]
    fn test_config_serialization() {
        let config = ExporterConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("output_dir"));

        let parsed: ExporterConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.site.base_url, config.site.base_url);
    }

    #[test]
    fn test_config_dir() {
        let dir = ExporterConfig::config_dir();
        assert!(dir.to_string_lossy().contains("hiringlab-exporter"));
    }
}
