//! Main configuration structure and implementation

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{expand_path, DataConfig, ExportConfig, ThemeSettings};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration version
    pub version: String,

    /// Data store settings
    #[serde(default)]
    pub data: DataConfig,

    /// Theme settings
    #[serde(default)]
    pub theme: ThemeSettings,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != "1.0" {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        self.data.validate()?;
        self.theme.validate()?;
        self.export.validate()?;

        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        expand_path(&self.data.data_dir)
    }

    pub fn images_dir(&self) -> PathBuf {
        expand_path(&self.data.images_dir)
    }

    pub fn theme_config_path(&self) -> PathBuf {
        expand_path(&self.theme.config_path)
    }

    pub fn content_root(&self) -> PathBuf {
        expand_path(&self.theme.content_root)
    }

    pub fn theme_output_path(&self) -> PathBuf {
        expand_path(&self.theme.output_path)
    }

    pub fn stylesheet_dir(&self) -> PathBuf {
        expand_path(&self.theme.stylesheet_dir)
    }

    pub fn export_dir(&self) -> PathBuf {
        expand_path(&self.export.export_dir)
    }

    pub fn reports_dir(&self) -> PathBuf {
        expand_path(&self.export.reports_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            data: DataConfig::default(),
            theme: ThemeSettings::default(),
            export: ExportConfig::default(),
        }
    }
}
