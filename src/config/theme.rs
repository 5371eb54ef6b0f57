//! Theme token file and stylesheet settings

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSettings {
    /// Theme token file (`.json`, `.yaml` or `.yml`); built-in tokens are
    /// used when the file does not exist
    pub config_path: PathBuf,

    /// Root that content patterns are resolved against
    pub content_root: PathBuf,

    /// Compiled utility stylesheet
    pub output_path: PathBuf,

    /// Directory of stylesheet presets
    pub stylesheet_dir: PathBuf,

    /// Active preset
    pub stylesheet: String,
}

impl ThemeSettings {
    pub fn validate(&self) -> Result<()> {
        if self.config_path.as_os_str().is_empty() {
            return Err(anyhow!("Theme config path cannot be empty"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(anyhow!("Theme output path cannot be empty"));
        }
        if self.stylesheet_dir.as_os_str().is_empty() {
            return Err(anyhow!("Stylesheet directory cannot be empty"));
        }
        if !self.stylesheet.ends_with(".css") {
            return Err(anyhow!(
                "Stylesheet must be a .css file: {}",
                self.stylesheet
            ));
        }
        Ok(())
    }
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("theme.json"),
            content_root: PathBuf::from("."),
            output_path: PathBuf::from("dist/theme.css"),
            stylesheet_dir: PathBuf::from("css"),
            stylesheet: cafeteria_theme::presets::DEFAULT_SELECTION.to_string(),
        }
    }
}
