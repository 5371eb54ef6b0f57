//! Data store locations

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the menu/feedback store and dish images live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding `menu.json` and `feedback.json`
    pub data_dir: PathBuf,

    /// Directory holding dish images
    pub images_dir: PathBuf,
}

impl DataConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(anyhow!("Data directory cannot be empty"));
        }
        if self.images_dir.as_os_str().is_empty() {
            return Err(anyhow!("Images directory cannot be empty"));
        }
        Ok(())
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            images_dir: PathBuf::from("images"),
        }
    }
}
