//! Export and report output locations

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory for timestamped feedback CSV exports
    pub export_dir: PathBuf,

    /// Directory for analytics reports
    pub reports_dir: PathBuf,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<()> {
        if self.export_dir.as_os_str().is_empty() {
            return Err(anyhow!("Export directory cannot be empty"));
        }
        if self.reports_dir.as_os_str().is_empty() {
            return Err(anyhow!("Reports directory cannot be empty"));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("exports"),
            reports_dir: PathBuf::from("reports"),
        }
    }
}
