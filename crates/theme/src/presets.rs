//! Built-in stylesheet presets and the active-stylesheet selection

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Preset shipped when no selection is configured
pub const DEFAULT_SELECTION: &str = "blueberry.css";

const DEFAULT_CSS: &str = r#".sub-header {
    font-size: 18px;
    font-weight: bold;
}
.card {
    padding: 10px;
    border-radius: 5px;
    background-color: #f5f5f5;
}
.success { background-color: #8BC34A; }
.warning { background-color: #FF9800; }
.error { background-color: #F44336; }
"#;

const BLUEBERRY_CSS: &str = r#".sub-header {
    font-size: 18px;
    font-weight: bold;
    color: #3F51B5;
}
.card {
    padding: 10px;
    border-radius: 5px;
    background-color: #E8EAF6;
    border: 1px solid #C5CAE9;
}
.success { background-color: #8BC34A; }
.warning { background-color: #FF9800; }
.error { background-color: #F44336; }
"#;

const DARK_CSS: &str = r#"window { background-color: #2D2D2D; }
label { color: #E0E0E0; }
.sub-header {
    font-size: 18px;
    font-weight: bold;
    color: #90CAF9;
}
.card {
    padding: 10px;
    border-radius: 5px;
    background-color: #424242;
    border: 1px solid #616161;
}
.success { background-color: #558B2F; }
.warning { background-color: #EF6C00; }
.error { background-color: #D32F2F; }
"#;

const LIGHT_CSS: &str = r#"window { background-color: #FFFFFF; }
label { color: #212121; }
.sub-header {
    font-size: 18px;
    font-weight: bold;
    color: #1976D2;
}
.card {
    padding: 10px;
    border-radius: 5px;
    background-color: #F5F5F5;
    border: 1px solid #E0E0E0;
    box-shadow: 0 1px 3px rgba(0,0,0,0.12);
}
.success { background-color: #8BC34A; }
.warning { background-color: #FF9800; }
.error { background-color: #F44336; }
"#;

/// Preset file names and their contents, in menu order
pub const PRESETS: &[(&str, &str)] = &[
    ("default.css", DEFAULT_CSS),
    ("blueberry.css", BLUEBERRY_CSS),
    ("dark.css", DARK_CSS),
    ("light.css", LIGHT_CSS),
];

/// Manages a directory of stylesheets and which one is active
#[derive(Debug, Clone)]
pub struct StylesheetManager {
    dir: PathBuf,
    selected: String,
}

impl StylesheetManager {
    /// Create a manager; an unknown selection falls back to the first preset
    pub fn new(dir: impl Into<PathBuf>, selected: Option<&str>) -> Self {
        let selected = match selected {
            Some(name) if is_preset(name) => name.to_string(),
            Some(_) => PRESETS[0].0.to_string(),
            None => DEFAULT_SELECTION.to_string(),
        };

        Self {
            dir: dir.into(),
            selected,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Preset names, in menu order
    pub fn available(&self) -> Vec<&'static str> {
        PRESETS.iter().map(|(name, _)| *name).collect()
    }

    /// Switch to another preset
    pub fn select(&mut self, name: &str) -> Result<()> {
        if !is_preset(name) {
            return Err(anyhow!(
                "Unknown stylesheet '{}'; available: {}",
                name,
                self.available().join(", ")
            ));
        }
        self.selected = name.to_string();
        Ok(())
    }

    pub fn selected_path(&self) -> PathBuf {
        self.dir.join(&self.selected)
    }

    /// Write any preset file that is missing; returns the files written
    pub fn install_defaults(&self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create stylesheet directory {:?}", self.dir))?;

        let mut written = Vec::new();
        for (name, css) in PRESETS {
            let path = self.dir.join(name);
            if !path.exists() {
                fs::write(&path, css)?;
                written.push(path);
            }
        }

        if !written.is_empty() {
            info!("Installed {} stylesheet preset(s) in {:?}", written.len(), self.dir);
        }
        Ok(written)
    }

    /// Contents of the selected stylesheet, installing presets if it is missing
    pub fn load(&self) -> Result<String> {
        let path = self.selected_path();
        if !path.exists() {
            self.install_defaults()?;
        }

        let css = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stylesheet {path:?}"))?;
        info!("Applied stylesheet: {}", self.selected);
        Ok(css)
    }
}

fn is_preset(name: &str) -> bool {
    PRESETS.iter().any(|(preset, _)| *preset == name)
}
