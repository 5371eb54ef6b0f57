//! Configuration management for the cafeteria tools

pub mod config;
pub mod data;
pub mod export;
pub mod theme;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use config::AppConfig;
pub use data::DataConfig;
pub use export::ExportConfig;
pub use theme::ThemeSettings;

use std::path::{Path, PathBuf};

/// Expand a leading `~` and environment variables in a configured path
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(&raw).as_ref()),
    }
}
