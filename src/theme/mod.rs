//! Theme tokens and stylesheets for a configuration, independent of the store

use crate::{utils, AppConfig, StylesheetManager, ThemeConfig};
use anyhow::Result;
use cafeteria_theme::css::{read_build_stamp, BuildMode, StylesheetBuilder};
use cafeteria_theme::scan::{collect_used_classes, ContentScanner};
use std::path::PathBuf;
use tracing::{debug, info};

/// Theme operations driven by the `theme` section of the configuration
pub struct ThemeContext<'a> {
    config: &'a AppConfig,
}

impl<'a> ThemeContext<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        self.config
    }

    /// Theme tokens from the configured file, or the built-in tokens when
    /// the file does not exist
    pub fn load_theme(&self) -> Result<ThemeConfig> {
        let path = self.config.theme_config_path();
        if path.exists() {
            debug!("Loading theme tokens from {:?}", path);
            ThemeConfig::from_file(&path)
        } else {
            debug!("Theme file {:?} not found, using built-in tokens", path);
            Ok(ThemeConfig::default())
        }
    }

    pub fn scanner(&self) -> ContentScanner {
        ContentScanner::new(self.config.content_root())
    }

    pub fn stylesheets(&self) -> StylesheetManager {
        StylesheetManager::new(
            self.config.stylesheet_dir(),
            Some(self.config.theme.stylesheet.as_str()),
        )
    }

    /// Compile the theme stylesheet
    ///
    /// With `scan_content`, only utilities used by the content files are
    /// emitted. Unless `force` is set, an existing full build of the same
    /// tokens is left untouched; a scan build is always rewritten.
    pub fn build_theme(&self, scan_content: bool, force: bool) -> Result<ThemeBuild> {
        let theme = self.load_theme()?;
        theme.validate().into_result()?;

        let output_path = self.config.theme_output_path();
        let fingerprint = theme.fingerprint()?;

        if !force && !scan_content && output_path.exists() {
            let existing = std::fs::read_to_string(&output_path)?;
            if read_build_stamp(&existing) == Some((fingerprint.as_str(), BuildMode::Full)) {
                info!("Theme unchanged, keeping {:?}", output_path);
                return Ok(ThemeBuild {
                    output_path,
                    fingerprint,
                    content_files: 0,
                    written: false,
                });
            }
        }

        let (used, content_files) = if scan_content {
            let files = self.scanner().scan(&theme)?;
            info!("Scanned {} content file(s)", files.len());
            (Some(collect_used_classes(&files)), files.len())
        } else {
            (None, 0)
        };

        let css = StylesheetBuilder::new().build(&theme, used.as_ref())?;
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            utils::ensure_directory(parent)?;
        }
        std::fs::write(&output_path, css)?;
        info!("Wrote theme stylesheet {:?}", output_path);

        Ok(ThemeBuild {
            output_path,
            fingerprint,
            content_files,
            written: true,
        })
    }
}

/// Outcome of a theme build
#[derive(Debug, Clone)]
pub struct ThemeBuild {
    pub output_path: PathBuf,
    pub fingerprint: String,
    pub content_files: usize,
    pub written: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(root: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.data.data_dir = root.join("data");
        config.theme.config_path = root.join("theme.json");
        config.theme.content_root = root.join("site");
        config.theme.output_path = root.join("dist/theme.css");
        config.theme.stylesheet_dir = root.join("css");
        config
    }

    #[test]
    fn test_theme_work_leaves_store_alone() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path());
        let context = ThemeContext::new(&config);

        context.build_theme(false, false).unwrap();
        context.stylesheets().install_defaults().unwrap();

        assert!(temp_dir.path().join("dist/theme.css").exists());
        assert!(temp_dir.path().join("css/blueberry.css").exists());
        assert!(!temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_missing_theme_file_uses_builtin_tokens() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path());

        let theme = ThemeContext::new(&config).load_theme().unwrap();
        assert_eq!(theme, ThemeConfig::default());
    }
}
