//! Theme configuration: content patterns, token extensions and plugins

use crate::color::Color;
use crate::css::kebab_case;
use crate::font;
use crate::patterns;
use crate::report::{IssueKind, ValidationReport};
use crate::shadow;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level theme configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Files scanned for class usage
    #[serde(default)]
    pub content: Vec<String>,

    /// Token definitions
    #[serde(default)]
    pub theme: ThemeSection,

    /// Plugin references, in load order
    #[serde(default)]
    pub plugins: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeSection {
    #[serde(default)]
    pub extend: ThemeExtension,
}

/// Tokens layered on top of the base design system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeExtension {
    /// Color name to CSS color
    #[serde(default)]
    pub colors: BTreeMap<String, String>,

    /// Alias to font names, highest priority first
    #[serde(default, rename = "fontFamily")]
    pub font_family: BTreeMap<String, Vec<String>>,

    /// Alias to `box-shadow` value
    #[serde(default, rename = "boxShadow")]
    pub box_shadow: BTreeMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let colors = [
            ("primary", "#007aff"),
            ("secondary", "#8e8e93"),
            ("backgroundLight", "#ffffff"),
            ("backgroundDark", "#1c1c1e"),
            ("textLight", "#000000"),
            ("textDark", "#ffffff"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let sans = [
            "-apple-system",
            "BlinkMacSystemFont",
            "Helvetica Neue",
            "Arial",
            "sans-serif",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            content: vec![
                "./index.html".to_string(),
                "./src/**/*.{vue,js,ts,jsx,tsx}".to_string(),
            ],
            theme: ThemeSection {
                extend: ThemeExtension {
                    colors,
                    font_family: BTreeMap::from([("sans".to_string(), sans)]),
                    box_shadow: BTreeMap::from([(
                        "subtle".to_string(),
                        "0 1px 3px rgba(0, 0, 0, 0.1)".to_string(),
                    )]),
                },
            },
            plugins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

fn format_for(path: &Path) -> Result<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        other => Err(anyhow!(
            "Unsupported theme file extension {:?} for {:?}",
            other,
            path
        )),
    }
}

impl ThemeConfig {
    /// Load a theme from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {path:?}"))?;

        match format {
            Format::Json => Self::from_json_str(&content),
            Format::Yaml => Self::from_yaml_str(&content),
        }
        .with_context(|| format!("Failed to parse theme file {path:?}"))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Save the theme, choosing the format from the extension
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Yaml => serde_yaml::to_string(self)?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn colors(&self) -> &BTreeMap<String, String> {
        &self.theme.extend.colors
    }

    pub fn font_families(&self) -> &BTreeMap<String, Vec<String>> {
        &self.theme.extend.font_family
    }

    pub fn box_shadows(&self) -> &BTreeMap<String, String> {
        &self.theme.extend.box_shadow
    }

    /// SHA-256 of the canonical JSON form
    pub fn fingerprint(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// Check every entry, collecting all issues
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if self.content.is_empty() {
            report.error(
                "content",
                IssueKind::EmptyContent,
                "at least one content pattern is required",
            );
        }
        for (idx, pattern) in self.content.iter().enumerate() {
            if let Err(e) = patterns::validate_pattern(pattern) {
                report.error(format!("content[{idx}]"), IssueKind::InvalidPattern, e.to_string());
            }
        }

        for (name, value) in self.colors() {
            let path = format!("theme.extend.colors.{name}");
            check_token_name(&mut report, &path, name);
            if let Err(e) = Color::parse(value) {
                report.error(path, IssueKind::InvalidColor, e.to_string());
            }
        }

        for (alias, stack) in self.font_families() {
            let path = format!("theme.extend.fontFamily.{alias}");
            check_token_name(&mut report, &path, alias);
            if let Err(e) = font::validate_stack(stack) {
                report.error(path, IssueKind::InvalidFontStack, e.to_string());
            }
        }

        for (alias, value) in self.box_shadows() {
            let path = format!("theme.extend.boxShadow.{alias}");
            check_token_name(&mut report, &path, alias);
            if let Err(e) = shadow::validate_shadow(value) {
                report.error(path, IssueKind::InvalidShadow, e.to_string());
            }
        }

        check_collisions(&mut report, "colors", self.colors().keys());
        check_collisions(&mut report, "fontFamily", self.font_families().keys());
        check_collisions(&mut report, "boxShadow", self.box_shadows().keys());

        for (idx, plugin) in self.plugins.iter().enumerate() {
            let path = format!("plugins[{idx}]");
            if plugin.trim().is_empty() {
                report.error(path, IssueKind::InvalidPlugin, "plugin reference is empty");
            } else {
                report.warning(
                    path,
                    IssueKind::InvalidPlugin,
                    format!("plugin '{plugin}' is recorded but not run by the stylesheet compiler"),
                );
            }
        }

        report
    }
}

/// Token names in one section that generate the same class name
fn check_collisions<'a>(
    report: &mut ValidationReport,
    section: &str,
    names: impl Iterator<Item = &'a String>,
) {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for name in names {
        let token = kebab_case(name);
        match seen.get(&token) {
            Some(first) => report.error(
                format!("theme.extend.{section}.{name}"),
                IssueKind::DuplicateToken,
                format!("'{name}' and '{first}' both generate the token '{token}'"),
            ),
            None => {
                seen.insert(token, name.as_str());
            }
        }
    }
}

fn check_token_name(report: &mut ValidationReport, path: &str, name: &str) {
    let valid = name
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic())
        .unwrap_or(false)
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        report.error(
            path,
            IssueKind::InvalidTokenName,
            format!("'{name}' is not a valid token name"),
        );
    }
}
