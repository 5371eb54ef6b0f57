//! Stylesheet compilation from theme tokens

use crate::config::ThemeConfig;
use crate::font::css_font_family;
use anyhow::Result;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use tracing::debug;

/// Marker preceding the fingerprint in a generated stylesheet header
pub const FINGERPRINT_MARKER: &str = "theme-fingerprint: ";

/// Whether a stylesheet holds every utility or only the scanned ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Full,
    Scan,
}

impl BuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Full => "full",
            BuildMode::Scan => "scan",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "full" => Some(BuildMode::Full),
            "scan" => Some(BuildMode::Scan),
            _ => None,
        }
    }
}

/// Class a candidate refers to once variant prefixes are dropped
///
/// `md:hover:bg-primary` -> `bg-primary`
pub fn bare_class(candidate: &str) -> &str {
    candidate.rsplit(':').next().unwrap_or(candidate)
}

/// A single generated utility class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utility {
    /// Class name without the leading dot
    pub class: String,
    pub property: &'static str,
    pub value: String,
}

/// `backgroundLight` -> `background-light`
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (idx, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx > 0 && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

/// Every utility the theme defines, ordered by token kind then name
pub fn utilities(theme: &ThemeConfig) -> Vec<Utility> {
    let mut out = Vec::new();

    for (name, value) in theme.colors() {
        let token = kebab_case(name);
        for (prefix, property) in [
            ("text", "color"),
            ("bg", "background-color"),
            ("border", "border-color"),
        ] {
            out.push(Utility {
                class: format!("{prefix}-{token}"),
                property,
                value: value.trim().to_string(),
            });
        }
    }

    for (alias, stack) in theme.font_families() {
        out.push(Utility {
            class: format!("font-{}", kebab_case(alias)),
            property: "font-family",
            value: css_font_family(stack),
        });
    }

    for (alias, value) in theme.box_shadows() {
        out.push(Utility {
            class: format!("shadow-{}", kebab_case(alias)),
            property: "box-shadow",
            value: value.trim().to_string(),
        });
    }

    out
}

/// Utilities referenced by a set of class candidates, variants included
pub fn used_utilities(theme: &ThemeConfig, candidates: &BTreeSet<String>) -> Vec<Utility> {
    let bare: BTreeSet<&str> = candidates.iter().map(|c| bare_class(c)).collect();
    utilities(theme)
        .into_iter()
        .filter(|utility| bare.contains(utility.class.as_str()))
        .collect()
}

/// Builds CSS from a theme
#[derive(Debug)]
pub struct StylesheetBuilder {
    include_variables: bool,
}

impl Default for StylesheetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StylesheetBuilder {
    pub fn new() -> Self {
        Self {
            include_variables: true,
        }
    }

    /// Toggle the `:root` custom property block
    pub fn with_variables(mut self, include: bool) -> Self {
        self.include_variables = include;
        self
    }

    /// Compile the theme
    ///
    /// With `used`, only utilities whose class appears there are emitted.
    /// Variant-prefixed candidates (`md:bg-primary`) count as uses of the
    /// bare class.
    pub fn build(&self, theme: &ThemeConfig, used: Option<&BTreeSet<String>>) -> Result<String> {
        let (mode, selected) = match used {
            Some(set) => (BuildMode::Scan, used_utilities(theme, set)),
            None => (BuildMode::Full, utilities(theme)),
        };

        let mut css = String::new();
        writeln!(css, "/* Generated by cafeteria. Do not edit. */")?;
        writeln!(
            css,
            "/* {}{} {} */",
            FINGERPRINT_MARKER,
            theme.fingerprint()?,
            mode.as_str()
        )?;

        if self.include_variables {
            css.push_str(&root_variables(theme)?);
        }

        let mut emitted = 0;
        for utility in selected {
            writeln!(
                css,
                "\n.{} {{\n  {}: {};\n}}",
                utility.class, utility.property, utility.value
            )?;
            emitted += 1;
        }

        debug!("Emitted {} utility rules", emitted);
        Ok(css)
    }
}

fn root_variables(theme: &ThemeConfig) -> Result<String> {
    let mut block = String::from("\n:root {\n");
    for (name, value) in theme.colors() {
        writeln!(block, "  --color-{}: {};", kebab_case(name), value.trim())?;
    }
    for (alias, stack) in theme.font_families() {
        writeln!(block, "  --font-{}: {};", kebab_case(alias), css_font_family(stack))?;
    }
    for (alias, value) in theme.box_shadows() {
        writeln!(block, "  --shadow-{}: {};", kebab_case(alias), value.trim())?;
    }
    block.push_str("}\n");
    Ok(block)
}

/// Fingerprint recorded in a previously generated stylesheet, if any
pub fn read_fingerprint(css: &str) -> Option<&str> {
    read_build_stamp(css).map(|(fingerprint, _)| fingerprint)
}

/// Fingerprint and build mode recorded in a generated stylesheet header
///
/// Headers without a mode predate scan builds and count as full builds.
pub fn read_build_stamp(css: &str) -> Option<(&str, BuildMode)> {
    css.lines().take(3).find_map(|line| {
        let start = line.find(FINGERPRINT_MARKER)? + FINGERPRINT_MARKER.len();
        let mut fields = line[start..].split_whitespace();
        let fingerprint = fields.next()?;
        let mode = match fields.next() {
            Some("*/") | None => BuildMode::Full,
            Some(other) => BuildMode::parse(other)?,
        };
        Some((fingerprint, mode))
    })
}
