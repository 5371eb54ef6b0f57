//! Validation issues collected from a theme configuration

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    EmptyContent,
    InvalidPattern,
    InvalidTokenName,
    DuplicateToken,
    InvalidColor,
    InvalidFontStack,
    InvalidShadow,
    InvalidPlugin,
}

/// A single problem found in a theme, addressed by its token path
#[derive(Debug, Clone, Serialize)]
pub struct ThemeIssue {
    /// Dotted path, e.g. `theme.extend.colors.primary`
    pub path: String,
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for ThemeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}: {}", self.path, self.message)
    }
}

/// Result of validating a theme
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ThemeIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, path: impl Into<String>, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(ThemeIssue {
            path: path.into(),
            kind,
            severity: Severity::Error,
            message: message.into(),
        });
    }

    pub fn warning(
        &mut self,
        path: impl Into<String>,
        kind: IssueKind,
        message: impl Into<String>,
    ) {
        self.issues.push(ThemeIssue {
            path: path.into(),
            kind,
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    /// True when there are no error-severity issues
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ThemeIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ThemeIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    /// Fail with a summary of every error
    pub fn into_result(self) -> Result<()> {
        let errors: Vec<String> = self.errors().map(|issue| issue.to_string()).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!(
                "theme has {} error(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            ))
        }
    }
}
