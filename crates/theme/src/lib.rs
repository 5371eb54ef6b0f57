//! Design-token theme: loading, validation, content scanning and CSS output

pub mod color;
pub mod config;
pub mod css;
pub mod font;
pub mod patterns;
pub mod presets;
pub mod report;
pub mod scan;
pub mod shadow;

pub use color::Color;
pub use config::{ThemeConfig, ThemeExtension, ThemeSection};
pub use css::{BuildMode, StylesheetBuilder, Utility};
pub use presets::StylesheetManager;
pub use report::{IssueKind, Severity, ThemeIssue, ValidationReport};
pub use scan::ContentScanner;
