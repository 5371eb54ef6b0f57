//! Content scanning: find source files and the class names they use

use crate::config::ThemeConfig;
use crate::patterns::{self, MATCH_OPTIONS};
use anyhow::Result;
use glob::Pattern;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into while scanning
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "target", "dist"];

/// Resolves content patterns against a project root
pub struct ContentScanner {
    root: PathBuf,
}

impl ContentScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files under the root matched by any content pattern, sorted
    pub fn scan(&self, theme: &ThemeConfig) -> Result<Vec<PathBuf>> {
        let mut compiled: Vec<Pattern> = Vec::new();
        for pattern in &theme.content {
            compiled.extend(patterns::compile(pattern)?);
        }

        let mut files = BTreeSet::new();
        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if compiled
                .iter()
                .any(|p| p.matches_with(&relative, MATCH_OPTIONS))
            {
                debug!("Content file matched: {}", relative);
                files.insert(entry.into_path());
            }
        }

        Ok(files.into_iter().collect())
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIPPED_DIRS.contains(&name))
            .unwrap_or(false)
}

fn is_class_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '/' | '.' | '[' | ']' | '#' | '%')
}

/// Candidate class names in a chunk of source text
///
/// Splits on anything that cannot appear in a utility class name, so
/// `class="bg-primary text-light"` and `:class="{'shadow-subtle': on}"`
/// both yield their class names. Candidates are over-approximate; the
/// stylesheet builder only keeps the ones that name a utility.
pub fn extract_candidates(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !is_class_char(c))
        .map(|token| token.trim_matches(|c: char| c == '.' || c == ':' || c == '/'))
        .filter(|token| {
            token
                .chars()
                .next()
                .map(|c| c.is_ascii_alphabetic())
                .unwrap_or(false)
        })
        .map(str::to_string)
        .collect()
}

/// Union of candidates over a set of files; unreadable files are skipped
pub fn collect_used_classes(files: &[PathBuf]) -> BTreeSet<String> {
    let mut used = BTreeSet::new();
    for path in files {
        match fs::read_to_string(path) {
            Ok(text) => used.extend(extract_candidates(&text)),
            Err(e) => warn!("Skipping unreadable content file {:?}: {}", path, e),
        }
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_matches_default_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "index.html", "<div class=\"bg-primary\"></div>");
        write(root, "src/App.vue", "<template/>");
        write(root, "src/components/Menu.tsx", "export {}");
        write(root, "src/styles.css", ".x {}");
        write(root, "node_modules/lib/index.js", "");
        write(root, "other.html", "");

        let scanner = ContentScanner::new(root);
        let files = scanner.scan(&ThemeConfig::default()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(
            names,
            vec!["index.html", "src/App.vue", "src/components/Menu.tsx"]
        );
    }

    #[test]
    fn test_scan_rejects_bad_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let mut theme = ThemeConfig::default();
        theme.content = vec!["src/{a".to_string()];

        assert!(ContentScanner::new(temp_dir.path()).scan(&theme).is_err());
    }

    #[test]
    fn test_extract_candidates() {
        let text = r#"<div class="bg-primary text-text-light md:shadow-subtle" :class="{'font-sans': big}">"#;
        let found = extract_candidates(text);

        assert!(found.contains("bg-primary"));
        assert!(found.contains("text-text-light"));
        assert!(found.contains("md:shadow-subtle"));
        assert!(found.contains("font-sans"));
        assert!(!found.contains("<div"));
        assert!(!found.iter().any(|c| c.starts_with('{')));
    }

    #[test]
    fn test_collect_used_classes_skips_missing_files() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a.html", "bg-primary");

        let used = collect_used_classes(&[
            temp_dir.path().join("a.html"),
            temp_dir.path().join("missing.html"),
        ]);
        assert!(used.contains("bg-primary"));
    }
}
