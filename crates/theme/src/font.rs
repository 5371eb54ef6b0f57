//! Font stack checks and CSS rendering

use anyhow::{anyhow, Result};

/// CSS generic family keywords
pub const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
    "fangsong",
];

pub fn is_generic_family(name: &str) -> bool {
    GENERIC_FAMILIES.contains(&name.trim())
}

/// A stack must be non-empty, have no blank names, and end with a generic family
pub fn validate_stack(stack: &[String]) -> Result<()> {
    let Some(last) = stack.last() else {
        return Err(anyhow!("font stack is empty"));
    };

    if let Some(pos) = stack.iter().position(|name| name.trim().is_empty()) {
        return Err(anyhow!("font name at position {} is blank", pos));
    }

    if !is_generic_family(last) {
        return Err(anyhow!(
            "font stack should end with a generic family, found '{}'",
            last
        ));
    }

    Ok(())
}

/// Render a stack as a `font-family` value
pub fn css_font_family(stack: &[String]) -> String {
    stack
        .iter()
        .map(|name| {
            let name = name.trim();
            if is_generic_family(name) || !name.contains(char::is_whitespace) {
                name.to_string()
            } else {
                format!("\"{}\"", name.replace('"', "\\\""))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_stack() {
        assert!(validate_stack(&stack(&["-apple-system", "Arial", "sans-serif"])).is_ok());
        assert!(validate_stack(&stack(&["monospace"])).is_ok());
        assert!(validate_stack(&[]).is_err());
        assert!(validate_stack(&stack(&["Arial", "Helvetica"])).is_err());
        assert!(validate_stack(&stack(&["Arial", " ", "serif"])).is_err());
    }

    #[test]
    fn test_css_font_family_quotes_spaced_names() {
        let value = css_font_family(&stack(&[
            "-apple-system",
            "BlinkMacSystemFont",
            "Helvetica Neue",
            "Arial",
            "sans-serif",
        ]));
        assert_eq!(
            value,
            "-apple-system, BlinkMacSystemFont, \"Helvetica Neue\", Arial, sans-serif"
        );
    }
}
