//! Content glob patterns with `{a,b}` alternation

use anyhow::{anyhow, Result};
use glob::{MatchOptions, Pattern};

/// Match options used for content patterns: `*` never crosses a `/`
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Upper bound on the patterns a single brace expression may expand to
pub const MAX_EXPANSIONS: usize = 1024;

/// Expand brace alternations, leftmost group first
///
/// `./src/**/*.{vue,js}` becomes `./src/**/*.vue` and `./src/**/*.js`.
/// Nested groups are expanded recursively. Patterns without braces are
/// returned unchanged. Expanding to more than [`MAX_EXPANSIONS`] patterns
/// is an error.
pub fn expand_braces(pattern: &str) -> Result<Vec<String>> {
    let mut expanded = Vec::new();
    expand_into(pattern, &mut expanded)?;
    Ok(expanded)
}

fn expand_into(pattern: &str, out: &mut Vec<String>) -> Result<()> {
    let Some(open) = pattern.find('{') else {
        if pattern.contains('}') {
            return Err(anyhow!("unbalanced '}}' in pattern: {}", pattern));
        }
        if out.len() >= MAX_EXPANSIONS {
            return Err(anyhow!(
                "pattern expands to more than {} alternatives",
                MAX_EXPANSIONS
            ));
        }
        out.push(pattern.to_string());
        return Ok(());
    };

    let close = matching_brace(pattern, open)
        .ok_or_else(|| anyhow!("unbalanced '{{' in pattern: {}", pattern))?;

    let prefix = &pattern[..open];
    if prefix.contains('}') {
        return Err(anyhow!("unbalanced '}}' in pattern: {}", pattern));
    }
    let body = &pattern[open + 1..close];
    let suffix = &pattern[close + 1..];

    for alternative in split_top_level(body) {
        let candidate = format!("{prefix}{alternative}{suffix}");
        expand_into(&candidate, out)?;
    }

    Ok(())
}

fn matching_brace(pattern: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, ch) in pattern[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// Strip the leading `./` that content patterns conventionally carry
pub fn normalize(pattern: &str) -> &str {
    let mut trimmed = pattern;
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed
}

/// Expand and compile a content pattern
pub fn compile(pattern: &str) -> Result<Vec<Pattern>> {
    if pattern.trim().is_empty() {
        return Err(anyhow!("empty content pattern"));
    }

    expand_braces(pattern)?
        .iter()
        .map(|p| {
            Pattern::new(normalize(p)).map_err(|e| anyhow!("invalid pattern {}: {}", p, e.msg))
        })
        .collect()
}

/// Check that a content pattern is well formed
pub fn validate_pattern(pattern: &str) -> Result<()> {
    compile(pattern).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_braces() {
        assert_eq!(
            expand_braces("./src/**/*.{vue,js,ts}").unwrap(),
            vec!["./src/**/*.vue", "./src/**/*.js", "./src/**/*.ts"]
        );
        assert_eq!(
            expand_braces("{a,b}/{x,y}").unwrap(),
            vec!["a/x", "a/y", "b/x", "b/y"]
        );
        assert_eq!(
            expand_braces("src/*.{js,{ts,tsx}}").unwrap(),
            vec!["src/*.js", "src/*.ts", "src/*.tsx"]
        );
        assert_eq!(expand_braces("./index.html").unwrap(), vec!["./index.html"]);
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(expand_braces("src/*.{js,ts").is_err());
        assert!(expand_braces("src/*.js}").is_err());
        assert!(expand_braces("src}/{a,b}").is_err());
    }

    #[test]
    fn test_expansion_is_capped() {
        // 2^10 alternatives is exactly the limit
        let at_limit = "{a,b}".repeat(10);
        assert_eq!(expand_braces(&at_limit).unwrap().len(), MAX_EXPANSIONS);

        let explosive = format!("src/{}.js", "{a,b}".repeat(30));
        assert!(expand_braces(&explosive).is_err());
        assert!(validate_pattern(&explosive).is_err());
    }

    #[test]
    fn test_validate_pattern() {
        assert!(validate_pattern("./index.html").is_ok());
        assert!(validate_pattern("./src/**/*.{vue,js,ts,jsx,tsx}").is_ok());
        assert!(validate_pattern("").is_err());
        assert!(validate_pattern("src/[a-.js").is_err());
        assert!(validate_pattern("src/***/x").is_err());
    }

    #[test]
    fn test_compiled_patterns_match_relative_paths() {
        let patterns = compile("./src/**/*.{vue,ts}").unwrap();
        let matches = |path: &str| {
            patterns
                .iter()
                .any(|p| p.matches_with(path, MATCH_OPTIONS))
        };

        assert!(matches("src/App.vue"));
        assert!(matches("src/components/menu/Card.ts"));
        assert!(!matches("src/main.js"));
        assert!(!matches("lib/App.vue"));
    }
}
