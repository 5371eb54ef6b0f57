//! Box-shadow value checks

use crate::color::Color;
use anyhow::{anyhow, Result};

/// Split on commas that are not inside parentheses
pub fn split_layers(value: &str) -> Vec<&str> {
    let mut layers = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in value.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                layers.push(value[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    layers.push(value[start..].trim());
    layers
}

/// Split a layer on whitespace outside parentheses
fn split_parts(layer: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (idx, ch) in layer.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    parts.push(&layer[s..idx]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        parts.push(&layer[s..]);
    }
    parts
}

const LENGTH_UNITS: &[&str] = &[
    "px", "rem", "em", "ex", "ch", "vw", "vh", "vmin", "vmax", "pt", "pc", "cm", "mm", "in",
];

fn is_length(part: &str) -> bool {
    if part == "0" {
        return true;
    }
    LENGTH_UNITS.iter().any(|unit| {
        part.strip_suffix(unit)
            .and_then(|num| num.parse::<f32>().ok())
            .map(f32::is_finite)
            .unwrap_or(false)
    })
}

fn validate_layer(layer: &str) -> Result<()> {
    let mut lengths = 0;
    let mut colors = 0;
    let mut inset = false;

    for part in split_parts(layer) {
        if part.eq_ignore_ascii_case("inset") {
            if inset {
                return Err(anyhow!("'inset' given twice in '{}'", layer));
            }
            inset = true;
        } else if is_length(part) {
            lengths += 1;
        } else if Color::parse(part).is_ok() {
            colors += 1;
        } else {
            return Err(anyhow!("unexpected '{}' in shadow layer '{}'", part, layer));
        }
    }

    if !(2..=4).contains(&lengths) {
        return Err(anyhow!(
            "shadow layer '{}' needs 2 to 4 lengths, found {}",
            layer,
            lengths
        ));
    }
    if colors > 1 {
        return Err(anyhow!("shadow layer '{}' has more than one color", layer));
    }
    Ok(())
}

/// Check a CSS `box-shadow` value
pub fn validate_shadow(value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(anyhow!("empty shadow value"));
    }
    if value.eq_ignore_ascii_case("none") {
        return Ok(());
    }

    for layer in split_layers(value) {
        if layer.is_empty() {
            return Err(anyhow!("empty layer in shadow '{}'", value));
        }
        validate_layer(layer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_shadows() {
        assert!(validate_shadow("0 1px 3px rgba(0, 0, 0, 0.1)").is_ok());
        assert!(validate_shadow("none").is_ok());
        assert!(validate_shadow("inset 0 2px 4px #000").is_ok());
        assert!(
            validate_shadow("0 1px 3px rgba(0,0,0,0.12), 0 1px 2px rgba(0,0,0,0.24)").is_ok()
        );
        assert!(validate_shadow("0.5rem 0.5rem black").is_ok());
    }

    #[test]
    fn test_invalid_shadows() {
        assert!(validate_shadow("").is_err());
        assert!(validate_shadow("1px").is_err());
        assert!(validate_shadow("0 1px 3px 4px 5px").is_err());
        assert!(validate_shadow("0 1px red blue").is_err());
        assert!(validate_shadow("0 1px 3px rgba(0, 0, 0, 0.1),").is_err());
        assert!(validate_shadow("0 1px wobble").is_err());
    }

    #[rstest]
    #[case("NaNpx 1px black")]
    #[case("NaNpx infpx black")]
    #[case("0 infinityrem")]
    #[case("px 1px")]
    fn test_non_finite_lengths_rejected(#[case] value: &str) {
        assert!(validate_shadow(value).is_err(), "{value} should be rejected");
    }

    #[test]
    fn test_split_layers_respects_parentheses() {
        let layers = split_layers("0 1px rgba(0, 0, 0, 0.1), 0 2px red");
        assert_eq!(layers, vec!["0 1px rgba(0, 0, 0, 0.1)", "0 2px red"]);
    }
}
