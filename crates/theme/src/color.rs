//! CSS color values accepted in color tokens

use anyhow::{anyhow, Result};
use std::fmt;

/// A parsed CSS color
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// Hex or `rgb()`/`rgba()` color
    Rgba { r: u8, g: u8, b: u8, a: u8 },

    /// `hsl()`/`hsla()` color; hue in degrees, the rest in 0.0..=1.0
    Hsla { h: f32, s: f32, l: f32, a: f32 },

    /// One of the CSS named colors, lowercased
    Named(String),

    /// `transparent`, `currentColor` or `inherit`
    Keyword(String),
}

const KEYWORDS: &[&str] = &["transparent", "currentcolor", "inherit"];

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

impl Color {
    /// Parse a CSS color string
    pub fn parse(input: &str) -> Result<Self> {
        let value = input.trim();
        if value.is_empty() {
            return Err(anyhow!("empty color value"));
        }

        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| anyhow!("invalid hex color: {}", value));
        }

        let lower = value.to_ascii_lowercase();
        if let Some((name, args)) = split_function(&lower) {
            return match name {
                "rgb" | "rgba" => parse_rgb(args),
                "hsl" | "hsla" => parse_hsl(args),
                _ => Err(anyhow!("unsupported color function: {}()", name)),
            }
            .map_err(|e| anyhow!("invalid color {}: {}", value, e));
        }

        if KEYWORDS.contains(&lower.as_str()) {
            return Ok(Color::Keyword(lower));
        }

        if NAMED_COLORS.binary_search(&lower.as_str()).is_ok() {
            return Ok(Color::Named(lower));
        }

        Err(anyhow!("unrecognized color: {}", value))
    }

    /// Hex form, available for hex and rgb colors
    pub fn to_hex(&self) -> Option<String> {
        match self {
            Color::Rgba { r, g, b, a: 255 } => Some(format!("#{}", hex::encode([*r, *g, *b]))),
            Color::Rgba { r, g, b, a } => Some(format!("#{}", hex::encode([*r, *g, *b, *a]))),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgba { r, g, b, a: 255 } => write!(f, "rgb({r}, {g}, {b})"),
            Color::Rgba { r, g, b, a } => {
                write!(f, "rgba({r}, {g}, {b}, {})", *a as f32 / 255.0)
            }
            Color::Hsla { h, s, l, a } if *a >= 1.0 => {
                write!(f, "hsl({h}, {}%, {}%)", s * 100.0, l * 100.0)
            }
            Color::Hsla { h, s, l, a } => {
                write!(f, "hsla({h}, {}%, {}%, {a})", s * 100.0, l * 100.0)
            }
            Color::Named(name) | Color::Keyword(name) => f.write_str(name),
        }
    }
}

/// Whether the value is a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` color
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .map(|hex| parse_hex(hex).is_some())
        .unwrap_or(false)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return None,
    };

    let bytes = hex::decode(expanded).ok()?;
    Some(Color::Rgba {
        r: bytes[0],
        g: bytes[1],
        b: bytes[2],
        a: bytes.get(3).copied().unwrap_or(255),
    })
}

fn split_function(value: &str) -> Option<(&str, &str)> {
    let open = value.find('(')?;
    let inner = value.strip_suffix(')')?;
    Some((value[..open].trim(), &inner[open + 1..]))
}

/// Arguments of a color function in either comma or space syntax
///
/// Comma syntax rejects empty arguments such as `rgb(1,2,3,)`; space
/// syntax allows a single `/ alpha` suffix.
fn split_args(args: &str) -> Result<Vec<&str>> {
    if args.contains(',') {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.iter().any(|part| part.is_empty()) {
            return Err(anyhow!("empty argument in '{}'", args));
        }
        return Ok(parts);
    }

    let (channels, alpha) = match args.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (args, None),
    };
    let mut parts: Vec<&str> = channels.split_whitespace().collect();
    if let Some(alpha) = alpha {
        if alpha.is_empty() || alpha.contains(|c: char| c == '/' || c.is_whitespace()) {
            return Err(anyhow!("invalid alpha in '{}'", args));
        }
        parts.push(alpha);
    }
    Ok(parts)
}

/// A finite number; `NaN` and infinities are not CSS numbers
fn parse_number(raw: &str) -> Result<f32> {
    let value = raw
        .parse::<f32>()
        .map_err(|_| anyhow!("invalid number: {}", raw))?;
    if !value.is_finite() {
        return Err(anyhow!("invalid number: {}", raw));
    }
    Ok(value)
}

fn parse_channel(raw: &str) -> Result<u8> {
    let value = if let Some(pct) = raw.strip_suffix('%') {
        parse_number(pct)? * 255.0 / 100.0
    } else {
        parse_number(raw)?
    };

    if !(0.0..=255.0).contains(&value) {
        return Err(anyhow!("channel out of range: {}", raw));
    }
    Ok(value.round() as u8)
}

fn parse_unit(raw: &str) -> Result<f32> {
    let value = if let Some(pct) = raw.strip_suffix('%') {
        parse_number(pct)? / 100.0
    } else {
        parse_number(raw)?
    };

    if !(0.0..=1.0).contains(&value) {
        return Err(anyhow!("value out of range: {}", raw));
    }
    Ok(value)
}

fn parse_rgb(args: &str) -> Result<Color> {
    let parts = split_args(args)?;
    if !(3..=4).contains(&parts.len()) {
        return Err(anyhow!("expected 3 or 4 arguments, got {}", parts.len()));
    }

    let alpha = match parts.get(3) {
        Some(raw) => (parse_unit(raw)? * 255.0).round() as u8,
        None => 255,
    };

    Ok(Color::Rgba {
        r: parse_channel(parts[0])?,
        g: parse_channel(parts[1])?,
        b: parse_channel(parts[2])?,
        a: alpha,
    })
}

fn parse_hsl(args: &str) -> Result<Color> {
    let parts = split_args(args)?;
    if !(3..=4).contains(&parts.len()) {
        return Err(anyhow!("expected 3 or 4 arguments, got {}", parts.len()));
    }

    let hue = parse_number(parts[0].strip_suffix("deg").unwrap_or(parts[0]))?;
    if !parts[1].ends_with('%') || !parts[2].ends_with('%') {
        return Err(anyhow!("saturation and lightness must be percentages"));
    }

    Ok(Color::Hsla {
        h: hue.rem_euclid(360.0),
        s: parse_unit(parts[1])?,
        l: parse_unit(parts[2])?,
        a: match parts.get(3) {
            Some(raw) => parse_unit(raw)?,
            None => 1.0,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#007aff")]
    #[case("#FFF")]
    #[case("#1c1c1e80")]
    #[case("#abcd")]
    #[case("rgba(0, 0, 0, 0.1)")]
    #[case("rgb(255 128 0 / 50%)")]
    #[case("hsl(210, 100%, 50%)")]
    #[case("hsl(-30deg 50% 50% / 0.5)")]
    #[case("transparent")]
    #[case("currentColor")]
    #[case("RebeccaPurple")]
    fn test_valid_colors(#[case] input: &str) {
        assert!(Color::parse(input).is_ok(), "{input} should parse");
    }

    #[rstest]
    #[case("")]
    #[case("#12")]
    #[case("#gggggg")]
    #[case("007aff")]
    #[case("rgb(300, 0, 0)")]
    #[case("rgb(1, 2)")]
    #[case("hsl(10, 20, 30)")]
    #[case("blurple")]
    #[case("calc(1px)")]
    #[case("hsl(nan, 10%, 10%)")]
    #[case("hsl(inf, 10%, 10%)")]
    #[case("hsl(10, NaN%, 10%)")]
    #[case("rgb(1,2,3,)")]
    #[case("rgb(1,,2,3)")]
    #[case("rgb(1 2 3 /)")]
    #[case("rgba(0, 0, 0, nan)")]
    fn test_invalid_colors(#[case] input: &str) {
        assert!(Color::parse(input).is_err(), "{input} should be rejected");
    }

    #[test]
    fn test_hex_expansion() {
        assert_eq!(
            Color::parse("#0af").unwrap(),
            Color::Rgba {
                r: 0x00,
                g: 0xaa,
                b: 0xff,
                a: 255
            }
        );
        assert_eq!(Color::parse("#007AFF").unwrap().to_hex().unwrap(), "#007aff");
        assert_eq!(
            Color::parse("rgba(0, 0, 0, 0.5)").unwrap().to_hex().unwrap(),
            "#00000080"
        );
        assert!(Color::parse("white").unwrap().to_hex().is_none());
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#8e8e93"));
        assert!(!is_hex_color("rgb(0,0,0)"));
        assert!(!is_hex_color("#8e8e9"));
    }

    #[test]
    fn test_named_colors_sorted() {
        let mut sorted = NAMED_COLORS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, NAMED_COLORS);
    }
}
