//! Color types and CSS color parsing.
//!
//! Area fills and strokes arrive as CSS color strings (`"#756f6a"`, `"blue"`)
//! and leave as CSS color strings in SVG output. [`Rgba`] is the typed form
//! in between.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

/// Named colors accepted by [`Rgba::parse`].
const NAMED_COLORS: &[(&str, Rgba)] = &[
    ("black", Rgba::BLACK),
    ("white", Rgba::WHITE),
    ("red", Rgba::RED),
    ("green", Rgba::rgb(0, 128, 0)),
    ("lime", Rgba::GREEN),
    ("blue", Rgba::BLUE),
    ("orange", Rgba::rgb(255, 165, 0)),
    ("yellow", Rgba::rgb(255, 255, 0)),
    ("cyan", Rgba::rgb(0, 255, 255)),
    ("magenta", Rgba::rgb(255, 0, 255)),
    ("purple", Rgba::rgb(128, 0, 128)),
    ("gray", Rgba::rgb(128, 128, 128)),
    ("grey", Rgba::rgb(128, 128, 128)),
    ("transparent", Rgba::TRANSPARENT),
];

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parse a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)`,
    /// `rgba(r,g,b,a)` with alpha in `[0, 1]`, or a basic named color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything else.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| Error::InvalidColor(input.to_string()));
        }

        let lower = text.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(args).ok_or_else(|| Error::InvalidColor(input.to_string()));
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, color)| *color)
            .ok_or_else(|| Error::InvalidColor(input.to_string()))
    }

    /// CSS representation (`#rrggbb` when opaque, `rgba(...)` otherwise).
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some(Rgba::rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Some(Rgba::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => Some(Rgba::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}

/// Channels of `rgb(...)`/`rgba(...)`; alpha is a fraction rounded to 8 bits.
fn parse_functional(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let (channels, alpha) = match parts.as_slice() {
        [r, g, b] => ([*r, *g, *b], 255),
        [r, g, b, a] => {
            let a: f64 = a.parse().ok()?;
            if !(0.0..=1.0).contains(&a) {
                return None;
            }
            ([*r, *g, *b], (a * 255.0).round() as u8)
        }
        _ => return None,
    };
    let [r, g, b] = channels.map(|c| c.parse::<u8>().ok());
    Some(Rgba::new(r?, g?, b?, alpha))
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_css()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::new(0, 0, 0, 255));
        assert_eq!(Rgba::WHITE, Rgba::new(255, 255, 255, 255));
        assert_eq!(Rgba::TRANSPARENT.a, 0);
    }

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(Rgba::parse("#756f6a").unwrap(), Rgba::rgb(0x75, 0x6f, 0x6a));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(Rgba::parse("#f80").unwrap(), Rgba::rgb(255, 136, 0));
    }

    #[test]
    fn test_parse_hex_with_alpha() {
        assert_eq!(Rgba::parse("#ff000080").unwrap(), Rgba::new(255, 0, 0, 128));
    }

    #[test]
    fn test_parse_named_case_insensitive() {
        assert_eq!(Rgba::parse("Blue").unwrap(), Rgba::BLUE);
        assert_eq!(Rgba::parse(" orange ").unwrap(), Rgba::rgb(255, 165, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Rgba::parse("#12"), Err(Error::InvalidColor(_))));
        assert!(matches!(Rgba::parse("#gggggg"), Err(Error::InvalidColor(_))));
        assert!(Rgba::parse("chartreuse-ish").is_err());
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Rgba::rgb(0x75, 0x6f, 0x6a).to_css(), "#756f6a");
        assert_eq!(Rgba::BLUE.with_alpha(0).to_css(), "rgba(0,0,255,0.000)");
    }

    #[test]
    fn test_display_matches_css() {
        assert_eq!(Rgba::RED.to_string(), "#ff0000");
    }

    #[test]
    fn test_serde_string_form() {
        let color: Rgba = serde_yaml_ng::from_str("\"#00ff00\"").unwrap();
        assert_eq!(color, Rgba::GREEN);
        let text = serde_yaml_ng::to_string(&Rgba::RED).unwrap();
        assert!(text.contains("#ff0000"));
    }

    #[test]
    fn test_rgba_default() {
        assert_eq!(Rgba::default(), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_parse_functional() {
        assert_eq!(Rgba::parse("rgb(1, 2, 3)").unwrap(), Rgba::rgb(1, 2, 3));
        assert_eq!(Rgba::parse("rgba(0,0,0,0.000)").unwrap(), Rgba::TRANSPARENT);
        assert_eq!(Rgba::parse("RGBA(255,0,0,0.5)").unwrap(), Rgba::new(255, 0, 0, 128));
    }

    #[test]
    fn test_parse_functional_rejects_out_of_range() {
        assert!(Rgba::parse("rgb(256,0,0)").is_err());
        assert!(Rgba::parse("rgba(0,0,0,1.5)").is_err());
        assert!(Rgba::parse("rgba(0,0,0)x").is_err());
        assert!(Rgba::parse("rgba(0,0)").is_err());
    }

    #[test]
    fn test_transparent_serde_roundtrip() {
        let text = serde_yaml_ng::to_string(&Rgba::TRANSPARENT).unwrap();
        let back: Rgba = serde_yaml_ng::from_str(&text).unwrap();
        assert_eq!(back, Rgba::TRANSPARENT);
    }
}
