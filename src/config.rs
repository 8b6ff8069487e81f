//! Chart style configuration.
//!
//! Every field has a default, so a partial YAML document (or none at all)
//! yields a fully-populated [`AreaStyle`].

use crate::color::Rgba;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Visual style of an area chart.
///
/// `width`, `height` and `margin` also drive the default pixel ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaStyle {
    /// Border color of the container.
    #[serde(default = "default_border_color")]
    pub border_color: Rgba,

    /// Border width of the container in pixels.
    #[serde(default)]
    pub border_width: f64,

    /// Fill used when a series has no color of its own.
    #[serde(default = "default_color")]
    pub color: Rgba,

    /// Fill opacity used when a series has no opacity of its own.
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Margin between the container edge and the plot area.
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Container width in pixels.
    #[serde(default = "default_width")]
    pub width: f64,

    /// Container height in pixels.
    #[serde(default = "default_height")]
    pub height: f64,

    /// Outline stroke of each area.
    #[serde(default = "default_stroke")]
    pub stroke: Rgba,

    /// Outline stroke width.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

fn default_border_color() -> Rgba {
    Rgba::TRANSPARENT
}
fn default_color() -> Rgba {
    Rgba::rgb(0x75, 0x6f, 0x6a)
}
fn default_opacity() -> f64 {
    1.0
}
fn default_margin() -> f64 {
    20.0
}
fn default_width() -> f64 {
    500.0
}
fn default_height() -> f64 {
    300.0
}
fn default_stroke() -> Rgba {
    Rgba::BLACK
}
fn default_stroke_width() -> f64 {
    1.0
}

impl Default for AreaStyle {
    fn default() -> Self {
        Self {
            border_color: default_border_color(),
            border_width: 0.0,
            color: default_color(),
            opacity: default_opacity(),
            margin: default_margin(),
            width: default_width(),
            height: default_height(),
            stroke: default_stroke(),
            stroke_width: default_stroke_width(),
        }
    }
}

impl AreaStyle {
    /// Parse a style from YAML; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) on malformed YAML or colors.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a style from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Serialize the style to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_default_style() {
        let style = AreaStyle::default();
        assert_eq!(style.width, 500.0);
        assert_eq!(style.height, 300.0);
        assert_eq!(style.margin, 20.0);
        assert_eq!(style.color.to_css(), "#756f6a");
        assert_eq!(style.opacity, 1.0);
    }

    #[test]
    fn test_partial_yaml_merges_defaults() {
        let style = AreaStyle::from_yaml_str("width: 800\ncolor: red\n").unwrap();
        assert_eq!(style.width, 800.0);
        assert_eq!(style.color, Rgba::RED);
        assert_eq!(style.height, 300.0);
        assert_eq!(style.margin, 20.0);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AreaStyle::from_yaml_str("  \n").unwrap(), AreaStyle::default());
    }

    #[test]
    fn test_bad_color_is_config_error() {
        let result = AreaStyle::from_yaml_str("color: not-a-color");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_yaml_roundtrip_preserves_style() {
        let style = AreaStyle {
            margin: 35.0,
            ..AreaStyle::default()
        };
        let yaml = style.to_yaml().unwrap();
        assert_eq!(AreaStyle::from_yaml_str(&yaml).unwrap(), style);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "height: 400\nmargin: 10").unwrap();
        let style = AreaStyle::from_file(file.path()).unwrap();
        assert_eq!(style.height, 400.0);
        assert_eq!(style.margin, 10.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AreaStyle::from_file("/nonexistent/trueno-area/style.yaml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
