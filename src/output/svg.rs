//! SVG output encoder.
//!
//! Renders computed area geometry as vector markup, either as a standalone
//! `<svg>` document or as a `<g>` group for embedding.

use crate::color::Rgba;
use crate::error::Result;
use crate::pipeline::AreaGeometry;
use crate::plots::ContainerElement;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG encoder for area geometry.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: f64,
    /// SVG height
    height: f64,
    /// Wrapping element
    container: ContainerElement,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// Container border color and width
    border: Option<(Rgba, f64)>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Path (SVG path data)
    Path {
        key: String,
        d: String,
        fill: Rgba,
        opacity: f64,
        stroke: Rgba,
        stroke_width: f64,
    },
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(500.0, 300.0)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            container: ContainerElement::Svg,
            background: None,
            border: None,
            elements: Vec::new(),
        }
    }

    /// Create an encoder holding one path per area element.
    #[must_use]
    pub fn from_geometry(geometry: &AreaGeometry) -> Self {
        let style = &geometry.style;
        let mut encoder = Self::new(style.width, style.height).container(geometry.container);
        if style.border_width > 0.0 {
            encoder.border = Some((style.border_color, style.border_width));
        }
        for element in &geometry.elements {
            encoder.add_element(SvgElement::Path {
                key: element.key.clone(),
                d: element.path.d(),
                fill: element.fill,
                opacity: element.opacity,
                stroke: element.stroke,
                stroke_width: element.stroke_width,
            });
        }
        encoder
    }

    /// Set the wrapping element.
    #[must_use]
    pub fn container(mut self, container: ContainerElement) -> Self {
        self.container = container;
        self
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Elements in drawing order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    fn style_attr(&self) -> String {
        match self.border {
            Some((color, width)) => {
                format!(r#" style="border: {width}px solid {}""#, color.to_css())
            }
            None => String::new(),
        }
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(256 + self.elements.len() * 512);

        let close = match self.container {
            ContainerElement::Svg => {
                let _ = writeln!(
                    svg,
                    r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}"{}>"#,
                    self.width,
                    self.height,
                    self.width,
                    self.height,
                    self.style_attr()
                );
                "</svg>\n"
            }
            ContainerElement::G => {
                let _ = writeln!(svg, "<g{}>", self.style_attr());
                "</g>\n"
            }
        };

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                bg.to_css()
            );
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str(close);
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Path {
            key,
            d,
            fill,
            opacity,
            stroke,
            stroke_width,
        } => format!(
            r#"<path data-key="{key}" d="{d}" fill="{}" opacity="{opacity}" shape-rendering="optimizeSpeed" stroke="{}" stroke-width="{stroke_width}"/>"#,
            fill.to_css(),
            stroke.to_css()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::AreaChart;

    fn path(key: &str) -> SvgElement {
        SvgElement::Path {
            key: key.to_string(),
            d: "M 0,10 L 10,10".to_string(),
            fill: Rgba::RED,
            opacity: 0.5,
            stroke: Rgba::BLACK,
            stroke_width: 1.0,
        }
    }

    #[test]
    fn test_svg_document() {
        let mut encoder = SvgEncoder::new(200.0, 100.0);
        encoder.add_element(path("area-0"));
        let svg = encoder.render();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="200""#));
        assert!(svg.contains(r##"fill="#ff0000""##));
        assert!(svg.contains(r#"opacity="0.5""#));
        assert!(svg.contains(r#"shape-rendering="optimizeSpeed""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_group_container() {
        let mut encoder = SvgEncoder::default().container(ContainerElement::G);
        encoder.add_element(path("area-0"));
        let svg = encoder.render();
        assert!(svg.starts_with("<g>"));
        assert!(!svg.contains("xmlns"));
        assert!(svg.trim_end().ends_with("</g>"));
    }

    #[test]
    fn test_background() {
        let svg = SvgEncoder::default().background(Some(Rgba::WHITE)).render();
        assert!(svg.contains(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##));
    }

    #[test]
    fn test_from_geometry_keeps_element_order() {
        let chart = AreaChart::new().data(crate::data::DataInput::Multi(vec![
            vec![(0.0, 1.0).into(), (1.0, 2.0).into()],
            vec![(0.0, 2.0).into(), (1.0, 3.0).into()],
        ]));
        let geometry = chart.geometry().unwrap();
        let encoder = SvgEncoder::from_geometry(&geometry);
        assert_eq!(encoder.elements().len(), 2);
        let svg = encoder.render();
        let first = svg.find(r#"data-key="area-0""#).unwrap();
        let second = svg.find(r#"data-key="area-1""#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_border_from_style() {
        let style = crate::config::AreaStyle {
            border_width: 2.0,
            border_color: Rgba::BLUE,
            ..Default::default()
        };
        let geometry = AreaChart::new().style(style).geometry().unwrap();
        let svg = SvgEncoder::from_geometry(&geometry).render();
        assert!(svg.contains(r##"style="border: 2px solid #0000ff""##));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("area.svg");
        SvgEncoder::default().write_to_file(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
    }
}
