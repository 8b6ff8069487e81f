//! Area outline generation.
//!
//! Each area is drawn as four subpaths in screen space: the baseline, the
//! left edge, the top line and the right edge. Unstacked areas sit on the
//! y-domain minimum; a stacked area sits on the line of the series before it.

use crate::data::{AxisPair, Series};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::interpolate::{line_path, Interpolation};
use crate::scale::{AxisScales, Extent};
use std::fmt;

/// The four subpaths outlining one area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaPath {
    /// Bottom boundary, drawn left to right.
    pub baseline: String,
    /// Vertical segment at the left end of the domain.
    pub left_edge: String,
    /// The series line.
    pub top: String,
    /// Vertical segment at the right end of the domain.
    pub right_edge: String,
}

impl AreaPath {
    /// Path data string, concatenated baseline, left edge, top and right edge.
    #[must_use]
    pub fn d(&self) -> String {
        format!(
            "{}{}{}{}",
            self.baseline, self.left_edge, self.top, self.right_edge
        )
    }
}

impl fmt::Display for AreaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.d())
    }
}

/// Screen-space line of a series, kept so the next stacked area can sit on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Interpolated path of the series.
    pub line: String,
    /// First projected point.
    pub first: Point,
    /// Last projected point.
    pub last: Point,
}

fn segment(from: Point, to: Point) -> String {
    format!("M {from} L {to}")
}

/// Builds area paths from bound scales and final domains.
#[derive(Debug)]
pub struct PathGenerator<'a> {
    scales: &'a AxisScales,
    domain: AxisPair<Extent>,
    interpolation: Interpolation,
    stacked: bool,
}

impl<'a> PathGenerator<'a> {
    /// Create a generator; `scales` must already be bound to `domain`.
    #[must_use]
    pub fn new(
        scales: &'a AxisScales,
        domain: AxisPair<Extent>,
        interpolation: Interpolation,
        stacked: bool,
    ) -> Self {
        Self {
            scales,
            domain,
            interpolation,
            stacked,
        }
    }

    fn project(&self, x: f64, y: f64) -> Result<Point> {
        let point = Point::new(self.scales.x.scale(x), self.scales.y.scale(y));
        if point.x.is_finite() && point.y.is_finite() {
            Ok(point)
        } else {
            Err(Error::InvalidInput(format!(
                "point ({x}, {y}) has no finite screen position"
            )))
        }
    }

    /// Project a series and build its line with its own interpolation, or the chart's.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySeries`] for a series without points and
    /// [`Error::InvalidInput`] when a point cannot be projected.
    pub fn layer(&self, series: &Series) -> Result<Layer> {
        let points = series
            .data
            .iter()
            .map(|p| self.project(p.x, p.y))
            .collect::<Result<Vec<_>>>()?;
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return Err(Error::EmptySeries(series.attrs.name.clone()));
        };
        let mode = series.attrs.interpolation.unwrap_or(self.interpolation);
        Ok(Layer {
            line: line_path(&points, mode),
            first,
            last,
        })
    }

    /// Screen x of the domain ends and screen y of the domain minimum.
    fn frame(&self) -> (f64, f64, f64) {
        let (x, y) = (self.domain.x, self.domain.y);
        (
            self.scales.x.scale(x.0.min(x.1)),
            self.scales.x.scale(x.0.max(x.1)),
            self.scales.y.scale(y.0.min(y.1)),
        )
    }

    /// Outline of one area over `previous` when stacking, else over the domain minimum.
    #[must_use]
    pub fn area_path(&self, layer: &Layer, previous: Option<&Layer>) -> AreaPath {
        let (x_min, x_max, y_min) = self.frame();
        let (baseline, left, right) = match previous {
            Some(previous) if self.stacked => (
                previous.line.clone(),
                previous.first.y,
                previous.last.y,
            ),
            _ => (
                segment(Point::new(x_min, y_min), Point::new(x_max, y_min)),
                y_min,
                y_min,
            ),
        };
        AreaPath {
            baseline,
            left_edge: segment(Point::new(x_min, left), Point::new(x_min, layer.first.y)),
            top: layer.line.clone(),
            right_edge: segment(Point::new(x_max, right), Point::new(x_max, layer.last.y)),
        }
    }

    /// Outlines of every series in order.
    ///
    /// # Errors
    ///
    /// See [`PathGenerator::layer`].
    pub fn paths(&self, series: &[Series]) -> Result<Vec<AreaPath>> {
        let mut previous: Option<Layer> = None;
        let mut paths = Vec::with_capacity(series.len());
        for s in series {
            let layer = self.layer(s)?;
            paths.push(self.area_path(&layer, previous.as_ref()));
            previous = Some(layer);
        }
        Ok(paths)
    }
}
