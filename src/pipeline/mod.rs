//! The area chart computation pipeline.
//!
//! One pass runs the stages in order:
//!
//! 1. [`string_map`]: map categorical labels to indices per axis
//! 2. [`consolidate`]: normalize every input into numeric series
//! 3. [`domain`]: resolve ranges and padded domains per axis
//! 4. bind a fresh copy of each axis scale to its domain and range
//! 5. [`path`]: build one outline per series
//!
//! Every pass is a pure function of the chart; nothing is cached between
//! passes.

pub mod consolidate;
pub mod domain;
pub mod path;
pub mod string_map;

use crate::color::Rgba;
use crate::config::AreaStyle;
use crate::data::{Axis, AxisPair, Series};
use crate::error::Result;
use crate::plots::{AreaChart, ContainerElement};
use crate::scale::{bind_scale, AxisScales, Extent};

pub use consolidate::consolidate;
pub use domain::{DomainSource, DomainWarning, ResolvedDomain};
pub use path::{AreaPath, PathGenerator};
pub use string_map::{create_string_maps, StringMap, StringMaps};

/// A drawable area: path data plus presentation attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaElement {
    /// Stable key, `area-<index>`.
    pub key: String,
    /// Path outline.
    pub path: AreaPath,
    /// Fill color.
    pub fill: Rgba,
    /// Fill opacity.
    pub opacity: f64,
    /// Outline color.
    pub stroke: Rgba,
    /// Outline width.
    pub stroke_width: f64,
}

/// Everything one pipeline pass produces.
#[derive(Debug, Clone)]
pub struct AreaGeometry {
    /// One element per series, in series order.
    pub elements: Vec<AreaElement>,
    /// The consolidated series.
    pub series: Vec<Series>,
    /// Final (padded) domain per axis.
    pub domain: AxisPair<Extent>,
    /// Pixel range per axis.
    pub range: AxisPair<Extent>,
    /// Scales bound to `domain` and `range`.
    pub scales: AxisScales,
    /// Categorical mappings per axis.
    pub string_maps: StringMaps,
    /// Warnings raised while inferring domains.
    pub warnings: Vec<DomainWarning>,
    /// Wrapping element for rendering.
    pub container: ContainerElement,
    /// Chart style.
    pub style: AreaStyle,
}

/// Run the full pipeline for `chart`.
///
/// # Errors
///
/// Returns an error if the chart settings are invalid (see
/// [`AreaChart::build`]), inputs cannot be consolidated, a domain cannot be
/// inferred, a scale rejects its domain, or a series is empty.
pub fn compute(chart: &AreaChart) -> Result<AreaGeometry> {
    chart.validate()?;
    let string_maps = create_string_maps(chart);
    let mut warnings = Vec::new();
    let series = consolidate(chart, &string_maps, &mut warnings)?;

    let range = AxisPair::from_fn(|axis| domain::resolve_range(chart, axis));
    let ctx = domain::DomainContext {
        chart,
        maps: &string_maps,
        series: &series,
    };
    let mut resolve = |axis: Axis| -> Result<Extent> {
        let resolved =
            domain::resolve_domain(domain::AXIS_DOMAIN_CHAIN, &ctx, axis, &mut warnings)?;
        let padding = chart
            .domain_padding
            .as_ref()
            .and_then(|p| p.get(axis))
            .copied();
        Ok(domain::pad_domain(
            resolved,
            padding,
            *range.get(axis),
            string_maps.get(axis).is_some(),
        ))
    };
    let domain = AxisPair {
        x: resolve(Axis::X)?,
        y: resolve(Axis::Y)?,
    };

    let scales = AxisScales {
        x: bind_scale(chart.scale.x.as_ref(), domain.x, range.x)?,
        y: bind_scale(chart.scale.y.as_ref(), domain.y, range.y)?,
    };
    let paths =
        PathGenerator::new(&scales, domain, chart.interpolation, chart.stacked).paths(&series)?;

    let style = &chart.style;
    let elements = paths
        .into_iter()
        .zip(&series)
        .enumerate()
        .map(|(index, (path, s))| AreaElement {
            key: format!("area-{index}"),
            path,
            fill: s.attrs.color.unwrap_or(style.color),
            opacity: s.attrs.opacity.unwrap_or(style.opacity),
            stroke: style.stroke,
            stroke_width: style.stroke_width,
        })
        .collect();

    tracing::debug!(
        series = series.len(),
        x_domain = ?domain.x,
        y_domain = ?domain.y,
        warnings = warnings.len(),
        "computed area geometry"
    );

    Ok(AreaGeometry {
        elements,
        series,
        domain,
        range,
        scales,
        string_maps,
        warnings,
        container: chart.container,
        style: style.clone(),
    })
}
