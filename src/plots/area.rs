//! Area chart builder.
//!
//! An [`AreaChart`] collects plotting inputs and settings. Nothing is
//! computed until [`AreaChart::geometry`] runs the pipeline, so a chart can
//! be cloned, tweaked and recomputed freely.

use crate::config::AreaStyle;
use crate::data::{AttributeSpec, Axis, AxisSpec, DataInput, DataValue, XInput, YInput};
use crate::error::{Error, Result};
use crate::interpolate::Interpolation;
use crate::output::SvgEncoder;
use crate::pipeline::{self, AreaGeometry};
use crate::scale::{AxisScales, Extent};
use serde::{Deserialize, Serialize};

/// Element wrapping the rendered areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerElement {
    /// A group, for embedding into an existing SVG document.
    G,
    /// A standalone SVG document.
    #[default]
    Svg,
}

/// Builder for area charts.
#[derive(Debug, Clone)]
pub struct AreaChart {
    pub(crate) data: Option<DataInput>,
    pub(crate) x: Option<XInput>,
    pub(crate) y: Option<YInput>,
    pub(crate) data_attributes: Option<AttributeSpec>,
    pub(crate) y_attributes: Option<AttributeSpec>,
    pub(crate) categories: Option<AxisSpec<Vec<DataValue>>>,
    pub(crate) tick_values: Option<AxisSpec<Vec<f64>>>,
    pub(crate) domain: Option<AxisSpec<Extent>>,
    pub(crate) range: Option<AxisSpec<Extent>>,
    pub(crate) scale: AxisScales,
    pub(crate) samples: Option<usize>,
    pub(crate) interpolation: Interpolation,
    pub(crate) stacked: bool,
    pub(crate) domain_padding: Option<AxisSpec<f64>>,
    pub(crate) style: AreaStyle,
    pub(crate) container: ContainerElement,
    pub(crate) area_type: String,
}

impl Default for AreaChart {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaChart {
    /// Create a chart with default settings: `y = x` over 50 samples.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: None,
            x: None,
            y: None,
            data_attributes: None,
            y_attributes: None,
            categories: None,
            tick_values: None,
            domain: None,
            range: None,
            scale: AxisScales::default(),
            samples: None,
            interpolation: Interpolation::default(),
            stacked: false,
            domain_padding: None,
            style: AreaStyle::default(),
            container: ContainerElement::default(),
            area_type: "area".to_string(),
        }
    }

    /// Set explicit data points.
    #[must_use]
    pub fn data(mut self, data: DataInput) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the x values.
    #[must_use]
    pub fn x(mut self, x: XInput) -> Self {
        self.x = Some(x);
        self
    }

    /// Set the y values or functions.
    #[must_use]
    pub fn y(mut self, y: YInput) -> Self {
        self.y = Some(y);
        self
    }

    /// Attributes for series built from `data`.
    #[must_use]
    pub fn data_attributes(mut self, attributes: AttributeSpec) -> Self {
        self.data_attributes = Some(attributes);
        self
    }

    /// Attributes for series built from `y`.
    #[must_use]
    pub fn y_attributes(mut self, attributes: AttributeSpec) -> Self {
        self.y_attributes = Some(attributes);
        self
    }

    /// Explicit category order per axis.
    #[must_use]
    pub fn categories(mut self, categories: AxisSpec<Vec<DataValue>>) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Tick values; their extent bounds the domain when no explicit domain is set.
    #[must_use]
    pub fn tick_values(mut self, ticks: AxisSpec<Vec<f64>>) -> Self {
        self.tick_values = Some(ticks);
        self
    }

    /// Explicit domain.
    #[must_use]
    pub fn domain(mut self, domain: AxisSpec<Extent>) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Explicit pixel range.
    #[must_use]
    pub fn range(mut self, range: AxisSpec<Extent>) -> Self {
        self.range = Some(range);
        self
    }

    /// Scale prototypes; each pass binds a fresh copy.
    #[must_use]
    pub fn scale(mut self, scale: AxisScales) -> Self {
        self.scale = scale;
        self
    }

    /// Number of intervals for generated x values (0 means infer).
    #[must_use]
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Chart-wide interpolation.
    #[must_use]
    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Stack each area on the one before it.
    #[must_use]
    pub fn stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    /// Domain padding in pixels.
    #[must_use]
    pub fn domain_padding(mut self, padding: AxisSpec<f64>) -> Self {
        self.domain_padding = Some(padding);
        self
    }

    /// Visual style.
    #[must_use]
    pub fn style(mut self, style: AreaStyle) -> Self {
        self.style = style;
        self
    }

    /// Wrapping element.
    #[must_use]
    pub fn container(mut self, container: ContainerElement) -> Self {
        self.container = container;
        self
    }

    /// Default series type.
    #[must_use]
    pub fn area_type(mut self, area_type: impl Into<String>) -> Self {
        self.area_type = area_type.into();
        self
    }

    /// Whether areas are stacked.
    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.stacked
    }

    /// Current style.
    #[must_use]
    pub fn style_ref(&self) -> &AreaStyle {
        &self.style
    }

    /// Build and validate the chart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for non-positive dimensions, a negative
    /// margin, an opacity outside `[0, 1]`, or non-finite domains, ranges,
    /// ticks or padding.
    pub fn build(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Checks shared by [`AreaChart::build`] and every pipeline pass.
    pub(crate) fn validate(&self) -> Result<()> {
        let style = &self.style;
        if !(style.width.is_finite() && style.width > 0.0)
            || !(style.height.is_finite() && style.height > 0.0)
        {
            return Err(Error::InvalidInput(format!(
                "dimensions must be positive, got {}x{}",
                style.width, style.height
            )));
        }
        if !(style.margin.is_finite() && style.margin >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "margin must be non-negative, got {}",
                style.margin
            )));
        }
        if !(0.0..=1.0).contains(&style.opacity) {
            return Err(Error::InvalidInput(format!(
                "opacity must be within [0, 1], got {}",
                style.opacity
            )));
        }
        check_extents("domain", self.domain.as_ref())?;
        check_extents("range", self.range.as_ref())?;
        if let Some(ticks) = &self.tick_values {
            for axis in Axis::BOTH {
                if ticks.get(axis).is_some_and(|t| t.iter().any(|v| !v.is_finite())) {
                    return Err(Error::InvalidInput(format!(
                        "{axis} tick values must be finite"
                    )));
                }
            }
        }
        if let Some(padding) = &self.domain_padding {
            for axis in Axis::BOTH {
                if padding.get(axis).is_some_and(|p| !p.is_finite()) {
                    return Err(Error::InvalidInput(format!(
                        "{axis} domain padding must be finite"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Run the pipeline and return the computed geometry.
    ///
    /// The chart is validated first, so calling [`AreaChart::build`]
    /// beforehand is optional.
    ///
    /// # Errors
    ///
    /// See [`pipeline::compute`].
    pub fn geometry(&self) -> Result<AreaGeometry> {
        pipeline::compute(self)
    }

    /// Compute the geometry and render it as SVG markup.
    ///
    /// # Errors
    ///
    /// See [`pipeline::compute`].
    pub fn to_svg(&self) -> Result<String> {
        Ok(SvgEncoder::from_geometry(&self.geometry()?).render())
    }
}

fn check_extents(name: &str, extents: Option<&AxisSpec<Extent>>) -> Result<()> {
    let Some(extents) = extents else {
        return Ok(());
    };
    for axis in Axis::BOTH {
        if let Some(&(a, b)) = extents.get(axis) {
            if !a.is_finite() || !b.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "{axis} {name} must be finite, got [{a}, {b}]"
                )));
            }
        }
    }
    Ok(())
}

impl batuta_common::display::WithDimensions for AreaChart {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.style.width = f64::from(width);
        self.style.height = f64::from(height);
    }
}
