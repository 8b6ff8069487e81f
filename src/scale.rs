//! Scale functions for data-to-pixel mappings.
//!
//! Scales are pluggable: the chart holds a prototype per axis and binds an
//! independent copy of it to the computed domain and range on every pass
//! (see [`bind_scale`]). Any type implementing [`Scale`] can be used.

use crate::data::Axis;
use crate::error::{Error, Result};
use std::fmt;

/// Domain (data space) or range (pixel space) endpoints.
pub type Extent = (f64, f64);

/// The domain a scale reports before the chart has bound one.
///
/// Used as the last fallback when inferring a domain, so the variants carry
/// enough information to warn about scale types that make poor defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum IntrinsicDomain {
    /// A continuous numeric interval.
    Continuous(f64, f64),
    /// A time interval in epoch milliseconds.
    Temporal(f64, f64),
    /// Discrete domain values (ordinal, quantile and threshold scales).
    Discrete(Vec<f64>),
}

/// A mapping from domain values to range values.
pub trait Scale: fmt::Debug + Send + Sync {
    /// Short name of the scale type.
    fn kind(&self) -> &'static str;

    /// The domain this scale carries in its current configuration.
    fn intrinsic_domain(&self) -> IntrinsicDomain;

    /// Current domain endpoints.
    fn domain(&self) -> Extent;

    /// Current range endpoints.
    fn range(&self) -> Extent;

    /// Set the domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if the scale cannot represent the domain.
    fn set_domain(&mut self, domain: Extent) -> Result<()>;

    /// Set the range.
    fn set_range(&mut self, range: Extent);

    /// Transform a domain value to a range value.
    fn scale(&self, value: f64) -> f64;

    /// Transform a range value back to a domain value.
    ///
    /// Discrete scales have no inverse and return NaN.
    fn invert(&self, _value: f64) -> f64 {
        f64::NAN
    }

    /// Independent copy of this scale.
    fn box_clone(&self) -> Box<dyn Scale>;
}

impl Clone for Box<dyn Scale> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Normalized position of `value` between `a` and `b`; 0 for a degenerate interval.
fn normalize(value: f64, a: f64, b: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        0.0
    } else {
        (value - a) / span
    }
}

fn lerp(range: Extent, t: f64) -> f64 {
    range.0 + t * (range.1 - range.0)
}

// ============================================================================
// Continuous scales
// ============================================================================

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain: Extent,
    range: Extent,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

impl LinearScale {
    /// Create a new linear scale.
    #[must_use]
    pub const fn new(domain: Extent, range: Extent) -> Self {
        Self { domain, range }
    }
}

impl Scale for LinearScale {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn intrinsic_domain(&self) -> IntrinsicDomain {
        IntrinsicDomain::Continuous(self.domain.0, self.domain.1)
    }

    fn domain(&self) -> Extent {
        self.domain
    }

    fn range(&self) -> Extent {
        self.range
    }

    fn set_domain(&mut self, domain: Extent) -> Result<()> {
        self.domain = domain;
        Ok(())
    }

    fn set_range(&mut self, range: Extent) {
        self.range = range;
    }

    fn scale(&self, value: f64) -> f64 {
        lerp(self.range, normalize(value, self.domain.0, self.domain.1))
    }

    fn invert(&self, value: f64) -> f64 {
        lerp(self.domain, normalize(value, self.range.0, self.range.1))
    }

    fn box_clone(&self) -> Box<dyn Scale> {
        Box::new(*self)
    }
}

/// Logarithmic scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LogScale {
    domain: Extent,
    range: Extent,
    base: f64,
}

impl Default for LogScale {
    fn default() -> Self {
        Self {
            domain: (1.0, 10.0),
            range: (0.0, 1.0),
            base: 10.0,
        }
    }
}

impl LogScale {
    /// Create a new logarithmic scale with base 10.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain contains non-positive values.
    pub fn new(domain: Extent, range: Extent) -> Result<Self> {
        Self::with_base(domain, range, 10.0)
    }

    /// Create a logarithmic scale with a custom base.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain contains non-positive values or base is invalid.
    pub fn with_base(domain: Extent, range: Extent, base: f64) -> Result<Self> {
        if base <= 0.0 || base == 1.0 {
            return Err(Error::ScaleDomain(
                "Log scale base must be positive and not 1".to_string(),
            ));
        }
        let mut scale = Self {
            domain: (1.0, 10.0),
            range,
            base,
        };
        scale.set_domain(domain)?;
        Ok(scale)
    }

    /// NaN for non-positive values, which have no logarithm.
    fn log(&self, value: f64) -> f64 {
        if value <= 0.0 {
            return f64::NAN;
        }
        value.ln() / self.base.ln()
    }
}

impl Scale for LogScale {
    fn kind(&self) -> &'static str {
        "log"
    }

    fn intrinsic_domain(&self) -> IntrinsicDomain {
        IntrinsicDomain::Continuous(self.domain.0, self.domain.1)
    }

    fn domain(&self) -> Extent {
        self.domain
    }

    fn range(&self) -> Extent {
        self.range
    }

    fn set_domain(&mut self, domain: Extent) -> Result<()> {
        if domain.0 <= 0.0 || domain.1 <= 0.0 {
            return Err(Error::ScaleDomain(format!(
                "Log scale domain must be positive, got [{}, {}]",
                domain.0, domain.1
            )));
        }
        self.domain = domain;
        Ok(())
    }

    fn set_range(&mut self, range: Extent) {
        self.range = range;
    }

    fn scale(&self, value: f64) -> f64 {
        let t = normalize(
            self.log(value),
            self.log(self.domain.0),
            self.log(self.domain.1),
        );
        lerp(self.range, t)
    }

    fn invert(&self, value: f64) -> f64 {
        let t = normalize(value, self.range.0, self.range.1);
        let exponent = lerp((self.log(self.domain.0), self.log(self.domain.1)), t);
        self.base.powf(exponent)
    }

    fn box_clone(&self) -> Box<dyn Scale> {
        Box::new(*self)
    }
}

/// Power scale: `sign(v) * |v|^exponent`, mapped linearly.
#[derive(Debug, Clone, Copy)]
pub struct PowScale {
    domain: Extent,
    range: Extent,
    exponent: f64,
}

impl PowScale {
    /// Create a power scale over `[0, 1] -> [0, 1]`.
    #[must_use]
    pub const fn new(exponent: f64) -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            exponent,
        }
    }

    /// Square-root scale.
    #[must_use]
    pub const fn sqrt() -> Self {
        Self::new(0.5)
    }

    fn pow(&self, value: f64) -> f64 {
        value.signum() * value.abs().powf(self.exponent)
    }
}

impl Scale for PowScale {
    fn kind(&self) -> &'static str {
        "pow"
    }

    fn intrinsic_domain(&self) -> IntrinsicDomain {
        IntrinsicDomain::Continuous(self.domain.0, self.domain.1)
    }

    fn domain(&self) -> Extent {
        self.domain
    }

    fn range(&self) -> Extent {
        self.range
    }

    fn set_domain(&mut self, domain: Extent) -> Result<()> {
        self.domain = domain;
        Ok(())
    }

    fn set_range(&mut self, range: Extent) {
        self.range = range;
    }

    fn scale(&self, value: f64) -> f64 {
        let t = normalize(
            self.pow(value),
            self.pow(self.domain.0),
            self.pow(self.domain.1),
        );
        lerp(self.range, t)
    }

    fn invert(&self, value: f64) -> f64 {
        let t = normalize(value, self.range.0, self.range.1);
        let raised = lerp((self.pow(self.domain.0), self.pow(self.domain.1)), t);
        raised.signum() * raised.abs().powf(self.exponent.recip())
    }

    fn box_clone(&self) -> Box<dyn Scale> {
        Box::new(*self)
    }
}

/// Time scale over epoch milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct TimeScale {
    inner: LinearScale,
}

impl Default for TimeScale {
    fn default() -> Self {
        // 2000-01-01T00:00:00Z .. 2000-01-02T00:00:00Z
        Self {
            inner: LinearScale::new((946_684_800_000.0, 946_771_200_000.0), (0.0, 1.0)),
        }
    }
}

impl Scale for TimeScale {
    fn kind(&self) -> &'static str {
        "time"
    }

    fn intrinsic_domain(&self) -> IntrinsicDomain {
        let (start, end) = self.inner.domain();
        IntrinsicDomain::Temporal(start, end)
    }

    fn domain(&self) -> Extent {
        self.inner.domain()
    }

    fn range(&self) -> Extent {
        self.inner.range()
    }

    fn set_domain(&mut self, domain: Extent) -> Result<()> {
        self.inner.set_domain(domain)
    }

    fn set_range(&mut self, range: Extent) {
        self.inner.set_range(range);
    }

    fn scale(&self, value: f64) -> f64 {
        self.inner.scale(value)
    }

    fn invert(&self, value: f64) -> f64 {
        self.inner.invert(value)
    }

    fn box_clone(&self) -> Box<dyn Scale> {
        Box::new(*self)
    }
}

// ============================================================================
// Identity and discrete scales
// ============================================================================

/// Identity scale: domain and range are the same interval.
#[derive(Debug, Clone, Copy)]
pub struct IdentityScale {
    extent: Extent,
}

impl Default for IdentityScale {
    fn default() -> Self {
        Self { extent: (0.0, 1.0) }
    }
}

impl Scale for IdentityScale {
    fn kind(&self) -> &'static str {
        "identity"
    }

    fn intrinsic_domain(&self) -> IntrinsicDomain {
        IntrinsicDomain::Continuous(self.extent.0, self.extent.1)
    }

    fn domain(&self) -> Extent {
        self.extent
    }

    fn range(&self) -> Extent {
        self.extent
    }

    fn set_domain(&mut self, domain: Extent) -> Result<()> {
        self.extent = domain;
        Ok(())
    }

    fn set_range(&mut self, range: Extent) {
        self.extent = range;
    }

    fn scale(&self, value: f64) -> f64 {
        value
    }

    fn invert(&self, value: f64) -> f64 {
        value
    }

    fn box_clone(&self) -> Box<dyn Scale> {
        Box::new(*self)
    }
}

/// Largest integer span expanded into individual ordinal points.
const MAX_ORDINAL_POINTS: f64 = 10_000.0;

/// Ordinal point scale: known domain values are spread evenly across the range.
///
/// Values outside the domain map to NaN.
#[derive(Debug, Clone, Default)]
pub struct OrdinalScale {
    values: Vec<f64>,
    range: Extent,
}

impl OrdinalScale {
    /// Create an ordinal scale with explicit domain values.
    #[must_use]
    pub fn with_values(values: Vec<f64>) -> Self {
        Self {
            values,
            range: (0.0, 1.0),
        }
    }
}

impl Scale for OrdinalScale {
    fn kind(&self) -> &'static str {
        "ordinal"
    }

    fn intrinsic_domain(&self) -> IntrinsicDomain {
        IntrinsicDomain::Discrete(self.values.clone())
    }

    fn domain(&self) -> Extent {
        match (self.values.first(), self.values.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (f64::NAN, f64::NAN),
        }
    }

    fn range(&self) -> Extent {
        self.range
    }

    /// Integral endpoints (category indices) expand to every integer between them.
    fn set_domain(&mut self, domain: Extent) -> Result<()> {
        let (lo, hi) = (domain.0.min(domain.1), domain.0.max(domain.1));
        self.values = if lo.fract() == 0.0 && hi.fract() == 0.0 && hi - lo <= MAX_ORDINAL_POINTS {
            let count = (hi - lo) as usize;
            (0..=count).map(|i| lo + i as f64).collect()
        } else if lo == hi {
            vec![lo]
        } else {
            vec![lo, hi]
        };
        if domain.0 > domain.1 {
            self.values.reverse();
        }
        Ok(())
    }

    fn set_range(&mut self, range: Extent) {
        self.range = range;
    }

    fn scale(&self, value: f64) -> f64 {
        let Some(index) = self.values.iter().position(|&v| v == value) else {
            return f64::NAN;
        };
        if self.values.len() == 1 {
            return lerp(self.range, 0.5);
        }
        lerp(self.range, index as f64 / (self.values.len() - 1) as f64)
    }

    fn box_clone(&self) -> Box<dyn Scale> {
        Box::new(self.clone())
    }
}

/// Threshold scale: values are bucketed by thresholds and each bucket maps to
/// an evenly spaced position across the range.
#[derive(Debug, Clone)]
pub struct ThresholdScale {
    thresholds: Vec<f64>,
    range: Extent,
}

impl Default for ThresholdScale {
    fn default() -> Self {
        Self {
            thresholds: vec![0.5],
            range: (0.0, 1.0),
        }
    }
}

impl Scale for ThresholdScale {
    fn kind(&self) -> &'static str {
        "threshold"
    }

    fn intrinsic_domain(&self) -> IntrinsicDomain {
        IntrinsicDomain::Discrete(self.thresholds.clone())
    }

    fn domain(&self) -> Extent {
        match (self.thresholds.first(), self.thresholds.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (f64::NAN, f64::NAN),
        }
    }

    fn range(&self) -> Extent {
        self.range
    }

    fn set_domain(&mut self, domain: Extent) -> Result<()> {
        self.thresholds = if domain.0 == domain.1 {
            vec![domain.0]
        } else {
            vec![domain.0.min(domain.1), domain.0.max(domain.1)]
        };
        Ok(())
    }

    fn set_range(&mut self, range: Extent) {
        self.range = range;
    }

    fn scale(&self, value: f64) -> f64 {
        let bucket = self.thresholds.iter().filter(|&&t| t <= value).count();
        lerp(self.range, bucket as f64 / self.thresholds.len() as f64)
    }

    fn box_clone(&self) -> Box<dyn Scale> {
        Box::new(self.clone())
    }
}

// ============================================================================
// Scale binding
// ============================================================================

/// Per-axis scale prototypes.
#[derive(Debug, Clone)]
pub struct AxisScales {
    /// X-axis scale prototype.
    pub x: Box<dyn Scale>,
    /// Y-axis scale prototype.
    pub y: Box<dyn Scale>,
}

impl Default for AxisScales {
    fn default() -> Self {
        Self::shared(LinearScale::default())
    }
}

impl AxisScales {
    /// Separate scales for x and y.
    #[must_use]
    pub fn new(x: impl Scale + 'static, y: impl Scale + 'static) -> Self {
        Self {
            x: Box::new(x),
            y: Box::new(y),
        }
    }

    /// The same scale type for both axes.
    #[must_use]
    pub fn shared(scale: impl Scale + 'static) -> Self {
        let x: Box<dyn Scale> = Box::new(scale);
        let y = x.box_clone();
        Self { x, y }
    }

    /// Prototype for an axis.
    #[must_use]
    pub fn get(&self, axis: Axis) -> &dyn Scale {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
        }
    }
}

/// Bind an independent copy of `prototype` to `domain` and `range`.
///
/// Scales without a real domain concept (identity-like scales, where setting
/// the domain also moves the range) are re-bound with `domain = range`.
///
/// # Errors
///
/// Returns [`Error::ScaleDomain`] if the scale rejects the domain.
pub fn bind_scale(prototype: &dyn Scale, domain: Extent, range: Extent) -> Result<Box<dyn Scale>> {
    let mut scale = prototype.box_clone();
    scale.set_range(range);
    scale.set_domain(domain)?;
    if scale.range() != range {
        scale.set_range(range);
        scale.set_domain(range)?;
    }
    Ok(scale)
}
