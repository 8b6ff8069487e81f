//! Domain and range calculation.
//!
//! Domains are resolved by walking an ordered chain of named resolvers. Each
//! resolver either has no opinion (`None`) or produces a domain, and the
//! first opinion wins. Keeping the precedence as data makes it easy to audit
//! and to test each resolver on its own.

use crate::data::{extent, Axis, Series, YElement, YInput};
use crate::error::{Error, Result};
use crate::pipeline::string_map::StringMaps;
use crate::plots::AreaChart;
use crate::scale::{Extent, IntrinsicDomain};
use std::fmt;

/// Sample count used when none is given or inferable.
pub const DEFAULT_SAMPLES: usize = 50;

/// Where a domain came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainSource {
    /// The `domain` prop.
    Explicit,
    /// The extent of the tick values.
    Ticks,
    /// The raw `data` prop (x-sample generation only).
    DataProp,
    /// The consolidated series.
    Data,
    /// The intrinsic domain of the axis scale.
    Scale,
}

/// A domain and its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDomain {
    /// Domain endpoints.
    pub extent: Extent,
    /// Which resolver produced it.
    pub source: DomainSource,
    /// True when the endpoints are timestamps.
    pub temporal: bool,
}

impl ResolvedDomain {
    fn new(extent: Extent, source: DomainSource) -> Self {
        Self {
            extent,
            source,
            temporal: false,
        }
    }
}

/// Non-fatal problems found while inferring domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainWarning {
    /// The domain came from a time scale's default interval.
    TimeScale(Axis),
    /// The domain came from an ordinal or quantile scale with no values.
    EmptyScaleDomain(Axis),
    /// The domain came from a threshold scale with a single threshold.
    SingleValueScaleDomain(Axis),
}

impl fmt::Display for DomainWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainWarning::TimeScale(axis) => write!(
                f,
                "{axis} axis: please specify a domain or data when using time scales"
            ),
            DomainWarning::EmptyScaleDomain(axis) => write!(
                f,
                "{axis} axis: please specify a domain or data when using ordinal or quantile scales"
            ),
            DomainWarning::SingleValueScaleDomain(axis) => write!(
                f,
                "{axis} axis: please specify a domain or data when using a threshold scale"
            ),
        }
    }
}

/// Inputs visible to domain resolvers.
#[derive(Debug, Clone, Copy)]
pub struct DomainContext<'a> {
    /// Chart props.
    pub chart: &'a AreaChart,
    /// String maps of both axes.
    pub maps: &'a StringMaps,
    /// Consolidated series (empty while x-samples are being generated).
    pub series: &'a [Series],
}

/// A named step in a resolver chain.
pub type Resolver =
    fn(&DomainContext<'_>, Axis, &mut Vec<DomainWarning>) -> Result<Option<ResolvedDomain>>;

/// Precedence used to pick the interval x-samples are spread over.
pub const SAMPLE_DOMAIN_CHAIN: &[(&str, Resolver)] = &[
    ("explicit", explicit_domain),
    ("ticks", tick_domain),
    ("data-prop", data_prop_domain),
    ("scale", scale_domain),
];

/// Precedence used for the final axis domains.
pub const AXIS_DOMAIN_CHAIN: &[(&str, Resolver)] = &[
    ("explicit", explicit_domain),
    ("ticks", tick_domain),
    ("data", series_domain),
    ("scale", scale_domain),
];

/// Record a warning once and log it.
fn warn(warnings: &mut Vec<DomainWarning>, warning: DomainWarning) {
    if !warnings.contains(&warning) {
        tracing::warn!("{warning}");
        warnings.push(warning);
    }
}

/// Walk `chain` and return the first domain any resolver produces.
///
/// # Errors
///
/// Propagates resolver errors, and returns [`Error::InvalidInput`] if no
/// resolver has an opinion.
pub fn resolve_domain(
    chain: &[(&str, Resolver)],
    ctx: &DomainContext<'_>,
    axis: Axis,
    warnings: &mut Vec<DomainWarning>,
) -> Result<ResolvedDomain> {
    for (name, resolver) in chain {
        if let Some(domain) = resolver(ctx, axis, warnings)? {
            tracing::debug!(%axis, resolver = *name, extent = ?domain.extent, "resolved domain");
            return Ok(domain);
        }
    }
    Err(Error::InvalidInput(format!(
        "no domain could be inferred for the {axis} axis"
    )))
}

/// The `domain` prop.
pub fn explicit_domain(
    ctx: &DomainContext<'_>,
    axis: Axis,
    _warnings: &mut Vec<DomainWarning>,
) -> Result<Option<ResolvedDomain>> {
    Ok(ctx
        .chart
        .domain
        .as_ref()
        .and_then(|d| d.get(axis))
        .map(|&extent| ResolvedDomain::new(extent, DomainSource::Explicit)))
}

/// Extent of the tick values.
pub fn tick_domain(
    ctx: &DomainContext<'_>,
    axis: Axis,
    _warnings: &mut Vec<DomainWarning>,
) -> Result<Option<ResolvedDomain>> {
    Ok(ctx
        .chart
        .tick_values
        .as_ref()
        .and_then(|t| t.get(axis))
        .and_then(|ticks| extent(ticks.iter().copied()))
        .map(|extent| ResolvedDomain::new(extent, DomainSource::Ticks)))
}

/// Extent of the raw `data` points, using the string map when they are categorical.
pub fn data_prop_domain(
    ctx: &DomainContext<'_>,
    axis: Axis,
    _warnings: &mut Vec<DomainWarning>,
) -> Result<Option<ResolvedDomain>> {
    let Some(data) = &ctx.chart.data else {
        return Ok(None);
    };
    let categorical = data.points().any(|d| d.get(axis).as_str().is_some());
    let domain = match ctx.maps.get(axis) {
        Some(map) if categorical => Some(map.extent()),
        _ => extent(data.points().filter_map(|d| d.get(axis).as_f64())),
    };
    Ok(domain.map(|extent| ResolvedDomain::new(extent, DomainSource::DataProp)))
}

/// Extent of the consolidated series.
///
/// Categorical axes span the string map indices. With stacking, the y
/// maximum grows to the sum of every series' own y extent.
pub fn series_domain(
    ctx: &DomainContext<'_>,
    axis: Axis,
    _warnings: &mut Vec<DomainWarning>,
) -> Result<Option<ResolvedDomain>> {
    if let Some(map) = ctx.maps.get(axis) {
        return Ok(Some(ResolvedDomain::new(map.extent(), DomainSource::Data)));
    }
    let Some((min, max)) = extent(
        ctx.series
            .iter()
            .flat_map(|s| s.data.iter().map(move |p| p.get(axis))),
    ) else {
        return Ok(None);
    };
    let max = if ctx.chart.stacked && axis == Axis::Y {
        max.max(stacked_extent(ctx.series, axis))
    } else {
        max
    };
    Ok(Some(ResolvedDomain::new((min, max), DomainSource::Data)))
}

/// Intrinsic domain of the axis scale, with warnings for scale types that
/// make poor defaults.
///
/// # Errors
///
/// An empty intrinsic domain has no numbers to offer and is reported as
/// [`Error::InvalidInput`] after the warning is recorded.
pub fn scale_domain(
    ctx: &DomainContext<'_>,
    axis: Axis,
    warnings: &mut Vec<DomainWarning>,
) -> Result<Option<ResolvedDomain>> {
    let domain = match ctx.chart.scale.get(axis).intrinsic_domain() {
        IntrinsicDomain::Continuous(a, b) => ResolvedDomain::new((a, b), DomainSource::Scale),
        IntrinsicDomain::Temporal(a, b) => {
            warn(warnings, DomainWarning::TimeScale(axis));
            ResolvedDomain {
                extent: (a, b),
                source: DomainSource::Scale,
                temporal: true,
            }
        }
        IntrinsicDomain::Discrete(values) => match values.as_slice() {
            [] => {
                warn(warnings, DomainWarning::EmptyScaleDomain(axis));
                return Err(Error::InvalidInput(format!(
                    "the {axis} scale has an empty domain; supply a domain or data"
                )));
            }
            [only] => {
                warn(warnings, DomainWarning::SingleValueScaleDomain(axis));
                ResolvedDomain::new((*only, *only), DomainSource::Scale)
            }
            _ => {
                let extent = extent(values.iter().copied()).unwrap_or((0.0, 1.0));
                ResolvedDomain::new(extent, DomainSource::Scale)
            }
        },
    };
    Ok(Some(domain))
}

/// Sum of every series' own extent along `axis`.
#[must_use]
pub fn stacked_extent(series: &[Series], axis: Axis) -> f64 {
    series
        .iter()
        .filter_map(|s| s.extent(axis))
        .map(|(min, max)| max - min)
        .sum()
}

/// Expand an inferred domain by `padding` pixels' worth on each side.
///
/// Explicit, categorical and temporal domains are returned unchanged, as
/// is any domain when padding is absent or zero. A bound sitting exactly at
/// zero never moves.
#[must_use]
pub fn pad_domain(
    domain: ResolvedDomain,
    padding: Option<f64>,
    range: Extent,
    categorical: bool,
) -> Extent {
    let padding = padding.unwrap_or(0.0);
    if domain.source == DomainSource::Explicit || categorical || domain.temporal || padding == 0.0
    {
        return domain.extent;
    }
    let (min, max) = (
        domain.extent.0.min(domain.extent.1),
        domain.extent.0.max(domain.extent.1),
    );
    let range_extent = (range.1 - range.0).abs();
    if range_extent == 0.0 {
        return (min, max);
    }
    let pad = (max - min).abs() * (padding / range_extent);
    let padded_min = if min == 0.0 { min } else { min - pad };
    let padded_max = if max == 0.0 { max } else { max + pad };
    (padded_min, padded_max)
}

/// The pixel range of an axis: the `range` prop, else derived from the style.
///
/// The y range is inverted because screen y grows downwards.
#[must_use]
pub fn resolve_range(chart: &AreaChart, axis: Axis) -> Extent {
    if let Some(&range) = chart.range.as_ref().and_then(|r| r.get(axis)) {
        return range;
    }
    let style = &chart.style;
    match axis {
        Axis::X => (style.margin, style.width - style.margin),
        Axis::Y => (style.height - style.margin, style.margin),
    }
}

/// Number of intervals x-samples are split into.
///
/// The `samples` prop wins; otherwise the length of the y values is used,
/// with [`DEFAULT_SAMPLES`] when that is one or fewer.
#[must_use]
pub fn sample_count(chart: &AreaChart) -> usize {
    if let Some(samples) = chart.samples.filter(|&s| s > 0) {
        return samples;
    }
    let inferred = match &chart.y {
        Some(YInput::Fixed(values)) => values.len(),
        Some(YInput::Mixed(elements)) => elements
            .iter()
            .map(|e| match e {
                YElement::Values(values) => values.len(),
                YElement::Function(_) => 0,
            })
            .max()
            .unwrap_or(0),
        Some(YInput::Function(_)) | None => 0,
    };
    if inferred > 1 {
        inferred
    } else {
        DEFAULT_SAMPLES
    }
}

/// `samples + 1` evenly spaced values from the domain minimum to its maximum.
#[must_use]
pub fn generate_x_samples(domain: Extent, samples: usize) -> Vec<f64> {
    let (min, max) = (domain.0.min(domain.1), domain.0.max(domain.1));
    if min == max || samples == 0 {
        return vec![min];
    }
    let step = (max - min) / samples as f64;
    (0..=samples)
        .map(|i| if i == samples { max } else { min + step * i as f64 })
        .collect()
}

/// Resolve the sampling domain and generate x-samples.
///
/// # Errors
///
/// Returns an error if no sampling domain can be inferred.
pub fn x_samples(
    chart: &AreaChart,
    maps: &StringMaps,
    warnings: &mut Vec<DomainWarning>,
) -> Result<Vec<f64>> {
    let ctx = DomainContext {
        chart,
        maps,
        series: &[],
    };
    let domain = resolve_domain(SAMPLE_DOMAIN_CHAIN, &ctx, Axis::X, warnings)?;
    Ok(generate_x_samples(domain.extent, sample_count(chart)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AreaStyle;
    use crate::data::{
        values, AttributeSpec, AxisPair, AxisSpec, DataInput, DataPoint, Datum, YInput,
    };
    use crate::pipeline::string_map::create_string_maps;
    use crate::scale::{AxisScales, LinearScale, OrdinalScale, ThresholdScale, TimeScale};
    use approx::assert_relative_eq;

    fn series(points: &[(f64, f64)]) -> Series {
        Series {
            attrs: AttributeSpec::resolve(None, 0, "area"),
            data: points.iter().map(|&(x, y)| DataPoint::new(x, y)).collect(),
        }
    }

    fn no_maps() -> StringMaps {
        AxisPair { x: None, y: None }
    }

    fn resolve(
        chart: &AreaChart,
        series: &[Series],
        axis: Axis,
    ) -> (ResolvedDomain, Vec<DomainWarning>) {
        let maps = create_string_maps(chart);
        let ctx = DomainContext {
            chart,
            maps: &maps,
            series,
        };
        let mut warnings = Vec::new();
        let domain = resolve_domain(AXIS_DOMAIN_CHAIN, &ctx, axis, &mut warnings).unwrap();
        (domain, warnings)
    }

    #[test]
    fn test_range_from_style() {
        let style = AreaStyle {
            width: 500.0,
            height: 300.0,
            margin: 20.0,
            ..AreaStyle::default()
        };
        let chart = AreaChart::new().style(style);
        assert_eq!(resolve_range(&chart, Axis::X), (20.0, 480.0));
        assert_eq!(resolve_range(&chart, Axis::Y), (280.0, 20.0));
    }

    #[test]
    fn test_explicit_range_wins_per_axis() {
        let chart = AreaChart::new().range(AxisSpec::only(Axis::Y, (0.0, 100.0)));
        assert_eq!(resolve_range(&chart, Axis::Y), (0.0, 100.0));
        assert_eq!(resolve_range(&chart, Axis::X), (20.0, 480.0));
    }

    #[test]
    fn test_explicit_beats_ticks_beats_data() {
        let data = [series(&[(0.0, 0.0), (10.0, 5.0)])];
        let chart = AreaChart::new()
            .tick_values(AxisSpec::Shared(vec![2.0, 8.0, 4.0]))
            .domain(AxisSpec::only(Axis::X, (-1.0, 1.0)));
        let (x, _) = resolve(&chart, &data, Axis::X);
        assert_eq!(x.extent, (-1.0, 1.0));
        assert_eq!(x.source, DomainSource::Explicit);
        let (y, _) = resolve(&chart, &data, Axis::Y);
        assert_eq!(y.extent, (2.0, 8.0));
        assert_eq!(y.source, DomainSource::Ticks);
    }

    #[test]
    fn test_data_domain_unstacked_is_global_extent() {
        let data = [series(&[(0.0, 0.0), (1.0, 4.0)]), series(&[(0.0, 1.0), (1.0, 3.0)])];
        let (y, _) = resolve(&AreaChart::new(), &data, Axis::Y);
        assert_eq!(y.extent, (0.0, 4.0));
        assert_eq!(y.source, DomainSource::Data);
    }

    #[test]
    fn test_data_domain_stacked_sums_extents() {
        let data = [
            series(&[(0.0, 0.0), (1.0, 5.0)]),
            series(&[(0.0, 0.0), (1.0, 5.0)]),
            series(&[(0.0, 0.0), (1.0, 5.0)]),
        ];
        let chart = AreaChart::new().stacked(true);
        let (y, _) = resolve(&chart, &data, Axis::Y);
        assert_eq!(y.extent, (0.0, 15.0));
        let (x, _) = resolve(&chart, &data, Axis::X);
        assert_eq!(x.extent, (0.0, 1.0));
    }

    #[test]
    fn test_categorical_domain_uses_map_indices() {
        let chart = AreaChart::new().data(DataInput::Single(vec![
            Datum::new("b", 1.0),
            Datum::new("a", 2.0),
            Datum::new("c", 3.0),
        ]));
        let (x, _) = resolve(&chart, &[], Axis::X);
        assert_eq!(x.extent, (1.0, 3.0));
    }

    #[test]
    fn test_scale_fallback_linear() {
        let (x, warnings) = resolve(&AreaChart::new(), &[], Axis::X);
        assert_eq!(x.extent, (0.0, 1.0));
        assert_eq!(x.source, DomainSource::Scale);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_time_scale_warns_once() {
        let chart = AreaChart::new()
            .scale(AxisScales::new(TimeScale::default(), LinearScale::default()));
        let maps = no_maps();
        let ctx = DomainContext {
            chart: &chart,
            maps: &maps,
            series: &[],
        };
        let mut warnings = Vec::new();
        let first = resolve_domain(AXIS_DOMAIN_CHAIN, &ctx, Axis::X, &mut warnings).unwrap();
        resolve_domain(SAMPLE_DOMAIN_CHAIN, &ctx, Axis::X, &mut warnings).unwrap();
        assert!(first.temporal);
        assert_eq!(warnings, vec![DomainWarning::TimeScale(Axis::X)]);
    }

    #[test]
    fn test_threshold_scale_warns_and_degenerates() {
        let chart = AreaChart::new().scale(AxisScales::shared(ThresholdScale::default()));
        let (y, warnings) = resolve(&chart, &[], Axis::Y);
        assert_eq!(y.extent, (0.5, 0.5));
        assert_eq!(warnings, vec![DomainWarning::SingleValueScaleDomain(Axis::Y)]);
    }

    #[test]
    fn test_empty_ordinal_scale_warns_then_fails() {
        let chart = AreaChart::new().scale(AxisScales::shared(OrdinalScale::default()));
        let maps = no_maps();
        let ctx = DomainContext {
            chart: &chart,
            maps: &maps,
            series: &[],
        };
        let mut warnings = Vec::new();
        let result = resolve_domain(AXIS_DOMAIN_CHAIN, &ctx, Axis::X, &mut warnings);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(warnings, vec![DomainWarning::EmptyScaleDomain(Axis::X)]);
        assert!(warnings[0].to_string().contains("ordinal"));
    }

    #[test]
    fn test_padding_zero_or_absent_is_identity() {
        let domain = ResolvedDomain::new((1.0, 9.0), DomainSource::Data);
        assert_eq!(pad_domain(domain, None, (20.0, 480.0), false), (1.0, 9.0));
        assert_eq!(pad_domain(domain, Some(0.0), (20.0, 480.0), false), (1.0, 9.0));
    }

    #[test]
    fn test_padding_expands_both_sides() {
        let domain = ResolvedDomain::new((10.0, 20.0), DomainSource::Data);
        let (min, max) = pad_domain(domain, Some(50.0), (0.0, 100.0), false);
        assert_relative_eq!(min, 5.0);
        assert_relative_eq!(max, 25.0);
    }

    #[test]
    fn test_padding_never_moves_zero() {
        let domain = ResolvedDomain::new((0.0, 10.0), DomainSource::Data);
        let (min, max) = pad_domain(domain, Some(10.0), (0.0, 100.0), false);
        assert_eq!(min, 0.0);
        assert_relative_eq!(max, 11.0);
    }

    #[test]
    fn test_padding_skips_explicit_and_categorical() {
        let explicit = ResolvedDomain::new((1.0, 2.0), DomainSource::Explicit);
        assert_eq!(pad_domain(explicit, Some(10.0), (0.0, 100.0), false), (1.0, 2.0));
        let data = ResolvedDomain::new((1.0, 3.0), DomainSource::Data);
        assert_eq!(pad_domain(data, Some(10.0), (0.0, 100.0), true), (1.0, 3.0));
    }

    #[test]
    fn test_sample_count_rules() {
        assert_eq!(sample_count(&AreaChart::new()), DEFAULT_SAMPLES);
        assert_eq!(sample_count(&AreaChart::new().samples(10)), 10);
        assert_eq!(sample_count(&AreaChart::new().y(YInput::fixed(&[1.0, 2.0, 3.0]))), 3);
        assert_eq!(sample_count(&AreaChart::new().y(YInput::fixed(&[1.0]))), DEFAULT_SAMPLES);
        assert_eq!(sample_count(&AreaChart::new().y(YInput::function(|x| x))), DEFAULT_SAMPLES);
    }

    #[test]
    fn test_generate_x_samples_inclusive() {
        let samples = generate_x_samples((0.0, 1.0), 50);
        assert_eq!(samples.len(), 51);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[50], 1.0);
        assert_relative_eq!(samples[25], 0.5);
    }

    #[test]
    fn test_generate_x_samples_degenerate() {
        assert_eq!(generate_x_samples((3.0, 3.0), 50), vec![3.0]);
    }

    #[test]
    fn test_x_samples_prefer_data_prop() {
        let chart = AreaChart::new()
            .data(DataInput::Single(vec![Datum::new(2.0, 0.0), Datum::new(4.0, 1.0)]))
            .y(YInput::function(|x| x))
            .samples(4);
        let maps = create_string_maps(&chart);
        let mut warnings = Vec::new();
        let samples = x_samples(&chart, &maps, &mut warnings).unwrap();
        assert_eq!(samples, vec![2.0, 2.5, 3.0, 3.5, 4.0]);
    }

    #[test]
    fn test_x_samples_from_categorical_data_prop() {
        let chart = AreaChart::new()
            .data(DataInput::Single(vec![Datum::new("a", 0.0), Datum::new("c", 1.0)]))
            .x(crate::data::XInput::Values(values(&["b"])))
            .samples(2);
        let maps = create_string_maps(&chart);
        let mut warnings = Vec::new();
        assert_eq!(x_samples(&chart, &maps, &mut warnings).unwrap(), vec![1.0, 2.0, 3.0]);
    }
}

// ============================================================================
// Property-based tests with proptest
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Samples cover the domain inclusively, in ascending order.
        #[test]
        fn prop_samples_span_domain(
            a in -1e6f64..1e6,
            width in 1e-3f64..1e6,
            samples in 1usize..500
        ) {
            let xs = generate_x_samples((a, a + width), samples);
            prop_assert_eq!(xs.len(), samples + 1);
            prop_assert_eq!(xs[0], a);
            prop_assert_eq!(xs[samples], a + width);
            prop_assert!(xs.windows(2).all(|w| w[0] <= w[1]));
        }

        /// Without padding a data domain is returned unchanged.
        #[test]
        fn prop_zero_padding_is_identity(min in -1e6f64..1e6, width in 0f64..1e6) {
            let domain = ResolvedDomain::new((min, min + width), DomainSource::Data);
            prop_assert_eq!(pad_domain(domain, Some(0.0), (20.0, 480.0), false), domain.extent);
            prop_assert_eq!(pad_domain(domain, None, (20.0, 480.0), false), domain.extent);
        }

        /// Padding never shrinks a domain.
        #[test]
        fn prop_padding_contains_domain(
            min in -1e6f64..1e6,
            width in 0f64..1e6,
            padding in 0f64..200.0
        ) {
            let domain = ResolvedDomain::new((min, min + width), DomainSource::Data);
            let (lo, hi) = pad_domain(domain, Some(padding), (0.0, 400.0), false);
            prop_assert!(lo <= min);
            prop_assert!(hi >= min + width);
        }
    }
}
