//! Consolidation of chart inputs into uniform numeric series.
//!
//! Series generated from the `y` input come first, followed by one series
//! per `data` set. Categorical values are replaced by their string map index
//! and the label is kept on the point.

use crate::data::{
    AttributeSpec, Axis, DataPoint, DataValue, Series, SeriesFn, YElement, YInput,
};
use crate::error::{Error, Result};
use crate::pipeline::domain::{x_samples, DomainWarning};
use crate::pipeline::string_map::{StringMap, StringMaps};
use crate::plots::AreaChart;
use std::sync::Arc;

/// X values for a generated series, computed at most once per pass.
struct XSource<'a> {
    chart: &'a AreaChart,
    maps: &'a StringMaps,
    samples: Option<Vec<DataValue>>,
}

impl<'a> XSource<'a> {
    fn new(chart: &'a AreaChart, maps: &'a StringMaps) -> Self {
        Self {
            chart,
            maps,
            samples: None,
        }
    }

    /// The x arrays given as props, if any.
    fn props(&self) -> Result<Option<Vec<Vec<DataValue>>>> {
        let Some(x) = &self.chart.x else {
            return Ok(None);
        };
        let arrays = x.arrays();
        if arrays.is_empty() {
            return Err(Error::InvalidInput("x input has no arrays".to_string()));
        }
        Ok(Some(arrays))
    }

    /// Indices of the x string map.
    fn mapped(&self) -> Option<Vec<DataValue>> {
        self.maps
            .x
            .as_ref()
            .map(|map| map.values().into_iter().map(DataValue::Number).collect())
    }

    fn samples(&mut self, warnings: &mut Vec<DomainWarning>) -> Result<Vec<DataValue>> {
        if let Some(samples) = &self.samples {
            return Ok(samples.clone());
        }
        let samples: Vec<DataValue> = x_samples(self.chart, self.maps, warnings)?
            .into_iter()
            .map(DataValue::Number)
            .collect();
        tracing::trace!(count = samples.len(), "generated x samples");
        self.samples = Some(samples.clone());
        Ok(samples)
    }
}

/// Pick the x array for series `index`: its own array, else the first one.
fn nth_array(arrays: &[Vec<DataValue>], index: usize) -> Vec<DataValue> {
    arrays
        .get(index)
        .or_else(|| arrays.first())
        .cloned()
        .unwrap_or_default()
}

/// Numeric coordinate of a value, plus its label when categorical.
fn coordinate(
    value: &DataValue,
    map: Option<&StringMap>,
    axis: Axis,
) -> Result<(f64, Option<String>)> {
    match value {
        DataValue::Number(n) if n.is_finite() => Ok((*n, None)),
        DataValue::Number(n) => Err(Error::InvalidInput(format!(
            "non-finite {axis} value {n}"
        ))),
        DataValue::Text(label) => map
            .and_then(|m| m.get(label))
            .map(|index| (index, Some(label.clone())))
            .ok_or_else(|| {
                Error::InvalidInput(format!("{axis} label {label:?} has no category index"))
            }),
    }
}

fn point(x: &DataValue, y: &DataValue, maps: &StringMaps) -> Result<DataPoint> {
    let (x, x_name) = coordinate(x, maps.x.as_ref(), Axis::X)?;
    let (y, y_name) = coordinate(y, maps.y.as_ref(), Axis::Y)?;
    Ok(DataPoint {
        x,
        y,
        x_name,
        y_name,
    })
}

/// Evaluate `f` at every x; text x values are evaluated at their index.
fn evaluate(f: &SeriesFn, xs: &[DataValue], maps: &StringMaps) -> Result<Vec<DataPoint>> {
    xs.iter()
        .map(|x| {
            let (x, x_name) = coordinate(x, maps.x.as_ref(), Axis::X)?;
            let y = f(x);
            if !y.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "function produced non-finite y {y} at x = {x}"
                )));
            }
            Ok(DataPoint {
                x,
                y,
                x_name,
                y_name: None,
            })
        })
        .collect()
}

/// Pair x and y values, truncating to the shorter list.
fn zip(xs: &[DataValue], ys: &[DataValue], maps: &StringMaps) -> Result<Vec<DataPoint>> {
    if xs.len() != ys.len() {
        tracing::debug!(x = xs.len(), y = ys.len(), "truncating mismatched x/y lengths");
    }
    xs.iter().zip(ys).map(|(x, y)| point(x, y, maps)).collect()
}

/// Point lists generated from the `y` input, in series order.
fn y_series(
    y: &YInput,
    source: &mut XSource<'_>,
    warnings: &mut Vec<DomainWarning>,
) -> Result<Vec<Vec<DataPoint>>> {
    let maps = source.maps;
    match y {
        YInput::Function(f) => {
            let arrays = match source.props()? {
                Some(arrays) => arrays,
                None => vec![source.samples(warnings)?],
            };
            arrays.iter().map(|xs| evaluate(f, xs, maps)).collect()
        }
        YInput::Fixed(ys) => {
            let xs = match source.props()? {
                Some(arrays) => nth_array(&arrays, 0),
                None => match source.mapped() {
                    Some(mapped) => mapped,
                    None => source.samples(warnings)?,
                },
            };
            Ok(vec![zip(&xs, ys, maps)?])
        }
        YInput::Mixed(elements) => {
            let props = source.props()?;
            elements
                .iter()
                .enumerate()
                .map(|(index, element)| {
                    let xs = match (&props, element) {
                        (Some(arrays), _) => nth_array(arrays, index),
                        (None, YElement::Values(_)) => match source.mapped() {
                            Some(mapped) => mapped,
                            None => source.samples(warnings)?,
                        },
                        (None, YElement::Function(_)) => source.samples(warnings)?,
                    };
                    match element {
                        YElement::Values(ys) => zip(&xs, ys, maps),
                        YElement::Function(f) => evaluate(f, &xs, maps),
                    }
                })
                .collect()
        }
    }
}

/// Normalize every input of `chart` into labelled numeric series.
///
/// Without `data` or `y`, `y` defaults to the identity function.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for text without a category index,
/// non-finite coordinates, an empty x array list, or when x-samples are
/// needed but no sampling domain can be inferred.
pub fn consolidate(
    chart: &AreaChart,
    maps: &StringMaps,
    warnings: &mut Vec<DomainWarning>,
) -> Result<Vec<Series>> {
    let identity;
    let y = match (&chart.y, &chart.data) {
        (Some(y), _) => Some(y),
        (None, Some(_)) => None,
        (None, None) => {
            identity = YInput::Function(Arc::new(|x: f64| x));
            Some(&identity)
        }
    };

    let mut series = Vec::new();
    let mut source = XSource::new(chart, maps);
    if let Some(y) = y {
        for (index, data) in y_series(y, &mut source, warnings)?.into_iter().enumerate() {
            let attrs =
                AttributeSpec::resolve(chart.y_attributes.as_ref(), index, &chart.area_type);
            series.push(Series { attrs, data });
        }
    }
    if let Some(data) = &chart.data {
        for (index, set) in data.series().into_iter().enumerate() {
            let attrs =
                AttributeSpec::resolve(chart.data_attributes.as_ref(), index, &chart.area_type);
            let data = set
                .iter()
                .map(|d| point(&d.x, &d.y, maps))
                .collect::<Result<Vec<_>>>()?;
            series.push(Series { attrs, data });
        }
    }
    tracing::debug!(series = series.len(), "consolidated chart inputs");
    Ok(series)
}
