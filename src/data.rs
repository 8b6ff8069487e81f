//! Input data model for area charts.
//!
//! Plotting inputs come in several shapes: explicit points, parallel x/y
//! arrays, functions of x, or a mix of arrays and functions. They are
//! expressed here as closed enums so the pipeline decides the shape once
//! instead of probing values at every step.

use crate::color::Rgba;
use crate::interpolate::Interpolation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Chart axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// Both axes, x first.
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// One value per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisPair<T> {
    /// X-axis value.
    pub x: T,
    /// Y-axis value.
    pub y: T,
}

impl<T> AxisPair<T> {
    /// Build a pair by evaluating `f` for each axis.
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            x: f(Axis::X),
            y: f(Axis::Y),
        }
    }

    /// Value for an axis.
    #[must_use]
    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

/// A value on a chart axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    /// A numeric value.
    Number(f64),
    /// A categorical label.
    Text(String),
}

impl DataValue {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => Some(*n),
            DataValue::Text(_) => None,
        }
    }

    /// Get as string, or None if not text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            DataValue::Number(_) => None,
        }
    }

    /// Label used when the value keys a category (`2` for `2.0`).
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            DataValue::Number(n) => n.to_string(),
            DataValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Number(v)
    }
}

impl From<i32> for DataValue {
    fn from(v: i32) -> Self {
        DataValue::Number(f64::from(v))
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

/// Convert a slice of anything value-like into `DataValue`s.
pub fn values<T: Clone + Into<DataValue>>(items: &[T]) -> Vec<DataValue> {
    items.iter().cloned().map(Into::into).collect()
}

/// A raw input point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    /// X value.
    pub x: DataValue,
    /// Y value.
    pub y: DataValue,
}

impl Datum {
    /// Create a point from any value-like coordinates.
    #[must_use]
    pub fn new(x: impl Into<DataValue>, y: impl Into<DataValue>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Coordinate on an axis.
    #[must_use]
    pub fn get(&self, axis: Axis) -> &DataValue {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl<X: Into<DataValue>, Y: Into<DataValue>> From<(X, Y)> for Datum {
    fn from((x, y): (X, Y)) -> Self {
        Self::new(x, y)
    }
}

/// A function of x producing y.
pub type SeriesFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// The `data` input: one series of points or several.
#[derive(Debug, Clone, PartialEq)]
pub enum DataInput {
    /// A single series.
    Single(Vec<Datum>),
    /// Several series, in plotting order.
    Multi(Vec<Vec<Datum>>),
}

impl DataInput {
    /// Series in order, regardless of shape.
    #[must_use]
    pub fn series(&self) -> Vec<&[Datum]> {
        match self {
            DataInput::Single(points) => vec![points.as_slice()],
            DataInput::Multi(sets) => sets.iter().map(Vec::as_slice).collect(),
        }
    }

    /// All points of all series.
    pub fn points(&self) -> impl Iterator<Item = &Datum> {
        self.series().into_iter().flatten()
    }
}

/// The `x` input: one array of values or one array per series.
#[derive(Debug, Clone, PartialEq)]
pub enum XInput {
    /// One x array shared by every series.
    Values(Vec<DataValue>),
    /// One x array per series.
    Arrays(Vec<Vec<DataValue>>),
}

impl XInput {
    /// The x arrays, always as a list.
    #[must_use]
    pub fn arrays(&self) -> Vec<Vec<DataValue>> {
        match self {
            XInput::Values(values) => vec![values.clone()],
            XInput::Arrays(arrays) => arrays.clone(),
        }
    }

    /// Every x value across all arrays.
    pub fn flatten(&self) -> impl Iterator<Item = &DataValue> {
        let arrays: Vec<&[DataValue]> = match self {
            XInput::Values(values) => vec![values.as_slice()],
            XInput::Arrays(arrays) => arrays.iter().map(Vec::as_slice).collect(),
        };
        arrays.into_iter().flatten()
    }
}

/// One element of a mixed y input.
#[derive(Clone)]
pub enum YElement {
    /// Literal y values.
    Values(Vec<DataValue>),
    /// A function evaluated over the matching x array.
    Function(SeriesFn),
}

impl fmt::Debug for YElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YElement::Values(values) => f.debug_tuple("Values").field(values).finish(),
            YElement::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// The `y` input.
#[derive(Clone)]
pub enum YInput {
    /// A single function of x (one series per x array).
    Function(SeriesFn),
    /// A flat list of y values forming one series.
    Fixed(Vec<DataValue>),
    /// Several series, each given as values or as a function.
    Mixed(Vec<YElement>),
}

impl YInput {
    /// A function series from a closure.
    pub fn function(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        YInput::Function(Arc::new(f))
    }

    /// A fixed series from numbers or labels.
    pub fn fixed<T: Clone + Into<DataValue>>(items: &[T]) -> Self {
        YInput::Fixed(values(items))
    }

    /// Every literal value in the input (functions contribute nothing).
    pub fn literal_values(&self) -> impl Iterator<Item = &DataValue> {
        let arrays: Vec<&[DataValue]> = match self {
            YInput::Function(_) => Vec::new(),
            YInput::Fixed(values) => vec![values.as_slice()],
            YInput::Mixed(elements) => elements
                .iter()
                .filter_map(|element| match element {
                    YElement::Values(values) => Some(values.as_slice()),
                    YElement::Function(_) => None,
                })
                .collect(),
        };
        arrays.into_iter().flatten()
    }
}

impl fmt::Debug for YInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YInput::Function(_) => f.write_str("Function(..)"),
            YInput::Fixed(values) => f.debug_tuple("Fixed").field(values).finish(),
            YInput::Mixed(elements) => f.debug_tuple("Mixed").field(elements).finish(),
        }
    }
}

/// Style and identity of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    /// Series name.
    pub name: String,
    /// Series type (chart-wide area type by default).
    pub kind: String,
    /// Fill color.
    pub color: Option<Rgba>,
    /// Fill opacity.
    pub opacity: Option<f64>,
    /// Interpolation overriding the chart-wide mode.
    pub interpolation: Option<Interpolation>,
}

/// User-supplied attribute overrides; unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeOverrides {
    /// Series name.
    pub name: Option<String>,
    /// Series type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Fill color.
    pub color: Option<Rgba>,
    /// Fill opacity.
    pub opacity: Option<f64>,
    /// Interpolation mode.
    pub interpolation: Option<Interpolation>,
}

impl AttributeOverrides {
    /// Named overrides.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the fill color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the interpolation.
    #[must_use]
    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = Some(interpolation);
        self
    }
}

/// The `yAttributes` / `dataAttributes` input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeSpec {
    /// One entry per series index.
    PerIndex(Vec<AttributeOverrides>),
    /// Applied to every series.
    Shared(AttributeOverrides),
}

impl AttributeSpec {
    /// Resolve the attributes of series `index`.
    ///
    /// A per-index entry wins, then a shared entry, then the defaults
    /// (`area-<index>` and the chart-wide type).
    #[must_use]
    pub fn resolve(spec: Option<&Self>, index: usize, default_kind: &str) -> Attributes {
        let overrides = match spec {
            Some(AttributeSpec::PerIndex(entries)) => entries.get(index),
            Some(AttributeSpec::Shared(shared)) => Some(shared),
            None => None,
        };
        let overrides = overrides.cloned().unwrap_or_default();
        Attributes {
            name: overrides.name.unwrap_or_else(|| format!("area-{index}")),
            kind: overrides.kind.unwrap_or_else(|| default_kind.to_string()),
            color: overrides.color,
            opacity: overrides.opacity,
            interpolation: overrides.interpolation,
        }
    }
}

/// A per-axis setting that may also be given once for both axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisSpec<T> {
    /// Separate values; a missing axis has no opinion.
    PerAxis {
        /// X-axis value.
        #[serde(default)]
        x: Option<T>,
        /// Y-axis value.
        #[serde(default)]
        y: Option<T>,
    },
    /// Same value for both axes.
    Shared(T),
}

impl<T> AxisSpec<T> {
    /// Value for one axis only.
    #[must_use]
    pub fn only(axis: Axis, value: T) -> Self {
        match axis {
            Axis::X => AxisSpec::PerAxis {
                x: Some(value),
                y: None,
            },
            Axis::Y => AxisSpec::PerAxis {
                x: None,
                y: Some(value),
            },
        }
    }

    /// Separate values for both axes.
    #[must_use]
    pub fn xy(x: T, y: T) -> Self {
        AxisSpec::PerAxis {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Value for an axis, if any.
    #[must_use]
    pub fn get(&self, axis: Axis) -> Option<&T> {
        match self {
            AxisSpec::Shared(value) => Some(value),
            AxisSpec::PerAxis { x, y } => match axis {
                Axis::X => x.as_ref(),
                Axis::Y => y.as_ref(),
            },
        }
    }
}

/// A normalized point: numeric coordinates plus any original labels.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    /// Numeric x.
    pub x: f64,
    /// Numeric y.
    pub y: f64,
    /// Original x label when x was categorical.
    pub x_name: Option<String>,
    /// Original y label when y was categorical.
    pub y_name: Option<String>,
}

impl DataPoint {
    /// A purely numeric point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            x_name: None,
            y_name: None,
        }
    }

    /// Coordinate on an axis.
    #[must_use]
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// One consolidated, labelled series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Identity and style.
    pub attrs: Attributes,
    /// Points in input order.
    pub data: Vec<DataPoint>,
}

impl Series {
    /// Minimum and maximum along an axis, or None when empty.
    #[must_use]
    pub fn extent(&self, axis: Axis) -> Option<(f64, f64)> {
        extent(self.data.iter().map(|p| p.get(axis)))
    }
}

/// Minimum and maximum of an iterator of values, or None when empty.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_value_label() {
        assert_eq!(DataValue::from(2.0).label(), "2");
        assert_eq!(DataValue::from(2.5).label(), "2.5");
        assert_eq!(DataValue::from("apples").label(), "apples");
    }

    #[test]
    fn test_data_value_untagged_serde() {
        let parsed: Vec<DataValue> = serde_yaml_ng::from_str("[1, 2.5, pears]").unwrap();
        assert_eq!(
            parsed,
            vec![
                DataValue::Number(1.0),
                DataValue::Number(2.5),
                DataValue::Text("pears".into())
            ]
        );
    }

    #[test]
    fn test_data_input_series_shapes() {
        let single = DataInput::Single(vec![Datum::new(1.0, 2.0)]);
        assert_eq!(single.series().len(), 1);
        let multi = DataInput::Multi(vec![vec![Datum::new(1.0, 2.0)], vec![Datum::new(3, 4)]]);
        assert_eq!(multi.series().len(), 2);
        assert_eq!(multi.points().count(), 2);
    }

    #[test]
    fn test_x_input_arrays() {
        let x = XInput::Values(values(&[1.0, 2.0]));
        assert_eq!(x.arrays().len(), 1);
        let x = XInput::Arrays(vec![values(&[1.0]), values(&["a", "b"])]);
        assert_eq!(x.flatten().count(), 3);
    }

    #[test]
    fn test_y_literal_values_skip_functions() {
        let y = YInput::Mixed(vec![
            YElement::Values(values(&["low", "high"])),
            YElement::Function(Arc::new(|x: f64| x)),
        ]);
        assert_eq!(y.literal_values().count(), 2);
        assert_eq!(YInput::function(|x| x).literal_values().count(), 0);
    }

    #[test]
    fn test_attributes_defaults() {
        let attrs = AttributeSpec::resolve(None, 3, "area");
        assert_eq!(attrs.name, "area-3");
        assert_eq!(attrs.kind, "area");
        assert!(attrs.color.is_none());
    }

    #[test]
    fn test_attributes_per_index_then_default() {
        let spec = AttributeSpec::PerIndex(vec![
            AttributeOverrides::named("first"),
            AttributeOverrides::default().opacity(0.3),
        ]);
        assert_eq!(AttributeSpec::resolve(Some(&spec), 0, "area").name, "first");
        let second = AttributeSpec::resolve(Some(&spec), 1, "area");
        assert_eq!(second.name, "area-1");
        assert_eq!(second.opacity, Some(0.3));
        assert_eq!(AttributeSpec::resolve(Some(&spec), 2, "area").name, "area-2");
    }

    #[test]
    fn test_attributes_shared_applies_to_all() {
        let spec = AttributeSpec::Shared(AttributeOverrides::default().color(Rgba::RED));
        for index in 0..3 {
            let attrs = AttributeSpec::resolve(Some(&spec), index, "area");
            assert_eq!(attrs.color, Some(Rgba::RED));
            assert_eq!(attrs.name, format!("area-{index}"));
        }
    }

    #[test]
    fn test_attribute_spec_from_yaml() {
        let spec: AttributeSpec =
            serde_yaml_ng::from_str("- {color: blue, opacity: 0.3}\n- {color: red, type: stream}")
                .unwrap();
        let second = AttributeSpec::resolve(Some(&spec), 1, "area");
        assert_eq!(second.color, Some(Rgba::RED));
        assert_eq!(second.kind, "stream");
    }

    #[test]
    fn test_axis_spec_lookup() {
        let shared = AxisSpec::Shared((0.0, 1.0));
        assert_eq!(shared.get(Axis::Y), Some(&(0.0, 1.0)));
        let only_x = AxisSpec::only(Axis::X, 5.0);
        assert_eq!(only_x.get(Axis::X), Some(&5.0));
        assert_eq!(only_x.get(Axis::Y), None);
    }

    #[test]
    fn test_extent() {
        assert_eq!(extent([3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(extent(std::iter::empty()), None);
    }
}
