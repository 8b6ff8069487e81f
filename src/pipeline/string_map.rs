//! Categorical label to numeric index mapping.

use crate::data::{Axis, AxisPair, DataValue};
use crate::plots::AreaChart;
use std::collections::{BTreeSet, HashMap};

/// Per-axis mapping from distinct labels to 1-based plotting indices.
#[derive(Debug, Clone, PartialEq)]
pub struct StringMap {
    labels: Vec<String>,
    index: HashMap<String, f64>,
}

/// The string maps of both axes; `None` marks a purely numeric axis.
pub type StringMaps = AxisPair<Option<StringMap>>;

impl StringMap {
    /// Map explicit categories, in the given order, to `1..N`.
    ///
    /// Returns `None` unless at least one category is text. Numeric
    /// categories are keyed by their display form. A repeated label keeps
    /// the index of its first occurrence.
    #[must_use]
    pub fn from_categories(categories: &[DataValue]) -> Option<Self> {
        if !categories.iter().any(|c| c.as_str().is_some()) {
            return None;
        }
        let mut map = Self {
            labels: Vec::with_capacity(categories.len()),
            index: HashMap::with_capacity(categories.len()),
        };
        for (position, category) in categories.iter().enumerate() {
            let label = category.label();
            if !map.index.contains_key(&label) {
                map.index.insert(label.clone(), (position + 1) as f64);
                map.labels.push(label);
            }
        }
        Some(map)
    }

    /// Deduplicate and sort `labels`, then assign `1..N`.
    ///
    /// Returns `None` when there are no labels.
    #[must_use]
    pub fn from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        if sorted.is_empty() {
            return None;
        }
        let labels: Vec<String> = sorted.into_iter().collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), (i + 1) as f64))
            .collect();
        Some(Self { labels, index })
    }

    /// Index of a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.index.get(label).copied()
    }

    /// Labels in index order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Indices in label order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.labels.iter().filter_map(|l| self.get(l)).collect()
    }

    /// Smallest and largest index.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        crate::data::extent(self.values()).unwrap_or((1.0, 1.0))
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Build the string map of one axis from the chart inputs.
///
/// Explicit categories containing text win; otherwise every text value in
/// the `data` points and in the raw axis input is collected.
#[must_use]
pub fn create_string_map(chart: &AreaChart, axis: Axis) -> Option<StringMap> {
    if let Some(categories) = chart.categories.as_ref().and_then(|c| c.get(axis)) {
        if let Some(map) = StringMap::from_categories(categories) {
            return Some(map);
        }
    }

    let mut labels: Vec<&str> = Vec::new();
    if let Some(data) = &chart.data {
        labels.extend(data.points().filter_map(|d| d.get(axis).as_str()));
    }
    match axis {
        Axis::X => {
            if let Some(x) = &chart.x {
                labels.extend(x.flatten().filter_map(DataValue::as_str));
            }
        }
        Axis::Y => {
            if let Some(y) = &chart.y {
                labels.extend(y.literal_values().filter_map(DataValue::as_str));
            }
        }
    }
    StringMap::from_labels(labels)
}

/// String maps for both axes.
#[must_use]
pub fn create_string_maps(chart: &AreaChart) -> StringMaps {
    AxisPair::from_fn(|axis| create_string_map(chart, axis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{values, AxisSpec, DataInput, Datum, XInput, YInput};

    #[test]
    fn test_from_labels_sorts_and_dedupes() {
        let map = StringMap::from_labels(["pears", "apples", "pears", "figs"]).unwrap();
        assert_eq!(map.labels(), ["apples", "figs", "pears"]);
        assert_eq!(map.get("apples"), Some(1.0));
        assert_eq!(map.get("figs"), Some(2.0));
        assert_eq!(map.get("pears"), Some(3.0));
        assert_eq!(map.values(), vec![1.0, 2.0, 3.0]);
        assert_eq!(map.extent(), (1.0, 3.0));
    }

    #[test]
    fn test_from_labels_empty_is_none() {
        assert!(StringMap::from_labels(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_categories_keep_given_order() {
        let map = StringMap::from_categories(&values(&["zeta", "alpha", "mid"])).unwrap();
        assert_eq!(map.get("zeta"), Some(1.0));
        assert_eq!(map.get("alpha"), Some(2.0));
        assert_eq!(map.get("mid"), Some(3.0));
    }

    #[test]
    fn test_numeric_categories_are_ignored() {
        assert!(StringMap::from_categories(&values(&[1.0, 2.0])).is_none());
    }

    #[test]
    fn test_mixed_categories_key_numbers_by_label() {
        let cats = vec![DataValue::from("low"), DataValue::from(2.0)];
        let map = StringMap::from_categories(&cats).unwrap();
        assert_eq!(map.get("2"), Some(2.0));
    }

    #[test]
    fn test_duplicate_category_keeps_first_index() {
        let map = StringMap::from_categories(&values(&["a", "b", "a"])).unwrap();
        assert_eq!(map.get("a"), Some(1.0));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_scan_data_and_x_input() {
        let chart = AreaChart::new()
            .data(DataInput::Single(vec![
                Datum::new("cherry", 1.0),
                Datum::new("apple", 2.0),
            ]))
            .x(XInput::Values(values(&["banana", "apple"])));
        let map = create_string_map(&chart, Axis::X).unwrap();
        assert_eq!(map.labels(), ["apple", "banana", "cherry"]);
        assert!(create_string_map(&chart, Axis::Y).is_none());
    }

    #[test]
    fn test_scan_y_input() {
        let chart = AreaChart::new().y(YInput::fixed(&["high", "low", "high"]));
        let map = create_string_map(&chart, Axis::Y).unwrap();
        assert_eq!(map.labels(), ["high", "low"]);
    }

    #[test]
    fn test_categories_override_scan() {
        let chart = AreaChart::new()
            .data(DataInput::Single(vec![Datum::new("b", 1.0), Datum::new("a", 2.0)]))
            .categories(AxisSpec::only(Axis::X, values(&["b", "a"])));
        let maps = create_string_maps(&chart);
        let x = maps.x.unwrap();
        assert_eq!(x.get("b"), Some(1.0));
        assert_eq!(x.get("a"), Some(2.0));
        assert!(maps.y.is_none());
    }
}
