use std::collections::HashMap;

use serde::Serialize;

use crate::domain::Record;
use crate::stats::Histogram;

/// One business's reviews in date order with derived statistics.
///
/// Only `series::builder` constructs these, and it always sorts before it
/// computes, so `cumulative_average` never reflects unsorted input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSeries {
    pub(super) key: String,
    pub(super) records: Vec<Record>,
    pub(super) average: f64,
    pub(super) cumulative_average: Vec<f64>,
    pub(super) histogram: Histogram,
}

impl BusinessSeries {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// False for every series produced by the builder
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn average(&self) -> f64 {
        self.average
    }

    pub fn cumulative_average(&self) -> &[f64] {
        &self.cumulative_average
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn stars(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.stars)
    }
}

/// Series keyed by business, iterated in first-seen key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesMap {
    series: Vec<BusinessSeries>,
    index: HashMap<String, usize>,
}

impl SeriesMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn push(&mut self, series: BusinessSeries) {
        self.index.insert(series.key.clone(), self.series.len());
        self.series.push(series);
    }

    pub fn get(&self, key: &str) -> Option<&BusinessSeries> {
        self.index.get(key).map(|&idx| &self.series[idx])
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BusinessSeries> {
        self.series.iter()
    }

    pub fn as_slice(&self) -> &[BusinessSeries] {
        &self.series
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.key())
    }

    pub fn total_records(&self) -> usize {
        self.series.iter().map(|s| s.len()).sum()
    }

    pub fn into_vec(self) -> Vec<BusinessSeries> {
        self.series
    }
}

impl<'a> IntoIterator for &'a SeriesMap {
    type Item = &'a BusinessSeries;
    type IntoIter = std::slice::Iter<'a, BusinessSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

/// Average-centered moving average of one business, for the overlay plot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSeries {
    pub key: String,
    pub normalized_average: Vec<f64>,
    pub average: f64,
    pub rounded_average: f64,
    pub n: usize,
}

impl NormalizedSeries {
    /// Hover label shown next to the overlay line
    pub fn label(&self) -> String {
        format!("{} (avg= {}, n= {})", self.key, self.rounded_average, self.n)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDataset {
    pub points: Vec<NormalizedSeries>,
    pub max_length: usize,
    pub total_businesses: usize,
    pub total_reviews: usize,
}

impl MetaDataset {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shared x-domain of the overlay plot
    pub fn x_domain(&self) -> (usize, usize) {
        (0, self.max_length)
    }

    pub fn title(&self) -> String {
        format!(
            "Meta plot ({} businesses, {} reviews)",
            self.total_businesses, self.total_reviews
        )
    }
}

/// Portion of the overlay x-axis currently shown, always starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibleRange {
    pub start: f64,
    pub end: f64,
}

impl VisibleRange {
    /// The points of `values` that fall inside the range
    pub fn slice<'a>(&self, values: &'a [f64]) -> &'a [f64] {
        let last_index = self.end.floor() as usize;
        let visible = last_index.saturating_add(1).min(values.len());
        &values[..visible]
    }
}
