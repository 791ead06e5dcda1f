use super::normalizer::normalize;
use super::types::{BusinessSeries, MetaDataset, NormalizedSeries, VisibleRange};
use crate::stats::round_to_tenth;

/// Collect every series' normalized average into the overlay data set.
///
/// `cutoff` truncates each normalized sequence for display only; totals,
/// averages and `max_length` always describe the full series.
pub fn aggregate(all: &[BusinessSeries], cutoff: Option<usize>) -> MetaDataset {
    MetaDataset {
        points: all.iter().map(|s| build_point(s, cutoff)).collect(),
        max_length: max_length(all),
        total_businesses: all.len(),
        total_reviews: total_reviews(all),
    }
}

fn build_point(series: &BusinessSeries, cutoff: Option<usize>) -> NormalizedSeries {
    let mut normalized_average = normalize(series);
    if let Some(limit) = cutoff {
        normalized_average.truncate(limit);
    }

    NormalizedSeries {
        key: series.key().to_string(),
        normalized_average,
        average: series.average(),
        rounded_average: round_to_tenth(series.average()),
        n: series.len(),
    }
}

fn max_length(all: &[BusinessSeries]) -> usize {
    all.iter().map(|s| s.len()).max().unwrap_or(0)
}

fn total_reviews(all: &[BusinessSeries]) -> usize {
    all.iter().map(|s| s.len()).sum()
}

/// Map a slider position to the visible part of the overlay x-axis.
pub fn visible_range(position: f64, max_length: usize) -> VisibleRange {
    let end = if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, max_length as f64)
    };
    VisibleRange { start: 0.0, end }
}

/// Upper bound of a small multiple's x-axis: the series' own length unless a
/// shared cutoff is configured.
pub fn small_multiple_domain(series: &BusinessSeries, sm_cutoff: Option<usize>) -> usize {
    sm_cutoff.unwrap_or_else(|| series.len())
}
