use super::types::BusinessSeries;
use crate::stats::center_on;

/// Cumulative average of `series` minus its own final average.
pub fn normalize(series: &BusinessSeries) -> Vec<f64> {
    center_on(series.cumulative_average(), series.average())
}
