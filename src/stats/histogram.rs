use ndarray::Array2;
use serde::Serialize;

/// Star bucket edges; offset so whole-star ratings land in the expected bucket
pub const STAR_BUCKET_EDGES: [f64; 6] = [0.0, 1.01, 2.01, 3.01, 4.01, 5.01];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// One-dimensional histogram over explicit, ascending edges.
///
/// Bucket `i` covers `[edges[i], edges[i+1])`, except the last bucket which
/// also includes its upper edge. Values outside the edges are not counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    buckets: Vec<Bucket>,
}

impl Histogram {
    pub fn new(edges: &[f64]) -> Self {
        let buckets = edges
            .windows(2)
            .map(|w| Bucket {
                lower: w[0],
                upper: w[1],
                count: 0,
            })
            .collect();
        Self { buckets }
    }

    pub fn from_values(edges: &[f64], values: impl IntoIterator<Item = f64>) -> Self {
        let mut histogram = Self::new(edges);
        for value in values {
            histogram.add(value);
        }
        histogram
    }

    pub fn add(&mut self, value: f64) -> bool {
        match self.bucket_of(value) {
            Some(idx) => {
                self.buckets[idx].count += 1;
                true
            }
            None => false,
        }
    }

    pub fn counts(&self) -> Vec<usize> {
        self.buckets.iter().map(|b| b.count).collect()
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    fn bucket_of(&self, value: f64) -> Option<usize> {
        let first = self.buckets.first()?;
        let last = self.buckets.last()?;
        if !(value >= first.lower && value <= last.upper) {
            return None;
        }
        let idx = self.buckets.partition_point(|b| b.upper <= value);
        Some(idx.min(self.buckets.len() - 1))
    }
}

/// Equal-width two-dimensional histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2d {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    pub counts: Array2<u64>,
}

impl Histogram2d {
    pub fn from_points(points: &[(f64, f64)], x_bins: usize, y_bins: usize) -> Self {
        let x_edges = equal_width_edges(points.iter().map(|p| p.0), x_bins);
        let y_edges = equal_width_edges(points.iter().map(|p| p.1), y_bins);
        let mut counts = Array2::<u64>::zeros((x_bins, y_bins));

        for &(x, y) in points {
            if let (Some(i), Some(j)) = (edge_index(&x_edges, x), edge_index(&y_edges, y)) {
                counts[[i, j]] += 1;
            }
        }

        Self {
            x_edges,
            y_edges,
            counts,
        }
    }

    /// Counts in log space so sparse and dense cells are both visible
    pub fn log_counts(&self) -> Array2<f64> {
        self.counts.mapv(|c| (c as f64 + 1.0).log10())
    }

    pub fn total(&self) -> u64 {
        self.counts.sum()
    }
}

fn equal_width_edges(values: impl Iterator<Item = f64>, bins: usize) -> Vec<f64> {
    let (min, max) = value_range(values);
    let (low, high) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (high - low) / bins as f64;

    let mut edges: Vec<f64> = (0..=bins).map(|i| low + width * i as f64).collect();
    // The top edge is inclusive, so it must equal the maximum exactly.
    if let Some(last) = edges.last_mut() {
        *last = high;
    }
    edges
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_finite() && max.is_finite() {
        (min, max)
    } else {
        (0.0, 1.0)
    }
}

fn edge_index(edges: &[f64], value: f64) -> Option<usize> {
    let bins = edges.len().checked_sub(1)?;
    if bins == 0 || value < edges[0] || value > edges[bins] {
        return None;
    }
    let idx = edges.partition_point(|&e| e <= value);
    Some(idx.saturating_sub(1).min(bins - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star_histogram(stars: impl IntoIterator<Item = f64>) -> Histogram {
        Histogram::from_values(&STAR_BUCKET_EDGES, stars)
    }

    #[test]
    fn test_whole_stars_land_in_own_bucket() {
        let histogram = star_histogram([1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 5.0, 5.0]);
        assert_eq!(histogram.counts(), vec![1, 2, 1, 1, 3]);
    }

    #[test]
    fn test_zero_stars_counted_in_first_bucket() {
        let histogram = star_histogram([0.0, 0.5]);
        assert_eq!(histogram.counts(), vec![2, 0, 0, 0, 0]);
    }

    #[test]
    fn test_values_outside_edges_are_ignored() {
        let mut histogram = Histogram::new(&[0.0, 1.0, 2.0]);
        assert!(!histogram.add(-0.1));
        assert!(!histogram.add(2.5));
        assert!(histogram.add(2.0));
        assert_eq!(histogram.counts(), vec![0, 1]);
        assert_eq!(histogram.total(), 1);
    }

    #[test]
    fn test_histogram_2d_counts_every_point() {
        let points = vec![(10.0, 1.0), (20.0, 5.0), (30.0, 3.0), (30.0, 5.0)];
        let histogram = Histogram2d::from_points(&points, 2, 2);

        assert_eq!(histogram.x_edges, vec![10.0, 20.0, 30.0]);
        assert_eq!(histogram.y_edges, vec![1.0, 3.0, 5.0]);
        assert_eq!(histogram.total(), 4);
        assert_eq!(histogram.counts[[0, 0]], 1);
        assert_eq!(histogram.counts[[1, 1]], 3);
    }

    #[test]
    fn test_histogram_2d_keeps_maximum_on_uneven_range() {
        let points = vec![(3.5, 4.0), (500.0, 3.0), (991.0, 4.5)];
        let histogram = Histogram2d::from_points(&points, 15, 10);

        assert_eq!(histogram.x_edges.last(), Some(&991.0));
        assert_eq!(histogram.y_edges.last(), Some(&4.5));
        assert_eq!(histogram.total(), points.len() as u64);
        assert_eq!(histogram.counts[[14, 9]], 1);
    }

    #[test]
    fn test_histogram_2d_counts_all_points_on_realistic_ranges() {
        let points: Vec<(f64, f64)> = (0..200)
            .map(|i| (20.0 + i as f64 * 7.3, 1.0 + (i % 9) as f64 * 0.45))
            .collect();
        let histogram = Histogram2d::from_points(&points, 15, 10);

        assert_eq!(histogram.x_edges.len(), 16);
        assert_eq!(histogram.total(), points.len() as u64);
    }

    #[test]
    fn test_histogram_2d_degenerate_range() {
        let points = vec![(5.0, 4.0), (5.0, 4.0)];
        let histogram = Histogram2d::from_points(&points, 1, 1);
        assert_eq!(histogram.x_edges, vec![4.5, 5.5]);
        assert_eq!(histogram.counts[[0, 0]], 2);
    }

    #[test]
    fn test_log_counts() {
        let points = vec![(1.0, 1.0); 9];
        let histogram = Histogram2d::from_points(&points, 1, 1);
        assert_eq!(histogram.log_counts()[[0, 0]], 1.0);
    }
}
