use serde::Serialize;

use crate::stats::histogram::STAR_BUCKET_EDGES;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSettings {
    pub min_stars: f64,
    pub max_stars: f64,
    pub bucket_edges: Vec<f64>,
    /// Shared x-domain for every small multiple; `None` fits each chart to its own n
    pub sm_cutoff: Option<usize>,
    /// Display-only truncation of the overlay lines
    pub meta_cutoff: Option<usize>,
}

impl Default for SeriesSettings {
    fn default() -> Self {
        Self {
            min_stars: 0.0,
            max_stars: 5.0, // yelp = 0-5 stars, always
            bucket_edges: STAR_BUCKET_EDGES.to_vec(),
            sm_cutoff: None,
            meta_cutoff: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSettings {
    pub min_reviews: u64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self { min_reviews: 20 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSettings {
    pub n_bins: usize,
    pub rating_bins: usize,
    pub max_rating_axis: f64,
}

impl Default for HeatmapSettings {
    fn default() -> Self {
        Self {
            n_bins: 15,
            rating_bins: 10,
            max_rating_axis: 5.5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub series: SeriesSettings,
    pub filter: FilterSettings,
    pub heatmap: HeatmapSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cutoffs(mut self, sm_cutoff: Option<usize>, meta_cutoff: Option<usize>) -> Self {
        self.series.sm_cutoff = sm_cutoff;
        self.series.meta_cutoff = meta_cutoff;
        self
    }
}

/// Path from the environment, falling back to `default`
pub fn path_from_env(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.series.max_stars, 5.0);
        assert_eq!(config.series.bucket_edges.len(), 6);
        assert_eq!(config.filter.min_reviews, 20);
        assert_eq!(config.heatmap.n_bins, 15);
        assert_eq!(config.heatmap.rating_bins, 10);
    }

    #[test]
    fn test_with_cutoffs() {
        let config = AppConfig::new().with_cutoffs(Some(100), Some(500));
        assert_eq!(config.series.sm_cutoff, Some(100));
        assert_eq!(config.series.meta_cutoff, Some(500));
    }

    #[test]
    fn test_path_from_env_fallback() {
        let path = path_from_env("RATINGS_OVER_N_UNSET_TEST_VAR", "data/reviews.json");
        assert_eq!(path, "data/reviews.json");
    }
}
