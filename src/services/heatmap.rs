use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};
use ndarray::Array2;
use serde::Serialize;
use serde_json::Value;

use crate::config::HeatmapSettings;
use crate::domain::BusinessSummary;
use crate::files;
use crate::stats::Histogram2d;

#[derive(Debug, Clone, Default)]
pub struct HeatmapOptions {
    pub scatter: bool,
    pub log_scale: bool,
    pub cutoff: Option<u64>,
}

/// Binned or raw n-vs-rating data, ready for a plotting front end
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NVersusRating {
    #[serde(rename_all = "camelCase")]
    Heatmap {
        n_edges: Vec<f64>,
        rating_edges: Vec<f64>,
        counts: Vec<Vec<u64>>,
        log_counts: Vec<Vec<f64>>,
        extent: [f64; 4],
        cutoff: Option<u64>,
    },
    #[serde(rename_all = "camelCase")]
    Scatter {
        points: Vec<(f64, f64)>,
        x_limits: (f64, f64),
        y_limits: (f64, f64),
        log_scale: bool,
        cutoff: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSummary {
    pub businesses: usize,
    pub skipped: usize,
    pub output: PathBuf,
}

pub struct HeatmapService {
    settings: HeatmapSettings,
}

impl HeatmapService {
    pub fn new(settings: HeatmapSettings) -> Self {
        Self { settings }
    }

    pub fn run(&self, businesses_path: &Path, outbase: &str, options: &HeatmapOptions) -> Result<HeatmapSummary> {
        info!("Parsing json from {}", businesses_path.display());
        let raw = files::read_json_array(businesses_path)?;

        let (points, skipped) = extract_points(&raw);
        info!("{} businesses parsed", points.len());
        if skipped > 0 {
            warn!("Skipped {} businesses without review_count or stars", skipped);
        }

        let data = self.build(&points, options);
        let output = self.output_path(outbase, options);
        files::write_json(&output, &data)?;

        Ok(HeatmapSummary {
            businesses: points.len(),
            skipped,
            output,
        })
    }

    pub fn build(&self, points: &[(f64, f64)], options: &HeatmapOptions) -> NVersusRating {
        if options.scatter {
            self.scatter(points, options)
        } else {
            self.heatmap(points, options)
        }
    }

    fn scatter(&self, points: &[(f64, f64)], options: &HeatmapOptions) -> NVersusRating {
        let max_n = points.iter().map(|p| p.0).fold(0.0, f64::max);
        NVersusRating::Scatter {
            points: points.to_vec(),
            x_limits: (0.0, max_n),
            y_limits: (0.0, self.settings.max_rating_axis),
            log_scale: options.log_scale,
            cutoff: options.cutoff,
        }
    }

    fn heatmap(&self, points: &[(f64, f64)], options: &HeatmapOptions) -> NVersusRating {
        let histogram = Histogram2d::from_points(points, self.settings.n_bins, self.settings.rating_bins);
        let extent = extent(&histogram);

        NVersusRating::Heatmap {
            counts: rows(&histogram.counts),
            log_counts: rows(&histogram.log_counts()),
            n_edges: histogram.x_edges,
            rating_edges: histogram.y_edges,
            extent,
            cutoff: options.cutoff,
        }
    }

    /// `<outbase>_heatmap_n-vs-rating[_cutoff-N]_nbin-X_rbin-Y.json` or
    /// `<outbase>_scatter_n-vs-rating[_cutoff-N][_log].json`
    pub fn output_path(&self, outbase: &str, options: &HeatmapOptions) -> PathBuf {
        let vline = options
            .cutoff
            .map(|n| format!("_cutoff-{}", n))
            .unwrap_or_default();

        let name = if options.scatter {
            let log = if options.log_scale { "_log" } else { "" };
            format!("{}_scatter_n-vs-rating{}{}.json", outbase, vline, log)
        } else {
            format!(
                "{}_heatmap_n-vs-rating{}_nbin-{}_rbin-{}.json",
                outbase, vline, self.settings.n_bins, self.settings.rating_bins
            )
        };
        PathBuf::from(name)
    }
}

/// `(review_count, stars)` of every usable business and the number skipped
pub fn extract_points(raw: &[Value]) -> (Vec<(f64, f64)>, usize) {
    let mut points = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for value in raw {
        let point = serde_json::from_value::<BusinessSummary>(value.clone())
            .ok()
            .and_then(|b| b.point());
        match point {
            Some(p) => points.push(p),
            None => skipped += 1,
        }
    }

    (points, skipped)
}

fn extent(histogram: &Histogram2d) -> [f64; 4] {
    let first = |edges: &[f64]| edges.first().copied().unwrap_or(0.0);
    let last = |edges: &[f64]| edges.last().copied().unwrap_or(0.0);
    [
        first(&histogram.x_edges),
        last(&histogram.x_edges),
        0.0,
        last(&histogram.y_edges),
    ]
}

fn rows<T: Clone>(matrix: &Array2<T>) -> Vec<Vec<T>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}
