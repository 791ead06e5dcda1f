use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::config::{AppConfig, SeriesSettings};
use crate::domain::{RejectionReport, ReviewValidator};
use crate::files;
use crate::series::{self, BusinessSeries, MetaDataset, SeriesBuilder};
use crate::stats::round_to_tenth;

/// Everything a renderer needs to draw the small multiples and the meta plot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedDataset {
    pub generated_at: DateTime<Utc>,
    pub settings: SeriesSettings,
    pub rejected: RejectionReport,
    pub series: Vec<SmallMultiple>,
    pub meta: MetaDataset,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmallMultiple {
    #[serde(flatten)]
    pub series: BusinessSeries,
    pub rounded_average: f64,
    pub x_domain: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparationSummary {
    pub businesses: usize,
    pub reviews: usize,
    pub rejected: usize,
    pub max_length: usize,
}

pub struct PreparationService {
    config: AppConfig,
}

impl PreparationService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, input: &Path, output: &Path) -> Result<PreparationSummary> {
        info!("=== Starting Review Preparation ===\n");

        // Step 1: Load raw reviews
        let raw = files::read_json_array(input)?;
        info!("  → Loaded {} raw reviews from {}\n", raw.len(), input.display());

        // Step 2: Validate, group and aggregate
        let dataset = self.prepare(&raw);

        // Step 3: Hand the result to the renderer
        files::write_json(output, &dataset)?;
        info!("  → Wrote prepared dataset to {}\n", output.display());

        info!("=== Preparation Complete ===");
        Ok(summarize(&dataset))
    }

    pub fn prepare(&self, raw: &[Value]) -> PreparedDataset {
        let settings = &self.config.series;

        let (records, rejected) = self.validator().validate_all(raw);
        if records.is_empty() {
            warn!("No valid reviews left after filtering; nothing to draw");
        }

        let builder = SeriesBuilder::new(settings.bucket_edges.clone());
        let series_map = builder.build(records);
        info!(
            "  → Built {} business series from {} reviews",
            series_map.len(),
            series_map.total_records()
        );

        let meta = series::aggregate(series_map.as_slice(), settings.meta_cutoff);
        let series = series_map
            .into_vec()
            .into_iter()
            .map(|s| self.small_multiple(s))
            .collect();

        PreparedDataset {
            generated_at: Utc::now(),
            settings: settings.clone(),
            rejected,
            series,
            meta,
        }
    }

    fn validator(&self) -> ReviewValidator {
        let settings = &self.config.series;
        ReviewValidator::new(settings.min_stars, settings.max_stars)
    }

    fn small_multiple(&self, series: BusinessSeries) -> SmallMultiple {
        let x_domain = series::small_multiple_domain(&series, self.config.series.sm_cutoff);
        SmallMultiple {
            rounded_average: round_to_tenth(series.average()),
            x_domain,
            series,
        }
    }
}

fn summarize(dataset: &PreparedDataset) -> PreparationSummary {
    PreparationSummary {
        businesses: dataset.meta.total_businesses,
        reviews: dataset.meta.total_reviews,
        rejected: dataset.rejected.total,
        max_length: dataset.meta.max_length,
    }
}
