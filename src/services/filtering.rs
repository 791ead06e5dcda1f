use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::config::FilterSettings;
use crate::domain::{BusinessLine, NamedReview, ReviewLine};
use crate::files;

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSummary {
    pub businesses_kept: usize,
    pub businesses_total: usize,
    pub reviews_kept: usize,
    pub reviews_total: usize,
    pub output: PathBuf,
}

/// Keeps reviews of businesses with enough reviews, keyed by business name
pub struct FilterService {
    settings: FilterSettings,
}

impl FilterService {
    pub fn new(settings: FilterSettings) -> Self {
        Self { settings }
    }

    pub fn run(
        &self,
        businesses_path: &Path,
        reviews_path: &Path,
        output: Option<PathBuf>,
    ) -> Result<FilterSummary> {
        let min_reviews = self.settings.min_reviews;
        info!("=== Filtering reviews (n >= {}) ===\n", min_reviews);

        // Step 1: Collect businesses meeting the review count
        let (businesses, businesses_total) = files::read_json_lines::<BusinessLine>(businesses_path)?;
        let valid = self.valid_businesses(&businesses);
        info!(
            "  → {}/{} businesses met n >= {} criteria",
            valid.len(),
            businesses_total,
            min_reviews
        );

        // Step 2: Stream reviews, holding on to kept ones only
        let mut kept = Vec::new();
        let reviews_total = files::for_each_json_line(reviews_path, |review: ReviewLine| {
            if let Some(named) = attach_name(review, &valid) {
                kept.push(named);
            }
        })?;

        // Step 3: Write the filtered array
        let output = match output {
            Some(path) => path,
            None => default_output_path(reviews_path, min_reviews)?,
        };
        files::write_json(&output, &kept)?;
        info!(
            "  → {}/{} reviews met n >= {} criteria, written to {}",
            kept.len(),
            reviews_total,
            min_reviews,
            output.display()
        );

        Ok(FilterSummary {
            businesses_kept: valid.len(),
            businesses_total,
            reviews_kept: kept.len(),
            reviews_total,
            output,
        })
    }

    /// Business id → name for every business with at least `min_reviews`
    pub fn valid_businesses(&self, businesses: &[BusinessLine]) -> HashMap<String, String> {
        businesses
            .iter()
            .filter(|b| b.review_count.is_some_and(|n| n >= self.settings.min_reviews))
            .map(|b| (b.business_id.clone(), b.name.clone()))
            .collect()
    }
}

/// Swap the business id for its name, or `None` if the business was not kept
pub fn attach_name(review: ReviewLine, valid: &HashMap<String, String>) -> Option<NamedReview> {
    let name = valid.get(&review.business_id)?;
    Some(NamedReview {
        stars: review.stars,
        date: review.date,
        name: name.clone(),
    })
}

/// `filt-<n>_<reviews file name>` next to the reviews file
pub fn default_output_path(reviews_path: &Path, min_reviews: u64) -> Result<PathBuf> {
    let file_name = reviews_path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid reviews path: {}", reviews_path.display()))?;

    Ok(reviews_path.with_file_name(format!("filt-{}_{}", min_reviews, file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn business(id: &str, name: &str, count: u64) -> BusinessLine {
        BusinessLine {
            business_id: id.to_string(),
            name: name.to_string(),
            review_count: Some(count),
            stars: None,
        }
    }

    fn review(id: &str, stars: f64, date: &str) -> ReviewLine {
        ReviewLine {
            business_id: id.to_string(),
            stars: json!(stars),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_valid_businesses_threshold_inclusive() {
        let service = FilterService::new(FilterSettings { min_reviews: 20 });
        let valid = service.valid_businesses(&[
            business("a", "Alpha", 20),
            business("b", "Beta", 19),
            business("c", "Gamma", 500),
        ]);

        assert_eq!(valid.len(), 2);
        assert_eq!(valid.get("a").map(String::as_str), Some("Alpha"));
        assert!(!valid.contains_key("b"));
    }

    #[test]
    fn test_attach_name() {
        let valid: HashMap<String, String> = [("a".to_string(), "Alpha".to_string())].into();

        assert_eq!(
            attach_name(review("a", 4.0, "2014-01-01"), &valid),
            Some(NamedReview {
                stars: json!(4.0),
                date: "2014-01-01".to_string(),
                name: "Alpha".to_string(),
            })
        );
        assert_eq!(attach_name(review("z", 1.0, "2014-01-01"), &valid), None);
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("data/reviews.json"), 500).unwrap();
        assert_eq!(path, PathBuf::from("data/filt-500_reviews.json"));
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = TempDir::new().unwrap();
        let businesses = dir.path().join("businesses.json");
        let reviews = dir.path().join("reviews.json");

        std::fs::write(
            &businesses,
            concat!(
                r#"{"business_id": "a", "name": "Alpha", "review_count": 3, "stars": 4.0}"#,
                "\n",
                r#"{"business_id": "b", "name": "Beta", "review_count": 1}"#,
                "\n",
                "garbage\n",
            ),
        )
        .unwrap();
        std::fs::write(
            &reviews,
            concat!(
                r#"{"business_id": "a", "stars": 5, "date": "2014-01-01", "text": "great"}"#,
                "\n",
                r#"{"business_id": "b", "stars": 2, "date": "2014-01-02"}"#,
                "\n",
                r#"{"business_id": "a", "stars": 3, "date": "2014-01-03"}"#,
                "\n",
            ),
        )
        .unwrap();

        let service = FilterService::new(FilterSettings { min_reviews: 2 });
        let summary = service.run(&businesses, &reviews, None).unwrap();

        assert_eq!(summary.businesses_kept, 1);
        assert_eq!(summary.businesses_total, 3);
        assert_eq!(summary.reviews_kept, 2);
        assert_eq!(summary.reviews_total, 3);
        assert_eq!(summary.output, dir.path().join("filt-2_reviews.json"));

        let written: Value = files::read_json(&summary.output).unwrap();
        assert_eq!(written[0]["name"], json!("Alpha"));
        assert_eq!(written[1]["date"], json!("2014-01-03"));
        assert!(written[0].get("business_id").is_none());
    }
}
