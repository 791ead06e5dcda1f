use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One review, validated and immutable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub business_key: String,
    pub date: NaiveDateTime,
    pub stars: f64,
}

impl Record {
    pub fn new(business_key: impl Into<String>, date: NaiveDateTime, stars: f64) -> Self {
        Self {
            business_key: business_key.into(),
            date,
            stars,
        }
    }
}

// --- Yelp academic dataset lines ---

/// Business line from the Yelp academic business file
#[derive(Debug, Deserialize)]
pub struct BusinessLine {
    pub business_id: String,
    pub name: String,
    pub review_count: Option<u64>,
    pub stars: Option<f64>,
}

/// Review line from the Yelp academic review file
#[derive(Debug, Deserialize)]
pub struct ReviewLine {
    pub business_id: String,
    pub stars: serde_json::Value,
    pub date: String,
}

/// Review reduced to what the charts need, keyed by business name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedReview {
    pub stars: serde_json::Value,
    pub date: String,
    pub name: String,
}

/// Business summary used for the n-vs-rating overview
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BusinessSummary {
    pub review_count: Option<f64>,
    pub stars: Option<f64>,
}

impl BusinessSummary {
    pub fn point(&self) -> Option<(f64, f64)> {
        match (self.review_count, self.stars) {
            (Some(n), Some(rating)) if n.is_finite() && rating.is_finite() => Some((n, rating)),
            _ => None,
        }
    }
}
