use std::collections::BTreeMap;

use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use super::dates::parse_review_date;
use super::models::Record;
use crate::errors::{RecordError, RejectionKind};

const KEY_FIELD: &str = "name";
const DATE_FIELD: &str = "date";
const STARS_FIELD: &str = "stars";

/// Turns raw JSON reviews into `Record`s, rejecting malformed ones
#[derive(Debug, Clone)]
pub struct ReviewValidator {
    min_stars: f64,
    max_stars: f64,
}

impl ReviewValidator {
    pub fn new(min_stars: f64, max_stars: f64) -> Self {
        Self {
            min_stars,
            max_stars,
        }
    }

    pub fn validate(&self, raw: &Value) -> Result<Record, RecordError> {
        let object = raw.as_object().ok_or(RecordError::NotAnObject)?;

        let business_key = extract_key(object)?;
        let date = parse_review_date(extract_str(object, DATE_FIELD)?)?;
        let stars = self.extract_stars(object)?;

        Ok(Record::new(business_key, date, stars))
    }

    /// Validate every element, keeping input order for accepted records
    pub fn validate_all(&self, raw: &[Value]) -> (Vec<Record>, RejectionReport) {
        let mut records = Vec::with_capacity(raw.len());
        let mut report = RejectionReport::default();

        for (idx, value) in raw.iter().enumerate() {
            match self.validate(value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    debug!("Rejected review #{}: {}", idx, e);
                    report.record(&e);
                }
            }
        }

        report.log_summary(raw.len());
        (records, report)
    }

    fn extract_stars(&self, object: &Map<String, Value>) -> Result<f64, RecordError> {
        let value = object
            .get(STARS_FIELD)
            .filter(|v| !v.is_null())
            .ok_or(RecordError::MissingField(STARS_FIELD))?;

        let stars = value.as_f64().ok_or_else(|| RecordError::InvalidField {
            field: STARS_FIELD,
            reason: format!("expected a number, got {}", value),
        })?;

        if !self.in_range(stars) {
            return Err(RecordError::StarsOutOfRange(stars));
        }

        Ok(stars)
    }

    fn in_range(&self, stars: f64) -> bool {
        stars.is_finite() && stars >= self.min_stars && stars <= self.max_stars
    }
}

fn extract_key(object: &Map<String, Value>) -> Result<String, RecordError> {
    let key = extract_str(object, KEY_FIELD)?;
    if key.trim().is_empty() {
        return Err(RecordError::InvalidField {
            field: KEY_FIELD,
            reason: "empty business name".to_string(),
        });
    }
    Ok(key.to_string())
}

fn extract_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, RecordError> {
    let value = object
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or(RecordError::MissingField(field))?;

    value.as_str().ok_or_else(|| RecordError::InvalidField {
        field,
        reason: format!("expected a string, got {}", value),
    })
}

/// Count of rejected reviews per reason
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionReport {
    pub total: usize,
    pub by_kind: BTreeMap<RejectionKind, usize>,
}

impl RejectionReport {
    pub fn record(&mut self, error: &RecordError) {
        self.total += 1;
        *self.by_kind.entry(error.kind()).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, kind: RejectionKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    fn log_summary(&self, seen: usize) {
        if self.is_empty() {
            return;
        }

        warn!("Rejected {}/{} malformed reviews", self.total, seen);
        for (kind, count) in &self.by_kind {
            warn!("  → {}: {}", kind.as_str(), count);
        }
    }
}
