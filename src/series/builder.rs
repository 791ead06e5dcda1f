use std::collections::HashMap;

use log::debug;

use super::types::{BusinessSeries, SeriesMap};
use crate::domain::Record;
use crate::stats::{Histogram, cumulative_average, histogram::STAR_BUCKET_EDGES, mean};

/// Group reviews by business and prepare one series per business.
pub fn group_and_prepare(records: Vec<Record>) -> SeriesMap {
    SeriesBuilder::default().build(records)
}

pub struct SeriesBuilder {
    bucket_edges: Vec<f64>,
}

impl SeriesBuilder {
    pub fn new(bucket_edges: Vec<f64>) -> Self {
        Self { bucket_edges }
    }

    pub fn build(&self, records: Vec<Record>) -> SeriesMap {
        let groups = partition_by_key(records);
        debug!("Partitioned reviews into {} businesses", groups.len());

        let mut map = SeriesMap::new();
        for series in groups
            .into_iter()
            .filter_map(|(key, group)| self.prepare_group(key, group))
        {
            map.push(series);
        }
        map
    }

    /// `None` for an empty group, which has no average to offer
    fn prepare_group(&self, key: String, mut records: Vec<Record>) -> Option<BusinessSeries> {
        sort_by_date(&mut records);

        let stars: Vec<f64> = records.iter().map(|r| r.stars).collect();
        let average = mean(&stars)?;
        let cumulative_average = cumulative_average(&stars);
        let histogram = Histogram::from_values(&self.bucket_edges, stars.iter().copied());

        Some(BusinessSeries {
            key,
            records,
            average,
            cumulative_average,
            histogram,
        })
    }
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self::new(STAR_BUCKET_EDGES.to_vec())
    }
}

/// Split records by business key, keeping first-seen key order and
/// insertion order within each group. Never yields an empty group.
fn partition_by_key(records: Vec<Record>) -> Vec<(String, Vec<Record>)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Record>)> = Vec::new();

    for record in records {
        match positions.get(&record.business_key) {
            Some(&idx) => groups[idx].1.push(record),
            None => {
                positions.insert(record.business_key.clone(), groups.len());
                groups.push((record.business_key.clone(), vec![record]));
            }
        }
    }

    groups
}

// `sort_by_key` is stable, so equal dates keep their input order.
fn sort_by_date(records: &mut [Record]) {
    records.sort_by_key(|r| r.date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_review_date;

    fn review(name: &str, date: &str, stars: f64) -> Record {
        Record::new(name, parse_review_date(date).unwrap(), stars)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_two_business_scenario() {
        let records = vec![
            review("A", "2014-01-01", 5.0),
            review("A", "2014-01-02", 1.0),
            review("B", "2014-01-01", 3.0),
        ];

        let map = group_and_prepare(records);

        assert_eq!(map.len(), 2);
        let a = map.get("A").unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.average(), 3.0);
        assert_eq!(a.cumulative_average(), &[5.0, 3.0]);

        let b = map.get("B").unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(b.average(), 3.0);
        assert_eq!(b.cumulative_average(), &[3.0]);
    }

    #[test]
    fn test_empty_group_yields_no_series() {
        let builder = SeriesBuilder::default();
        assert!(builder.prepare_group("A".to_string(), Vec::new()).is_none());

        let series = builder
            .prepare_group("A".to_string(), vec![review("A", "2014-01-01", 4.0)])
            .unwrap();
        assert_eq!(series.average(), 4.0);
    }

    #[test]
    fn test_records_sorted_before_averaging() {
        let records = vec![
            review("A", "2014-03-01", 1.0),
            review("A", "2014-01-01", 5.0),
            review("A", "2014-02-01", 3.0),
        ];

        let map = group_and_prepare(records);
        let a = map.get("A").unwrap();

        let stars: Vec<f64> = a.stars().collect();
        assert_eq!(stars, vec![5.0, 3.0, 1.0]);
        assert_eq!(a.cumulative_average(), &[5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let records = vec![
            review("A", "2014-01-02", 2.0),
            review("A", "2014-01-01", 4.0),
            review("A", "2014-01-01", 1.0),
        ];

        let map = group_and_prepare(records);
        let stars: Vec<f64> = map.get("A").unwrap().stars().collect();
        assert_eq!(stars, vec![4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_first_seen_key_order() {
        let records = vec![
            review("Zed", "2014-01-01", 1.0),
            review("Alpha", "2014-01-01", 1.0),
            review("Zed", "2014-01-02", 1.0),
            review("Mid", "2014-01-01", 1.0),
        ];

        let map = group_and_prepare(records);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["Zed", "Alpha", "Mid"]);
    }

    #[test]
    fn test_every_record_kept_once() {
        let records: Vec<Record> = (0..50)
            .map(|i| {
                let name = format!("biz-{}", i % 7);
                let date = format!("2014-01-{:02}", (i % 28) + 1);
                review(&name, &date, (i % 6) as f64)
            })
            .collect();

        let map = group_and_prepare(records);
        assert_eq!(map.total_records(), 50);
        assert!(map.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_idempotent_on_sorted_input() {
        let records = vec![
            review("A", "2014-01-01", 5.0),
            review("A", "2014-01-02", 2.0),
            review("B", "2014-01-03", 4.0),
        ];

        let first = group_and_prepare(records);
        let flattened: Vec<Record> = first.iter().flat_map(|s| s.records().to_vec()).collect();
        let second = group_and_prepare(flattened);

        assert_eq!(first, second);
    }

    #[test]
    fn test_last_cumulative_matches_average() {
        let records: Vec<Record> = (1..=40)
            .map(|day| review("A", &format!("2014-02-{:02}", (day % 28) + 1), ((day * 3) % 5 + 1) as f64))
            .collect();

        let map = group_and_prepare(records);
        let a = map.get("A").unwrap();
        assert_close(*a.cumulative_average().last().unwrap(), a.average());
        assert_eq!(a.cumulative_average().len(), a.len());
    }

    #[test]
    fn test_histogram_built_per_business() {
        let records = vec![
            review("A", "2014-01-01", 5.0),
            review("A", "2014-01-02", 5.0),
            review("A", "2014-01-03", 1.0),
        ];

        let map = group_and_prepare(records);
        assert_eq!(map.get("A").unwrap().histogram().counts(), vec![1, 0, 0, 0, 2]);
    }

    #[test]
    fn test_empty_input() {
        let map = group_and_prepare(Vec::new());
        assert!(map.is_empty());
        assert!(map.get("A").is_none());
    }
}
