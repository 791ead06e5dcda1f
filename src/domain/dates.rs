use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::errors::RecordError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a review date once so records can be ordered by value.
///
/// Accepts plain `YYYY-MM-DD` dates as well as RFC 3339 and naive ISO
/// datetimes. Anything else is rejected; it is never mapped to the epoch.
pub fn parse_review_date(date_str: &str) -> Result<NaiveDateTime, RecordError> {
    let trimmed = date_str.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(start_of_day(date));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }

    Err(RecordError::UnparseableDate(date_str.to_string()))
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_date() {
        let parsed = parse_review_date("2014-01-02").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2014, 1, 2).unwrap());
    }

    #[test]
    fn test_datetime_formats() {
        assert!(parse_review_date("2014-01-02T10:00:00").is_ok());
        assert!(parse_review_date("2014-01-02 10:00:00").is_ok());
        assert!(parse_review_date("2014-01-02T10:00:00+02:00").is_ok());
    }

    #[test]
    fn test_dates_order_by_value() {
        let earlier = parse_review_date("2013-12-31").unwrap();
        let later = parse_review_date("2014-01-01").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = parse_review_date("yesterday");
        assert!(matches!(result, Err(RecordError::UnparseableDate(_))));
        assert!(parse_review_date("").is_err());
        assert!(parse_review_date("2014-13-40").is_err());
    }
}
