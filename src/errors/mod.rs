use anyhow::Context as _;
use serde::Serialize;
use thiserror::Error;

/// Reasons a single review is excluded at the input boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
    #[error("stars value {0} is outside the 0-5 range")]
    StarsOutOfRange(f64),
    #[error("unparseable date `{0}`")]
    UnparseableDate(String),
}

impl RecordError {
    pub fn kind(&self) -> RejectionKind {
        match self {
            RecordError::NotAnObject => RejectionKind::NotAnObject,
            RecordError::MissingField(_) => RejectionKind::MissingField,
            RecordError::InvalidField { .. } => RejectionKind::InvalidField,
            RecordError::StarsOutOfRange(_) => RejectionKind::StarsOutOfRange,
            RecordError::UnparseableDate(_) => RejectionKind::UnparseableDate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectionKind {
    NotAnObject,
    MissingField,
    InvalidField,
    StarsOutOfRange,
    UnparseableDate,
}

impl RejectionKind {
    pub fn as_str(&self) -> &str {
        match self {
            RejectionKind::NotAnObject => "not an object",
            RejectionKind::MissingField => "missing field",
            RejectionKind::InvalidField => "invalid field",
            RejectionKind::StarsOutOfRange => "stars out of range",
            RejectionKind::UnparseableDate => "unparseable date",
        }
    }
}

/// Add context to file read errors
pub fn read_context(path: &str) -> String {
    format!("Failed to read from: {}", path)
}

/// Add context to file write errors
pub fn write_context(path: &str) -> String {
    format!("Failed to write to: {}", path)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Wrap result with read context
pub fn with_read_context<T, E>(result: Result<T, E>, path: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.with_context(|| read_context(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_kinds() {
        assert_eq!(
            RecordError::MissingField("date").kind(),
            RejectionKind::MissingField
        );
        assert_eq!(
            RecordError::UnparseableDate("x".to_string()).kind(),
            RejectionKind::UnparseableDate
        );
    }

    #[test]
    fn test_record_error_messages() {
        let err = RecordError::InvalidField {
            field: "stars",
            reason: "expected a number".to_string(),
        };
        assert_eq!(err.to_string(), "invalid field `stars`: expected a number");
    }

    #[test]
    fn test_context_messages() {
        assert_eq!(read_context("a.json"), "Failed to read from: a.json");
        assert_eq!(parse_context("JSON"), "Failed to parse JSON");
    }
}
