//! Conditions reported by the load table builder.

use thiserror::Error;

/// Why a source could not be turned into a table.
///
/// Neither kind escapes the builder as a hard failure: the caller always
/// receives a table (empty on error) alongside the condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The backing file is missing, unreadable, or not a parseable document.
    #[error("source {path} is unavailable: {reason}")]
    SourceUnavailable { path: String, reason: String },

    /// A record lacks a required field or carries a value of the wrong type.
    #[error("record {index} is malformed: field '{field}' {reason}")]
    MalformedRecord {
        index: usize,
        field: String,
        reason: String,
    },
}

impl LoadError {
    pub fn unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::SourceUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(index: usize, field: &str, reason: impl Into<String>) -> Self {
        LoadError::MalformedRecord {
            index,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_record_and_field() {
        let e = LoadError::malformed(3, "rateCents", "is missing");
        assert_eq!(e.to_string(), "record 3 is malformed: field 'rateCents' is missing");

        let e = LoadError::unavailable("data.json", "No such file or directory");
        assert!(e.to_string().contains("data.json"));
    }
}
