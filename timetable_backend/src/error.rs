//! Error types for timetable import, parsing and projection.
//!
//! Every failure aborts the current conversion: a malformed cell is a defect
//! in the source document, so there is no degraded or partial result.

use crate::core::domain::Semester;

/// Result type for timetable operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Error type for timetable operations
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Classification error: unrecognised unit '{unit}' in week expression '{expression}'")]
    Classification { unit: String, expression: String },

    #[error("Range error: {0}")]
    Range(String),

    #[error(
        "No semester start known for {year} {semester} (index {index}, {available} start dates configured)"
    )]
    SemesterOutOfRange {
        year: i32,
        semester: Semester,
        index: i64,
        available: usize,
    },

    #[error("Unknown course period ordinal: {0}")]
    UnknownPeriod(u8),

    #[error("Duplicate course entry: {0}")]
    DuplicateEntry(String),

    #[error("Content for course '{content}' cannot be added to entry '{entry}'")]
    EntryMismatch { entry: String, content: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ScheduleError {
    /// Shorthand for a format error carrying the offending raw text.
    pub fn format(message: impl Into<String>) -> Self {
        ScheduleError::Format(message.into())
    }

    /// Shorthand for a range error carrying the offending token.
    pub fn range(message: impl Into<String>) -> Self {
        ScheduleError::Range(message.into())
    }
}
