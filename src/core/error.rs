//! Error types for `Libretto`.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected user input. Raised by the input layer and never seen by the aggregator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Value is not a number.
    #[error("'{value}' is not a valid number")]
    InvalidNumber {
        /// Raw input.
        value: String,
    },

    /// Grade outside 18..=31.
    #[error("Grade must be between 18 and 31 (or 30L), got {grade}")]
    GradeOutOfRange {
        /// Parsed grade.
        grade: i64,
    },

    /// Exam name is blank.
    #[error("Exam name cannot be empty")]
    EmptyName,

    /// Credits must be strictly positive.
    #[error("Credits must be a positive integer")]
    NonPositiveCredits,

    /// Date not in `DD-MM-YYYY` form or not a calendar date.
    #[error("Invalid date '{value}', expected DD-MM-YYYY")]
    InvalidDate {
        /// Raw input.
        value: String,
    },

    /// Selection index outside the listed range.
    #[error("Invalid choice {choice}, expected a number between {min} and {max}")]
    ChoiceOutOfRange {
        /// Parsed choice.
        choice: i64,
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
    },

    /// Coefficient is NaN or infinite.
    #[error("Coefficient must be a finite number, got '{value}'")]
    NonFiniteCoefficient {
        /// Raw input.
        value: String,
    },
}

/// Failure reading or writing the records file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Records file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File content is not a valid record state.
    #[error("Malformed records file {}: {source}", path.display())]
    Json {
        /// Records file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// File parses but an exam holds values outside the allowed ranges.
    #[error("Invalid exam '{name}' in {}: {reason}", path.display())]
    InvalidRecord {
        /// Records file path.
        path: PathBuf,
        /// Offending exam name.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Failure of a session operation.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The selected exam does not exist; nothing was changed.
    #[error("Invalid choice: exam {index} does not exist ({len} available)")]
    IndexOutOfRange {
        /// 1-based index requested.
        index: usize,
        /// Number of selectable exams.
        len: usize,
    },

    /// Persisting the change failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
