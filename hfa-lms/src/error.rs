/// Error types for the height-for-age core
use chrono::NaiveDate;
use thiserror::Error;

use crate::observation::Sex;

/// Main error type for assessment operations
#[derive(Error, Debug)]
pub enum HfaError {
    /// Observation date precedes the birth date
    #[error("observation date {as_of} precedes birth date {birth}")]
    InvalidDate { birth: NaiveDate, as_of: NaiveDate },

    /// No reference row for the subject's age under exact lookup
    #[error("age outside reference range: no {sex} reference row for {age_months} months")]
    NotFound { sex: Sex, age_months: u32 },

    /// Age falls outside the configured assessment window
    #[error("age outside reference range: {age_months} months is not within {min_months}..={max_months}")]
    AgeOutOfRange {
        age_months: f64,
        min_months: u32,
        max_months: u32,
    },

    /// Non-positive or non-finite input to the LMS formula
    #[error("cannot compute z-score: {0}")]
    Domain(String),

    /// Reference table failed validation
    #[error("invalid reference table: {0}")]
    InvalidReference(String),

    /// Threshold table failed validation
    #[error("invalid threshold table: {0}")]
    InvalidThresholds(String),

    /// Assessment configuration is inconsistent
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unrecognised sex label
    #[error("unknown sex: {0}")]
    UnknownSex(String),

    /// Failed to parse CSV data
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to read a reference file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using HfaError
pub type Result<T> = std::result::Result<T, HfaError>;
