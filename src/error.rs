//! Error types for the Angka Kredit engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading credit tables,
//! validating records and building reports.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Angka Kredit engine.
///
/// Unknown rating or job-level labels and missing promotion thresholds are
/// deliberately absent here: they degrade to zero values with a warning.
///
/// # Example
///
/// ```
/// use angka_kredit::error::CreditError;
///
/// let error = CreditError::ConfigNotFound {
///     path: "/missing/ranks.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/ranks.yaml");
/// ```
#[derive(Debug, Error)]
pub enum CreditError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or is inconsistent.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An assessment period starts after it ends.
    #[error("Invalid assessment period: start {start} is after end {end}")]
    InvalidPeriod {
        /// The period start date.
        start: NaiveDate,
        /// The period end date.
        end: NaiveDate,
    },

    /// No employee exists with the requested identifier.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// A record was rejected by the store.
    #[error("Invalid record field '{field}': {message}")]
    InvalidRecord {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A document could not be rendered.
    #[error("Render error: {message}")]
    RenderError {
        /// A description of the render failure.
        message: String,
    },
}

/// A type alias for Results that return CreditError.
pub type CreditResult<T> = Result<T, CreditError>;
