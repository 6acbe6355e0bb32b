//! Error types for the billing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Business-rule findings (invalid recipient numbers, total mismatches and
//! the like) are *not* errors: they are collected as
//! [`ValidationIssue`](crate::validation::ValidationIssue) values and never
//! thrown. `EngineError` covers structural failures only: malformed inputs,
//! collaborator failures and I/O.

use thiserror::Error;

/// The main error type for the billing engine.
///
/// # Example
///
/// ```
/// use billing_engine::error::EngineError;
///
/// let error = EngineError::InvalidYearMonth {
///     value: "2025/04".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid year-month '2025/04': expected YYYY-MM");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A year-month string did not match the `YYYY-MM` contract.
    #[error("Invalid year-month '{value}': expected YYYY-MM")]
    InvalidYearMonth {
        /// The offending input.
        value: String,
    },

    /// The external data provider failed to produce a required collection.
    #[error("Data provider error: {message}")]
    DataProvider {
        /// A description of the collaborator failure.
        message: String,
    },

    /// Writing an export file failed.
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV writer failed while building the wage report.
    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
