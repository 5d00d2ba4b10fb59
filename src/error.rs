//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating, storing,
//! importing and reporting payroll records.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::Validation {
///     field: "regular_hours".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid value for 'regular_hours': must not be negative");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayrollError {
    /// An input value was negative, non-numeric, out of range or missing.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A referenced entity does not exist.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// The kind of entity (e.g. "Employee").
        entity: String,
        /// The identifier or lookup key that was not found.
        key: String,
    },

    /// Arithmetic produced a result outside the calculator's valid range.
    #[error("Computation error: {message}")]
    Computation {
        /// A description of the computation error.
        message: String,
    },

    /// A record's figures are inconsistent with each other.
    #[error("Data integrity error{}: {message}", record_label(.record_id))]
    DataIntegrity {
        /// The record the inconsistency was found on, when known.
        record_id: Option<u64>,
        /// A description of the inconsistency.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or held invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The record store could not serve the request.
    #[error("Repository error: {message}")]
    Repository {
        /// A description of the repository failure.
        message: String,
    },

    /// An export artifact could not be written.
    #[error("Export failed: {message}")]
    Export {
        /// A description of the export failure.
        message: String,
    },
}

fn record_label(record_id: &Option<u64>) -> String {
    match record_id {
        Some(id) => format!(" in record {}", id),
        None => String::new(),
    }
}

impl PayrollError {
    /// Shorthand for a [`PayrollError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`PayrollError::NotFound`] error.
    pub fn not_found(entity: impl Into<String>, key: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.to_string(),
        }
    }

    /// Returns true for errors a batch should record and skip past.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NotFound { .. } | Self::DataIntegrity { .. }
        )
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
