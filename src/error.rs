//! Error types for the driver pay engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur in the store layer and at the
//! API boundary. Calculation and aggregation are total functions and never
//! produce errors.

use thiserror::Error;

/// The main error type for the driver pay engine.
///
/// All store and API operations return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use driver_pay_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     id: "a1b2c3".to_string(),
/// };
/// assert_eq!(error.to_string(), "No shift record with id 'a1b2c3'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or out-of-range input caught at the API boundary before
    /// it reaches the calculator.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// I/O or network failure while creating, listing, deleting or wiping.
    #[error("Persistence failure: {message}")]
    Persistence {
        /// A description of the underlying failure.
        message: String,
    },

    /// A delete targeted a record id that does not exist.
    #[error("No shift record with id '{id}'")]
    NotFound {
        /// The id that was not found.
        id: String,
    },

    /// The pricing configuration could not be fetched and no cached value
    /// exists.
    #[error("Pricing configuration unavailable: {message}")]
    ConfigUnavailable {
        /// A description of why the configuration is unavailable.
        message: String,
    },
}

impl EngineError {
    /// Creates a [`EngineError::Persistence`] from any displayable cause.
    pub fn persistence(cause: impl std::fmt::Display) -> Self {
        EngineError::Persistence {
            message: cause.to_string(),
        }
    }

    /// Creates a [`EngineError::Validation`] for the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
