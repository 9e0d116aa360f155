//! Policy domain errors

use thiserror::Error;

use core_kernel::{MoneyError, TemporalError};

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Premium mode table is incomplete or references an unknown mode
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Financial calculation error
    #[error("Financial error: {0}")]
    Money(#[from] MoneyError),

    /// Date arithmetic error
    #[error("Date error: {0}")]
    Temporal(#[from] TemporalError),
}

impl PolicyError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        PolicyError::Configuration(message.into())
    }

    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PolicyError::Validation(message.into())
    }
}
