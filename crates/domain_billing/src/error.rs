//! Billing domain errors

use thiserror::Error;

use core_kernel::{MoneyError, PaymentId, PolicyId, TemporalError};
use domain_policy::PolicyError;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Payment input rejected before any computation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payment recorded against a different policy
    #[error("Payment {payment} belongs to policy {payment_policy}, not {policy}")]
    PolicyMismatch {
        payment: PaymentId,
        payment_policy: PolicyId,
        policy: PolicyId,
    },

    /// Premium mode could not be resolved
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Calculation error
    #[error("Calculation error: {0}")]
    Money(#[from] MoneyError),

    /// Due date could not be advanced
    #[error("Date error: {0}")]
    Temporal(#[from] TemporalError),
}

impl BillingError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        BillingError::Validation(message.into())
    }

    /// True when the failure comes from the premium mode table
    pub fn is_configuration(&self) -> bool {
        matches!(self, BillingError::Policy(PolicyError::Configuration(_)))
    }
}
