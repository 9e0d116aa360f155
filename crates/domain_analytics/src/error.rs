//! Analytics errors

use thiserror::Error;

use core_kernel::MoneyError;
use domain_billing::BillingError;
use domain_policy::PolicyError;

/// Errors that can occur while aggregating a portfolio
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A record is not in the reporting currency
    #[error("Calculation error: {0}")]
    Money(#[from] MoneyError),

    /// Premium mode table lookup failed
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// A payment record failed validation
    #[error(transparent)]
    Payment(#[from] BillingError),
}
