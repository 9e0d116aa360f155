//! Request and response bodies
//!
//! Amounts arrive as plain decimals in the configured reporting currency and
//! are validated before they reach the engine.

pub mod analytics;
pub mod policy;
pub mod premium;

use rust_decimal::Decimal;
use validator::ValidationError;

/// Rejects negative amounts
pub(crate) fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}
