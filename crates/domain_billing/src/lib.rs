//! Billing Domain - Premium Payments and Due-Date Rollover
//!
//! This crate decides whether a premium payment discharges the installment
//! due and, if it does, advances the policy's next due date by exactly one
//! billing period.
//!
//! # Rollover Rule
//!
//! - `total = amount_paid + late_fee - discount`
//! - a payment is *full* when `total >= premium_amount` (inclusive)
//! - a full payment on a recurring mode moves the due date forward by one
//!   period using calendar-month addition clamped to month end
//! - partial payments and SINGLE-mode policies never move the due date
//!
//! The same rule backs both the live preview shown while a payment is being
//! drafted and the commit that produces the updated policy for persistence.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{PaymentRolloverCalculator, PremiumPayment};
//!
//! let calculator = PaymentRolloverCalculator::new(modes);
//! let preview = calculator.evaluate_payment(&policy, &payment)?;
//! let committed = calculator.commit(&policy, payment)?;
//! repository.save(committed.policy, committed.payment)?;
//! ```

pub mod payment;
pub mod rollover;
pub mod error;

pub use payment::{PremiumPayment, PaymentMethod};
pub use rollover::{compute_total, PaymentRolloverCalculator, DueDatePreview, CommittedPayment};
pub use error::BillingError;
