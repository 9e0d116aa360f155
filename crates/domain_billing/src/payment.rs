//! Premium payment records
//!
//! A payment is created once per recorded premium and is immutable from the
//! engine's point of view. It references its policy by id only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PaymentId, PolicyId};

use crate::error::BillingError;
use crate::rollover::compute_total;

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash at the agency counter
    Cash,
    /// Check/cheque
    Cheque,
    /// Bank transfer (NEFT/RTGS/IMPS)
    BankTransfer,
    /// UPI
    Upi,
    /// Credit or debit card
    Card,
    /// Standing instruction / auto-debit
    AutoDebit,
    /// Paid through the insurer's portal
    Online,
}

/// A recorded premium payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumPayment {
    /// Unique identifier
    pub id: PaymentId,
    /// Policy the payment is for
    pub policy_id: PolicyId,
    /// Date the payment was made
    pub payment_date: NaiveDate,
    /// Gross amount received
    pub amount_paid: Money,
    /// Late fee collected on top of the premium
    pub late_fee: Money,
    /// Discount granted against the premium
    pub discount: Money,
    /// Payment method
    pub method: Option<PaymentMethod>,
    /// External reference (cheque number, UTR, receipt number)
    pub reference: Option<String>,
}

impl PremiumPayment {
    /// Creates a payment with no late fee or discount
    ///
    /// # Arguments
    ///
    /// * `policy_id` - Policy being paid
    /// * `payment_date` - Date of payment
    /// * `amount_paid` - Gross amount received
    pub fn new(policy_id: PolicyId, payment_date: NaiveDate, amount_paid: Money) -> Self {
        let zero = Money::zero(amount_paid.currency());
        Self {
            id: PaymentId::new_v7(),
            policy_id,
            payment_date,
            amount_paid,
            late_fee: zero,
            discount: zero,
            method: None,
            reference: None,
        }
    }

    pub fn with_late_fee(mut self, late_fee: Money) -> Self {
        self.late_fee = late_fee;
        self
    }

    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Rejects negative components and mixed currencies
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Validation` naming the first negative field, or
    /// a money error if the components are in different currencies.
    pub fn validate(&self) -> Result<(), BillingError> {
        for (field, value) in [
            ("amount_paid", &self.amount_paid),
            ("late_fee", &self.late_fee),
            ("discount", &self.discount),
        ] {
            if value.is_negative() {
                return Err(BillingError::validation(format!(
                    "{} must not be negative, got {}",
                    field,
                    value.amount()
                )));
            }
        }

        self.amount_paid.ensure_same_currency(&self.late_fee)?;
        self.amount_paid.ensure_same_currency(&self.discount)?;
        Ok(())
    }

    /// Net amount settled by this payment after validation
    ///
    /// May be negative when the discount exceeds the amount paid plus fee.
    pub fn settled_total(&self) -> Result<Money, BillingError> {
        self.validate()?;
        compute_total(&self.amount_paid, &self.late_fee, &self.discount)
    }
}
