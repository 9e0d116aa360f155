//! Due-date rollover
//!
//! Decides whether a payment discharges the installment due for the current
//! cycle and, if so, where the next cycle starts. Every operation here is a
//! pure function of its arguments: the preview shown while a payment is being
//! typed and the commit that follows use the same rule and produce the same
//! answer for the same inputs.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use core_kernel::{add_months_clamped, Money};
use domain_policy::{Policy, PremiumModeConfig};

use crate::error::BillingError;
use crate::payment::PremiumPayment;

/// Net amount settled: `amount_paid + late_fee - discount`
///
/// No lower bound is applied; a discount larger than the rest yields a
/// negative total.
///
/// # Errors
///
/// Returns a money error if the components are in different currencies.
pub fn compute_total(amount_paid: &Money, late_fee: &Money, discount: &Money) -> Result<Money, BillingError> {
    Ok(amount_paid.checked_add(late_fee)?.checked_sub(discount)?)
}

/// Outcome of evaluating a payment against a policy's due-date state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueDatePreview {
    /// Due date of the cycle being paid
    pub current_due_date: NaiveDate,
    /// Due date after this payment
    pub next_due_date: NaiveDate,
    /// Whether the total covers the installment
    pub is_full_payment: bool,
    /// Net amount settled
    pub total: Money,
    /// Installment amount the total was compared against
    pub expected_amount: Money,
}

impl DueDatePreview {
    /// True when the payment moves the due date
    pub fn advances(&self) -> bool {
        self.next_due_date != self.current_due_date
    }
}

/// A payment ready to be persisted together with its policy update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommittedPayment {
    /// The payment to insert
    pub payment: PremiumPayment,
    /// Net amount settled
    pub total: Money,
    /// Rollover decision, absent when the policy has no due-date state
    pub preview: Option<DueDatePreview>,
    /// The policy with `next_due_date` replaced per the rollover rule
    pub policy: Policy,
}

/// Applies the rollover rule using a shared premium mode table
#[derive(Debug, Clone)]
pub struct PaymentRolloverCalculator {
    modes: Arc<PremiumModeConfig>,
}

impl PaymentRolloverCalculator {
    /// Creates a calculator over a validated premium mode table
    pub fn new(modes: Arc<PremiumModeConfig>) -> Self {
        Self { modes }
    }

    pub fn modes(&self) -> &PremiumModeConfig {
        &self.modes
    }

    /// Evaluates a settled total against the policy's current cycle
    ///
    /// # Arguments
    ///
    /// * `policy` - Policy whose due-date state is read
    /// * `total` - Net amount settled, see [`compute_total`]
    ///
    /// # Returns
    ///
    /// `None` when the policy has no next due date or no premium mode, in
    /// which case the rollover rule does not apply.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the policy's premium mode has no
    /// entry in the table, or a money error if the total and the premium are
    /// in different currencies.
    pub fn evaluate(&self, policy: &Policy, total: &Money) -> Result<Option<DueDatePreview>, BillingError> {
        let (Some(current_due_date), Some(mode)) = (policy.next_due_date, policy.premium_mode) else {
            return Ok(None);
        };

        let entry = self.modes.entry(mode)?;
        let expected_amount = policy.expected_installment(total.currency());
        expected_amount.ensure_same_currency(total)?;

        let is_full_payment = total.amount() >= expected_amount.amount();

        let next_due_date = match (is_full_payment, entry.period_months()) {
            (true, Some(months)) => add_months_clamped(current_due_date, months)?,
            _ => current_due_date,
        };

        debug!(
            policy_id = %policy.id,
            premium_mode = %mode,
            total = %total.amount(),
            expected = %expected_amount.amount(),
            is_full_payment,
            %current_due_date,
            %next_due_date,
            "Evaluated premium rollover"
        );

        Ok(Some(DueDatePreview {
            current_due_date,
            next_due_date,
            is_full_payment,
            total: *total,
            expected_amount,
        }))
    }

    /// Validates a payment and evaluates its settled total
    ///
    /// # Errors
    ///
    /// Returns a validation error for negative payment components, plus the
    /// errors of [`evaluate`](Self::evaluate).
    pub fn evaluate_payment(
        &self,
        policy: &Policy,
        payment: &PremiumPayment,
    ) -> Result<Option<DueDatePreview>, BillingError> {
        let total = payment.settled_total()?;
        self.evaluate(policy, &total)
    }

    /// Applies a recorded payment to the policy
    ///
    /// Returns a new policy value whose `next_due_date` follows the rollover
    /// rule; the input policy is not touched. A policy without due-date state
    /// is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PolicyMismatch` if the payment references another policy,
    /// plus the errors of [`evaluate_payment`](Self::evaluate_payment).
    pub fn commit(&self, policy: &Policy, payment: PremiumPayment) -> Result<CommittedPayment, BillingError> {
        if payment.policy_id != policy.id {
            return Err(BillingError::PolicyMismatch {
                payment: payment.id,
                payment_policy: payment.policy_id,
                policy: policy.id,
            });
        }

        let total = payment.settled_total()?;
        let preview = self.evaluate(policy, &total)?;

        let updated = match &preview {
            Some(p) => policy.clone().with_next_due_date(p.next_due_date),
            None => policy.clone(),
        };

        debug!(
            policy_id = %policy.id,
            payment_id = %payment.id,
            advanced = preview.as_ref().is_some_and(DueDatePreview::advances),
            "Committed premium payment"
        );

        Ok(CommittedPayment {
            payment,
            total,
            preview,
            policy: updated,
        })
    }
}
