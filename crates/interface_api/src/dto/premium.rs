//! Premium payment DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Currency, Money, PaymentId, PolicyId};
use domain_billing::{DueDatePreview, PaymentMethod, PremiumPayment};

use super::non_negative;
use super::policy::PolicyRequest;
use crate::error::ApiError;

/// A payment as entered on the payment form
#[derive(Debug, Deserialize, Validate)]
pub struct PaymentRequest {
    pub id: Option<Uuid>,
    /// Policy paid; defaults to the policy sent alongside the payment
    pub policy_id: Option<Uuid>,
    /// Date paid; defaults to today in the configured timezone
    pub payment_date: Option<NaiveDate>,
    #[validate(custom(function = "non_negative"))]
    pub amount_paid: Decimal,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub late_fee: Decimal,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub discount: Decimal,
    pub method: Option<PaymentMethod>,
    #[validate(length(max = 64))]
    pub reference: Option<String>,
}

impl PaymentRequest {
    /// Converts to a domain payment in `currency`
    ///
    /// # Errors
    ///
    /// Returns a validation error when no policy id is given and there is no
    /// policy to default to.
    pub fn into_payment(
        self,
        default_policy: Option<PolicyId>,
        currency: Currency,
        today: NaiveDate,
    ) -> Result<PremiumPayment, ApiError> {
        let policy_id = self
            .policy_id
            .map(PolicyId::from)
            .or(default_policy)
            .ok_or_else(|| ApiError::validation("payment is missing policy_id"))?;

        let mut payment = PremiumPayment::new(
            policy_id,
            self.payment_date.unwrap_or(today),
            Money::new(self.amount_paid, currency),
        )
        .with_late_fee(Money::new(self.late_fee, currency))
        .with_discount(Money::new(self.discount, currency));

        if let Some(id) = self.id {
            payment.id = PaymentId::from(id);
        }
        payment.method = self.method;
        payment.reference = self.reference;
        Ok(payment)
    }
}

/// Live preview while a payment is being typed
#[derive(Debug, Deserialize, Validate)]
pub struct PreviewRequest {
    #[validate(nested)]
    pub policy: PolicyRequest,
    #[validate(custom(function = "non_negative"))]
    pub amount_paid: Decimal,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub late_fee: Decimal,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub discount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Net amount settled
    pub total: Money,
    /// False when the policy has no due date or no premium mode
    pub applicable: bool,
    pub preview: Option<DueDatePreview>,
}

/// Payment to record against a policy
#[derive(Debug, Deserialize, Validate)]
pub struct CommitRequest {
    #[validate(nested)]
    pub policy: PolicyRequest,
    #[validate(nested)]
    pub payment: PaymentRequest,
}
