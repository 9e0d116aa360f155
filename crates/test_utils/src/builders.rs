//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use chrono::NaiveDate;
use core_kernel::{ClientId, Money, PolicyId};
use domain_billing::{PaymentMethod, PremiumPayment};
use domain_policy::{Policy, PolicyStatus, PremiumMode};
use rust_decimal::Decimal;

use crate::fixtures::{MoneyFixtures, TemporalFixtures};

/// Builder for test policies
pub struct TestPolicyBuilder {
    client_id: ClientId,
    policy_number: String,
    insurer: String,
    status: PolicyStatus,
    premium_mode: Option<PremiumMode>,
    premium_amount: Option<Money>,
    annual_premium: Option<Money>,
    sum_assured: Option<Money>,
    next_due_date: Option<NaiveDate>,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPolicyBuilder {
    /// Creates an active quarterly policy due on 2024-03-15
    pub fn new() -> Self {
        Self {
            client_id: ClientId::new(),
            policy_number: "LIC-100234".to_string(),
            insurer: "LIC".to_string(),
            status: PolicyStatus::Active,
            premium_mode: Some(PremiumMode::Quarterly),
            premium_amount: Some(MoneyFixtures::quarterly_premium()),
            annual_premium: None,
            sum_assured: Some(MoneyFixtures::sum_assured()),
            next_due_date: Some(TemporalFixtures::quarterly_due()),
        }
    }

    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = client_id;
        self
    }

    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.policy_number = number.into();
        self
    }

    pub fn with_insurer(mut self, insurer: impl Into<String>) -> Self {
        self.insurer = insurer.into();
        self
    }

    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets or clears the premium mode
    pub fn with_mode(mut self, mode: Option<PremiumMode>) -> Self {
        self.premium_mode = mode;
        self
    }

    /// Sets the installment premium in rupees
    pub fn with_premium(mut self, amount: Decimal) -> Self {
        self.premium_amount = Some(MoneyFixtures::inr(amount));
        self
    }

    pub fn without_premium(mut self) -> Self {
        self.premium_amount = None;
        self
    }

    pub fn with_annual_premium(mut self, amount: Decimal) -> Self {
        self.annual_premium = Some(MoneyFixtures::inr(amount));
        self
    }

    pub fn with_sum_assured(mut self, amount: Decimal) -> Self {
        self.sum_assured = Some(MoneyFixtures::inr(amount));
        self
    }

    /// Sets or clears the next due date
    pub fn with_due_date(mut self, date: Option<NaiveDate>) -> Self {
        self.next_due_date = date;
        self
    }

    pub fn build(self) -> Policy {
        let mut policy = Policy::new(self.client_id, self.policy_number, self.insurer)
            .with_status(self.status);
        policy.premium_mode = self.premium_mode;
        policy.premium_amount = self.premium_amount;
        policy.annual_premium = self.annual_premium;
        policy.sum_assured = self.sum_assured;
        policy.next_due_date = self.next_due_date;
        policy
    }
}

/// Builder for test payments
pub struct TestPaymentBuilder {
    policy_id: PolicyId,
    payment_date: NaiveDate,
    amount_paid: Money,
    late_fee: Money,
    discount: Money,
    method: Option<PaymentMethod>,
}

impl TestPaymentBuilder {
    /// Creates a payment of the standard quarterly premium against `policy_id`
    pub fn for_policy(policy_id: PolicyId) -> Self {
        Self {
            policy_id,
            payment_date: TemporalFixtures::quarterly_due(),
            amount_paid: MoneyFixtures::quarterly_premium(),
            late_fee: MoneyFixtures::zero(),
            discount: MoneyFixtures::zero(),
            method: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.payment_date = date;
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount_paid = MoneyFixtures::inr(amount);
        self
    }

    pub fn late_fee(mut self, amount: Decimal) -> Self {
        self.late_fee = MoneyFixtures::inr(amount);
        self
    }

    pub fn discount(mut self, amount: Decimal) -> Self {
        self.discount = MoneyFixtures::inr(amount);
        self
    }

    pub fn method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn build(self) -> PremiumPayment {
        let payment = PremiumPayment::new(self.policy_id, self.payment_date, self.amount_paid)
            .with_late_fee(self.late_fee)
            .with_discount(self.discount);
        match self.method {
            Some(method) => payment.with_method(method),
            None => payment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_policy_builder_defaults() {
        let policy = TestPolicyBuilder::new().build();
        assert_eq!(policy.premium_mode, Some(PremiumMode::Quarterly));
        assert_eq!(policy.next_due_date, Some(TemporalFixtures::quarterly_due()));
        assert!(policy.is_active());
    }

    #[test]
    fn test_payment_builder() {
        let payment = TestPaymentBuilder::for_policy(PolicyId::new())
            .amount(dec!(5000))
            .late_fee(dec!(200))
            .build();
        assert_eq!(payment.settled_total().unwrap().amount(), dec!(5200));
    }
}
