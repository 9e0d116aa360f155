//! Portfolio aggregation

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{instrument, warn};

use core_kernel::{ClientId, Currency, Money};
use domain_billing::PremiumPayment;
use domain_policy::{Policy, PremiumMode, PremiumModeConfig};

use crate::breakdown::Breakdown;
use crate::error::AnalyticsError;
use crate::snapshot::AnalyticsSnapshot;
use crate::trend::MonthlyTrendBucketizer;

/// Mode used for policies that carry none
const DEFAULT_MODE: PremiumMode = PremiumMode::Yearly;

/// Reduces policies and payments to an [`AnalyticsSnapshot`]
///
/// Shares the premium mode table with the rollover calculator so both
/// annualise installments the same way.
#[derive(Debug, Clone)]
pub struct PortfolioAnalyticsAggregator {
    modes: Arc<PremiumModeConfig>,
    currency: Currency,
    trend: MonthlyTrendBucketizer,
}

impl PortfolioAnalyticsAggregator {
    /// Creates an aggregator reporting in `currency`
    pub fn new(modes: Arc<PremiumModeConfig>, currency: Currency) -> Self {
        Self {
            modes,
            currency,
            trend: MonthlyTrendBucketizer::new(currency),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Annual premium of one policy
    ///
    /// The explicit annual premium wins; otherwise the installment premium is
    /// multiplied by the mode's installments per year (YEARLY when the policy
    /// has no mode); otherwise zero.
    pub fn annualized_premium(&self, policy: &Policy) -> Result<Money, AnalyticsError> {
        let zero = Money::zero(self.currency);

        if let Some(annual) = policy.annual_premium {
            zero.ensure_same_currency(&annual)?;
            return Ok(annual);
        }

        match policy.premium_amount {
            Some(installment) => {
                zero.ensure_same_currency(&installment)?;
                let mode = policy.premium_mode.unwrap_or(DEFAULT_MODE);
                let factor = self.modes.entry(mode)?.annual_factor();
                Ok(installment.multiply(factor)?)
            }
            None => Ok(zero),
        }
    }

    /// Aggregates a set of policies and payments
    ///
    /// # Arguments
    ///
    /// * `policies` - Policies in scope; their order fixes breakdown order
    /// * `payments` - Payments in scope
    /// * `reference` - Date whose month closes the trend window
    ///
    /// # Errors
    ///
    /// Returns a money error if any record is not in the reporting currency.
    #[instrument(skip_all, fields(policies = policies.len(), payments = payments.len(), reference = %reference))]
    pub fn aggregate(
        &self,
        policies: &[Policy],
        payments: &[PremiumPayment],
        reference: NaiveDate,
    ) -> Result<AnalyticsSnapshot, AnalyticsError> {
        let zero = Money::zero(self.currency);

        let mut active_policies = 0u64;
        let mut total_sum_assured = zero;
        let mut total_annual_premium = zero;
        let mut status_breakdown = Breakdown::new();
        let mut insurer_breakdown = Breakdown::new();
        let mut mode_breakdown = Breakdown::new();
        let mut defaulted_modes = 0usize;

        for policy in policies {
            if policy.is_active() {
                active_policies += 1;
            }
            if let Some(sum_assured) = &policy.sum_assured {
                total_sum_assured = total_sum_assured.checked_add(sum_assured)?;
            }
            total_annual_premium = total_annual_premium.checked_add(&self.annualized_premium(policy)?)?;

            status_breakdown.increment(policy.status.code());
            insurer_breakdown.increment(policy.insurer_label());

            let mode = policy.premium_mode.unwrap_or_else(|| {
                defaulted_modes += 1;
                DEFAULT_MODE
            });
            mode_breakdown.increment(mode.code());
        }

        if defaulted_modes > 0 {
            warn!(count = defaulted_modes, "Policies without premium mode counted as {}", DEFAULT_MODE);
        }

        for payment in payments {
            payment.validate()?;
        }
        let total_premiums_paid = Money::sum(payments.iter().map(|p| &p.amount_paid), self.currency)?;

        let total_policies = policies.len() as u64;
        let average_policy_value = if total_policies > 0 {
            total_sum_assured.divide(Decimal::from(total_policies))?
        } else {
            zero
        };

        let monthly_premium_trend = self.trend.bucket(payments, reference)?;

        Ok(AnalyticsSnapshot {
            currency: self.currency,
            reference_date: reference,
            total_policies,
            active_policies,
            total_sum_assured,
            total_annual_premium,
            total_premiums_paid,
            average_policy_value,
            policy_status_breakdown: status_breakdown,
            insurer_breakdown,
            premium_mode_breakdown: mode_breakdown,
            monthly_premium_trend,
        })
    }

    /// Aggregates one client's policies and the payments made on them
    ///
    /// Payments referencing policies outside the client's set are ignored.
    pub fn aggregate_for_client(
        &self,
        client_id: ClientId,
        policies: &[Policy],
        payments: &[PremiumPayment],
        reference: NaiveDate,
    ) -> Result<AnalyticsSnapshot, AnalyticsError> {
        let owned: Vec<Policy> = policies
            .iter()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect();
        let policy_ids: HashSet<_> = owned.iter().map(|p| p.id).collect();
        let paid: Vec<PremiumPayment> = payments
            .iter()
            .filter(|p| policy_ids.contains(&p.policy_id))
            .cloned()
            .collect();

        self.aggregate(&owned, &paid, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_policy::PolicyStatus;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inr(amount: Decimal) -> Money {
        Money::new(amount, Currency::INR)
    }

    fn aggregator() -> PortfolioAnalyticsAggregator {
        PortfolioAnalyticsAggregator::new(Arc::new(PremiumModeConfig::standard()), Currency::INR)
    }

    fn policy(client: ClientId, insurer: &str, mode: Option<PremiumMode>, premium: Decimal) -> Policy {
        let mut p = Policy::new(client, format!("{}-{}", insurer, premium), insurer)
            .with_sum_assured(inr(premium * dec!(100)));
        p.premium_amount = Some(inr(premium));
        p.premium_mode = mode;
        p
    }

    #[test]
    fn test_empty_input_yields_zero_snapshot() {
        let snapshot = aggregator().aggregate(&[], &[], date(2024, 6, 1)).unwrap();

        assert_eq!(snapshot.total_policies, 0);
        assert_eq!(snapshot.active_policies, 0);
        assert!(snapshot.total_sum_assured.is_zero());
        assert!(snapshot.total_annual_premium.is_zero());
        assert!(snapshot.total_premiums_paid.is_zero());
        assert!(snapshot.average_policy_value.is_zero());
        assert!(snapshot.policy_status_breakdown.is_empty());
        assert_eq!(snapshot.monthly_premium_trend.len(), 12);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_annualized_premium_per_mode() {
        let client = ClientId::new();
        let agg = aggregator();

        let cases = [
            (Some(PremiumMode::Monthly), dec!(12000)),
            (Some(PremiumMode::Quarterly), dec!(4000)),
            (Some(PremiumMode::HalfYearly), dec!(2000)),
            (Some(PremiumMode::Yearly), dec!(1000)),
            (Some(PremiumMode::Single), dec!(1000)),
            (None, dec!(1000)),
        ];
        for (mode, expected) in cases {
            let p = policy(client, "LIC", mode, dec!(1000));
            assert_eq!(agg.annualized_premium(&p).unwrap().amount(), expected, "{:?}", mode);
        }
    }

    #[test]
    fn test_explicit_annual_premium_wins() {
        let p = policy(ClientId::new(), "LIC", Some(PremiumMode::Monthly), dec!(1000))
            .with_annual_premium(inr(dec!(11500)));
        assert_eq!(aggregator().annualized_premium(&p).unwrap().amount(), dec!(11500));
    }

    #[test]
    fn test_aggregate_totals_and_breakdowns() {
        let client = ClientId::new();
        let policies = vec![
            policy(client, "LIC", Some(PremiumMode::Quarterly), dec!(6000)),
            policy(client, "HDFC Life", Some(PremiumMode::Monthly), dec!(1000))
                .with_status(PolicyStatus::Lapsed),
            policy(client, "LIC", None, dec!(2000)),
        ];
        let payments = vec![
            PremiumPayment::new(policies[0].id, date(2024, 5, 10), inr(dec!(6000)))
                .with_late_fee(inr(dec!(200))),
            PremiumPayment::new(policies[1].id, date(2024, 4, 1), inr(dec!(1000))),
        ];

        let snapshot = aggregator().aggregate(&policies, &payments, date(2024, 6, 1)).unwrap();

        assert_eq!(snapshot.total_policies, 3);
        assert_eq!(snapshot.active_policies, 2);
        assert_eq!(snapshot.total_sum_assured.amount(), dec!(900000));
        assert_eq!(snapshot.total_annual_premium.amount(), dec!(24000) + dec!(12000) + dec!(2000));
        assert_eq!(snapshot.total_premiums_paid.amount(), dec!(7000));
        assert_eq!(snapshot.average_policy_value.amount(), dec!(300000));

        assert_eq!(snapshot.policy_status_breakdown.get("ACTIVE"), 2);
        assert_eq!(snapshot.policy_status_breakdown.get("LAPSED"), 1);
        assert_eq!(snapshot.insurer_breakdown.keys().collect::<Vec<_>>(), vec!["LIC", "HDFC Life"]);
        assert_eq!(snapshot.premium_mode_breakdown.get("YEARLY"), 1);
        assert_eq!(snapshot.premium_mode_breakdown.get("QUARTERLY"), 1);

        assert_eq!(snapshot.monthly_premium_trend[10].amount.amount(), dec!(6000));
        assert_eq!(snapshot.monthly_premium_trend[9].amount.amount(), dec!(1000));
    }

    #[test]
    fn test_aggregate_for_client_scopes_records() {
        let mine = ClientId::new();
        let theirs = ClientId::new();
        let policies = vec![
            policy(mine, "LIC", Some(PremiumMode::Yearly), dec!(5000)),
            policy(theirs, "Max Life", Some(PremiumMode::Yearly), dec!(7000)),
        ];
        let payments = vec![
            PremiumPayment::new(policies[0].id, date(2024, 5, 1), inr(dec!(5000))),
            PremiumPayment::new(policies[1].id, date(2024, 5, 1), inr(dec!(7000))),
        ];

        let snapshot = aggregator()
            .aggregate_for_client(mine, &policies, &payments, date(2024, 6, 1))
            .unwrap();

        assert_eq!(snapshot.total_policies, 1);
        assert_eq!(snapshot.total_premiums_paid.amount(), dec!(5000));
        assert_eq!(snapshot.insurer_breakdown.get("Max Life"), 0);
    }

    #[test]
    fn test_foreign_currency_policy_is_an_error() {
        let p = Policy::new(ClientId::new(), "X", "Allianz")
            .with_sum_assured(Money::new(dec!(1), Currency::EUR));
        let result = aggregator().aggregate(&[p], &[], date(2024, 6, 1));
        assert!(matches!(result, Err(AnalyticsError::Money(_))));
    }

    #[test]
    fn test_negative_payment_is_rejected() {
        let p = policy(ClientId::new(), "LIC", Some(PremiumMode::Yearly), dec!(5000));
        let payments = vec![
            PremiumPayment::new(p.id, date(2024, 5, 1), inr(dec!(5000))),
            PremiumPayment::new(p.id, date(2024, 5, 2), inr(dec!(-4000))),
        ];

        let result = aggregator().aggregate(&[p], &payments, date(2024, 6, 1));
        assert!(matches!(
            result,
            Err(AnalyticsError::Payment(domain_billing::BillingError::Validation(_)))
        ));
    }
}
