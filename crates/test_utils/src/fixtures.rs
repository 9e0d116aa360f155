//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for policies, payments and dates.
//! These fixtures are consistent and predictable for unit tests.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{ClientId, Currency, Money, PolicyId};
use domain_billing::{PaymentRolloverCalculator, PremiumPayment};
use domain_analytics::PortfolioAnalyticsAggregator;
use domain_policy::{Policy, PremiumMode, PremiumModeConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Rupee amount
    pub fn inr(amount: Decimal) -> Money {
        Money::new(amount, Currency::INR)
    }

    /// Standard quarterly installment
    pub fn quarterly_premium() -> Money {
        Self::inr(dec!(6000))
    }

    /// Standard sum assured
    pub fn sum_assured() -> Money {
        Self::inr(dec!(1000000))
    }

    pub fn zero() -> Money {
        Money::zero(Currency::INR)
    }
}

/// Fixture for calendar test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Shorthand for a calendar date
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Mid-month due date used by the quarterly scenario
    pub fn quarterly_due() -> NaiveDate {
        Self::date(2024, 3, 15)
    }

    /// Month-end due date in a leap year
    pub fn leap_month_end() -> NaiveDate {
        Self::date(2024, 1, 31)
    }

    /// Reference date for analytics windows
    pub fn reporting_date() -> NaiveDate {
        Self::date(2024, 6, 30)
    }
}

/// Fixture for policies
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// QUARTERLY, 6000 due on 2024-03-15
    pub fn quarterly() -> Policy {
        Policy::new(ClientId::new(), "LIC-100234", "LIC")
            .with_premium(MoneyFixtures::quarterly_premium(), PremiumMode::Quarterly)
            .with_sum_assured(MoneyFixtures::sum_assured())
            .with_next_due_date(TemporalFixtures::quarterly_due())
    }

    /// MONTHLY, 2500 due on 2024-01-31
    pub fn monthly_month_end() -> Policy {
        Policy::new(ClientId::new(), "HDFC-88012", "HDFC Life")
            .with_premium(MoneyFixtures::inr(dec!(2500)), PremiumMode::Monthly)
            .with_next_due_date(TemporalFixtures::leap_month_end())
    }

    /// SINGLE, 150000 due on 2024-05-01
    pub fn single_premium() -> Policy {
        Policy::new(ClientId::new(), "MAX-55120", "Max Life")
            .with_premium(MoneyFixtures::inr(dec!(150000)), PremiumMode::Single)
            .with_next_due_date(TemporalFixtures::date(2024, 5, 1))
    }
}

/// Fixture for payments
pub struct PaymentFixtures;

impl PaymentFixtures {
    /// Payment of `amount` against `policy_id` on `date`
    pub fn paid(policy_id: PolicyId, date: NaiveDate, amount: Decimal) -> PremiumPayment {
        PremiumPayment::new(policy_id, date, MoneyFixtures::inr(amount))
    }
}

/// Fixture for engine components over the standard mode table
pub struct EngineFixtures;

impl EngineFixtures {
    pub fn modes() -> Arc<PremiumModeConfig> {
        Arc::new(PremiumModeConfig::standard())
    }

    pub fn calculator() -> PaymentRolloverCalculator {
        PaymentRolloverCalculator::new(Self::modes())
    }

    pub fn aggregator() -> PortfolioAnalyticsAggregator {
        PortfolioAnalyticsAggregator::new(Self::modes(), Currency::INR)
    }
}
