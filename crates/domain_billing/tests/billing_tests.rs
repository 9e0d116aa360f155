//! Premium Rollover Tests
//!
//! This module contains tests for the due-date rollover rule:
//! - Full and partial payments, including the inclusive boundary
//! - Calendar-month addition at month ends
//! - Non-recurring (SINGLE) policies
//! - Payment validation at the boundary
//! - Commit behaviour and idempotence
//!
//! # Test Organization
//!
//! - `scenarios` - Worked examples from the agency's billing rules
//! - `validation` - Rejection of malformed payments
//! - `commit` - Producing the updated policy for persistence
//! - `properties` - Property-based invariants across all modes

use std::collections::BTreeMap;
use std::sync::Arc;

use domain_billing::{compute_total, BillingError, PaymentMethod, PaymentRolloverCalculator};
use domain_policy::{PremiumMode, PremiumModeConfig, PremiumModeSetting};
use rust_decimal_macros::dec;
use test_utils::{
    assert_held, assert_rolled_to, EngineFixtures, MoneyFixtures, PolicyFixtures,
    TemporalFixtures, TestPaymentBuilder, TestPolicyBuilder,
};

// ============================================================================
// SCENARIOS
// ============================================================================

mod scenarios {
    use super::*;

    /// Quarterly policy paid in full rolls three months forward
    #[test]
    fn test_quarterly_full_payment() {
        let policy = PolicyFixtures::quarterly();
        let payment = TestPaymentBuilder::for_policy(policy.id)
            .amount(dec!(6000))
            .late_fee(dec!(0))
            .discount(dec!(0))
            .build();

        let preview = EngineFixtures::calculator()
            .evaluate_payment(&policy, &payment)
            .unwrap()
            .expect("policy has due-date state");

        assert!(preview.is_full_payment);
        assert_rolled_to(&preview, TemporalFixtures::date(2024, 6, 15));
    }

    /// A late fee does not make up for a short payment
    #[test]
    fn test_quarterly_short_payment_with_late_fee() {
        let policy = PolicyFixtures::quarterly();
        let payment = TestPaymentBuilder::for_policy(policy.id)
            .amount(dec!(5000))
            .late_fee(dec!(200))
            .build();

        let preview = EngineFixtures::calculator()
            .evaluate_payment(&policy, &payment)
            .unwrap()
            .unwrap();

        assert_eq!(preview.total.amount(), dec!(5200));
        assert!(!preview.is_full_payment);
        assert_held(&preview);
        assert_eq!(preview.next_due_date, TemporalFixtures::date(2024, 3, 15));
    }

    /// Late fee can complete an otherwise short payment
    #[test]
    fn test_late_fee_counts_towards_total() {
        let policy = PolicyFixtures::quarterly();
        let payment = TestPaymentBuilder::for_policy(policy.id)
            .amount(dec!(5800))
            .late_fee(dec!(200))
            .build();

        let preview = EngineFixtures::calculator()
            .evaluate_payment(&policy, &payment)
            .unwrap()
            .unwrap();
        assert_rolled_to(&preview, TemporalFixtures::date(2024, 6, 15));
    }

    /// Discount reduces the settled total below the installment
    #[test]
    fn test_discount_can_make_payment_partial() {
        let policy = PolicyFixtures::quarterly();
        let payment = TestPaymentBuilder::for_policy(policy.id)
            .amount(dec!(6000))
            .discount(dec!(0.01))
            .build();

        let preview = EngineFixtures::calculator()
            .evaluate_payment(&policy, &payment)
            .unwrap()
            .unwrap();
        assert!(!preview.is_full_payment);
        assert_held(&preview);
    }

    /// 31 Jan + 1 month is the last day of February
    #[test]
    fn test_monthly_month_end_leap_and_common_year() {
        let calculator = EngineFixtures::calculator();
        let leap = PolicyFixtures::monthly_month_end();
        let preview = calculator
            .evaluate(&leap, &MoneyFixtures::inr(dec!(2500)))
            .unwrap()
            .unwrap();
        assert_rolled_to(&preview, TemporalFixtures::date(2024, 2, 29));

        let common = TestPolicyBuilder::new()
            .with_mode(Some(PremiumMode::Monthly))
            .with_premium(dec!(2500))
            .with_due_date(Some(TemporalFixtures::date(2023, 1, 31)))
            .build();
        let preview = calculator
            .evaluate(&common, &MoneyFixtures::inr(dec!(2500)))
            .unwrap()
            .unwrap();
        assert_rolled_to(&preview, TemporalFixtures::date(2023, 2, 28));
    }

    /// Half-yearly and yearly periods
    #[test]
    fn test_half_yearly_and_yearly_periods() {
        let calculator = EngineFixtures::calculator();
        let cases = [
            (PremiumMode::HalfYearly, TemporalFixtures::date(2024, 8, 31), TemporalFixtures::date(2025, 2, 28)),
            (PremiumMode::Yearly, TemporalFixtures::date(2024, 2, 29), TemporalFixtures::date(2025, 2, 28)),
            (PremiumMode::Yearly, TemporalFixtures::date(2024, 12, 1), TemporalFixtures::date(2025, 12, 1)),
        ];

        for (mode, due, expected) in cases {
            let policy = TestPolicyBuilder::new()
                .with_mode(Some(mode))
                .with_premium(dec!(12000))
                .with_due_date(Some(due))
                .build();
            let preview = calculator
                .evaluate(&policy, &MoneyFixtures::inr(dec!(12000)))
                .unwrap()
                .unwrap();
            assert_rolled_to(&preview, expected);
        }
    }

    /// Single-premium policies never roll, however much is paid
    #[test]
    fn test_single_premium_never_rolls() {
        let policy = PolicyFixtures::single_premium();
        let preview = EngineFixtures::calculator()
            .evaluate(&policy, &MoneyFixtures::inr(dec!(1000000)))
            .unwrap()
            .unwrap();

        assert!(preview.is_full_payment);
        assert_held(&preview);
    }

    /// A table whose rows leave out `recurring` still never rolls SINGLE
    #[test]
    fn test_single_premium_holds_with_configured_table() {
        let rows = serde_json::json!({
            "MONTHLY": { "installments_per_year": 12 },
            "QUARTERLY": { "installments_per_year": 4 },
            "HALF_YEARLY": { "installments_per_year": 2 },
            "YEARLY": { "installments_per_year": 1 },
            "SINGLE": { "installments_per_year": 1 }
        });
        let settings: BTreeMap<String, PremiumModeSetting> = serde_json::from_value(rows).unwrap();
        let modes = PremiumModeConfig::from_settings(&settings).unwrap();
        let calculator = PaymentRolloverCalculator::new(Arc::new(modes));

        let policy = PolicyFixtures::single_premium();
        let preview = calculator
            .evaluate(&policy, &MoneyFixtures::inr(dec!(150000)))
            .unwrap()
            .unwrap();

        assert!(preview.is_full_payment);
        assert_held(&preview);
        assert_eq!(preview.next_due_date, TemporalFixtures::date(2024, 5, 1));
    }

    /// A policy without mode or due date is not applicable, not an error
    #[test]
    fn test_not_applicable_without_due_state() {
        let calculator = EngineFixtures::calculator();
        let total = MoneyFixtures::inr(dec!(6000));

        let no_mode = TestPolicyBuilder::new().with_mode(None).build();
        assert!(calculator.evaluate(&no_mode, &total).unwrap().is_none());

        let no_date = TestPolicyBuilder::new().with_due_date(None).build();
        assert!(calculator.evaluate(&no_date, &total).unwrap().is_none());
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn test_negative_amount_rejected_before_evaluation() {
        let policy = PolicyFixtures::quarterly();
        let payment = TestPaymentBuilder::for_policy(policy.id).amount(dec!(-6000)).build();

        let result = EngineFixtures::calculator().evaluate_payment(&policy, &payment);
        assert!(matches!(result, Err(BillingError::Validation(msg)) if msg.contains("amount_paid")));
    }

    #[test]
    fn test_negative_late_fee_and_discount_rejected() {
        let policy = PolicyFixtures::quarterly();
        let calculator = EngineFixtures::calculator();

        let late = TestPaymentBuilder::for_policy(policy.id).late_fee(dec!(-1)).build();
        assert!(matches!(
            calculator.evaluate_payment(&policy, &late),
            Err(BillingError::Validation(msg)) if msg.contains("late_fee")
        ));

        let discount = TestPaymentBuilder::for_policy(policy.id).discount(dec!(-1)).build();
        assert!(matches!(
            calculator.evaluate_payment(&policy, &discount),
            Err(BillingError::Validation(msg)) if msg.contains("discount")
        ));
    }

    #[test]
    fn test_negative_total_is_partial_not_error() {
        let policy = PolicyFixtures::quarterly();
        let payment = TestPaymentBuilder::for_policy(policy.id)
            .amount(dec!(100))
            .discount(dec!(500))
            .build();

        let preview = EngineFixtures::calculator()
            .evaluate_payment(&policy, &payment)
            .unwrap()
            .unwrap();
        assert_eq!(preview.total.amount(), dec!(-400));
        assert!(!preview.is_full_payment);
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let result = compute_total(
            &MoneyFixtures::inr(rust_decimal::Decimal::MAX),
            &MoneyFixtures::inr(dec!(1)),
            &MoneyFixtures::zero(),
        );
        assert!(matches!(result, Err(BillingError::Money(core_kernel::MoneyError::Overflow))));

        let policy = PolicyFixtures::quarterly();
        let payment = TestPaymentBuilder::for_policy(policy.id)
            .amount(rust_decimal::Decimal::MAX)
            .late_fee(dec!(1))
            .build();
        assert!(matches!(
            EngineFixtures::calculator().evaluate_payment(&policy, &payment),
            Err(BillingError::Money(core_kernel::MoneyError::Overflow))
        ));
    }

    #[test]
    fn test_compute_total_has_no_lower_bound() {
        let total = compute_total(
            &MoneyFixtures::inr(dec!(0)),
            &MoneyFixtures::inr(dec!(0)),
            &MoneyFixtures::inr(dec!(75.50)),
        )
        .unwrap();
        assert_eq!(total.amount(), dec!(-75.50));
    }
}

// ============================================================================
// COMMIT
// ============================================================================

mod commit {
    use super::*;

    #[test]
    fn test_commit_produces_rolled_policy_and_keeps_payment() {
        let policy = PolicyFixtures::quarterly();
        let payment = TestPaymentBuilder::for_policy(policy.id)
            .on(TemporalFixtures::date(2024, 3, 12))
            .method(PaymentMethod::Upi)
            .build();

        let committed = EngineFixtures::calculator().commit(&policy, payment.clone()).unwrap();

        assert_eq!(committed.policy.next_due_date, Some(TemporalFixtures::date(2024, 6, 15)));
        assert_eq!(committed.payment, payment);
        assert!(committed.preview.unwrap().advances());
    }

    #[test]
    fn test_commit_on_policy_without_due_state_is_unchanged() {
        let policy = TestPolicyBuilder::new()
            .with_policy_number("HDFC-7741902")
            .with_due_date(None)
            .build();
        let payment = TestPaymentBuilder::for_policy(policy.id).build();

        let committed = EngineFixtures::calculator().commit(&policy, payment).unwrap();
        assert_eq!(committed.policy, policy);
        assert_eq!(committed.policy.policy_number, "HDFC-7741902");
        assert!(committed.preview.is_none());
    }

    #[test]
    fn test_commit_matches_preview() {
        let policy = PolicyFixtures::monthly_month_end();
        let payment = TestPaymentBuilder::for_policy(policy.id).amount(dec!(2500)).build();
        let calculator = EngineFixtures::calculator();

        let preview = calculator.evaluate_payment(&policy, &payment).unwrap();
        let committed = calculator.commit(&policy, payment).unwrap();

        assert_eq!(committed.preview, preview);
        assert_eq!(committed.policy.next_due_date, preview.map(|p| p.next_due_date));
    }

    #[test]
    fn test_consecutive_commits_roll_one_period_each() {
        let calculator = EngineFixtures::calculator();
        let mut policy = PolicyFixtures::monthly_month_end();
        let expected = [
            TemporalFixtures::date(2024, 2, 29),
            TemporalFixtures::date(2024, 3, 29),
            TemporalFixtures::date(2024, 4, 29),
        ];

        for want in expected {
            let payment = TestPaymentBuilder::for_policy(policy.id).amount(dec!(2500)).build();
            policy = calculator.commit(&policy, payment).unwrap().policy;
            assert_eq!(policy.next_due_date, Some(want));
        }
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

mod properties {
    use super::*;
    use core_kernel::add_months_clamped;
    use proptest::prelude::*;
    use test_utils::{date_strategy, premium_mode_strategy, recurring_mode_strategy, rupee_amount_strategy};

    proptest! {
        #[test]
        fn exact_payment_rolls_one_period(
            mode in recurring_mode_strategy(),
            premium in rupee_amount_strategy(),
            due in date_strategy()
        ) {
            let calculator = EngineFixtures::calculator();
            let policy = TestPolicyBuilder::new()
                .with_mode(Some(mode))
                .with_premium(premium)
                .with_due_date(Some(due))
                .build();

            let preview = calculator.evaluate(&policy, &MoneyFixtures::inr(premium)).unwrap().unwrap();
            let months = calculator.modes().period_months(mode).unwrap().unwrap();

            prop_assert!(preview.is_full_payment);
            prop_assert_eq!(preview.next_due_date, add_months_clamped(due, months).unwrap());
        }

        #[test]
        fn partial_payment_never_rolls(
            mode in premium_mode_strategy(),
            premium in rupee_amount_strategy(),
            shortfall_paise in 1i64..1_000_000i64,
            due in date_strategy()
        ) {
            let policy = TestPolicyBuilder::new()
                .with_mode(Some(mode))
                .with_premium(premium)
                .with_due_date(Some(due))
                .build();
            let short = premium - rust_decimal::Decimal::new(shortfall_paise, 2);

            let preview = EngineFixtures::calculator()
                .evaluate(&policy, &MoneyFixtures::inr(short))
                .unwrap()
                .unwrap();

            prop_assert!(!preview.is_full_payment);
            prop_assert_eq!(preview.next_due_date, due);
        }

        #[test]
        fn single_mode_never_rolls(total in rupee_amount_strategy(), due in date_strategy()) {
            let policy = TestPolicyBuilder::new()
                .with_mode(Some(PremiumMode::Single))
                .with_due_date(Some(due))
                .build();

            let preview = EngineFixtures::calculator()
                .evaluate(&policy, &MoneyFixtures::inr(total))
                .unwrap()
                .unwrap();
            prop_assert_eq!(preview.next_due_date, due);
        }

        #[test]
        fn evaluation_is_idempotent(
            mode in premium_mode_strategy(),
            premium in rupee_amount_strategy(),
            total in rupee_amount_strategy(),
            due in date_strategy()
        ) {
            let calculator = EngineFixtures::calculator();
            let policy = TestPolicyBuilder::new()
                .with_mode(Some(mode))
                .with_premium(premium)
                .with_due_date(Some(due))
                .build();
            let before = policy.clone();
            let total = MoneyFixtures::inr(total);

            let first = calculator.evaluate(&policy, &total).unwrap();
            let second = calculator.evaluate(&policy, &total).unwrap();

            prop_assert_eq!(first, second);
            prop_assert_eq!(policy, before);
        }
    }
}
