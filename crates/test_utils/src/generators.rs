//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating policies and payments that
//! keep the domain invariants: non-negative rupee amounts, valid calendar
//! dates, and payments that reference generated policies.

use chrono::{Duration, NaiveDate};
use core_kernel::{ClientId, PolicyId};
use domain_billing::PremiumPayment;
use domain_policy::{Policy, PolicyStatus, PremiumMode};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::MoneyFixtures;

/// Strategy for generating premium modes
pub fn premium_mode_strategy() -> impl Strategy<Value = PremiumMode> {
    prop_oneof![
        Just(PremiumMode::Monthly),
        Just(PremiumMode::Quarterly),
        Just(PremiumMode::HalfYearly),
        Just(PremiumMode::Yearly),
        Just(PremiumMode::Single),
    ]
}

/// Strategy for generating recurring premium modes
pub fn recurring_mode_strategy() -> impl Strategy<Value = PremiumMode> {
    prop_oneof![
        Just(PremiumMode::Monthly),
        Just(PremiumMode::Quarterly),
        Just(PremiumMode::HalfYearly),
        Just(PremiumMode::Yearly),
    ]
}

/// Strategy for generating policy statuses
pub fn policy_status_strategy() -> impl Strategy<Value = PolicyStatus> {
    prop_oneof![
        Just(PolicyStatus::Active),
        Just(PolicyStatus::Lapsed),
        Just(PolicyStatus::Matured),
        Just(PolicyStatus::Surrendered),
    ]
}

/// Strategy for generating insurer names, including a blank one
pub fn insurer_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("LIC".to_string()),
        Just("HDFC Life".to_string()),
        Just("ICICI Prudential".to_string()),
        Just("Max Life".to_string()),
        Just("SBI Life".to_string()),
        Just(String::new()),
    ]
}

/// Strategy for generating non-negative rupee amounts with paise
pub fn rupee_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for generating dates between 2020 and 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3_650i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(days)
    })
}

/// Strategy for generating PolicyId
pub fn policy_id_strategy() -> impl Strategy<Value = PolicyId> {
    any::<[u8; 16]>().prop_map(|bytes| PolicyId::from(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating ClientId
pub fn client_id_strategy() -> impl Strategy<Value = ClientId> {
    any::<[u8; 16]>().prop_map(|bytes| ClientId::from(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating policies with any combination of optional terms
pub fn policy_strategy() -> impl Strategy<Value = Policy> {
    (
        policy_id_strategy(),
        client_id_strategy(),
        insurer_strategy(),
        policy_status_strategy(),
        proptest::option::of(premium_mode_strategy()),
        proptest::option::of(rupee_amount_strategy()),
        proptest::option::weighted(0.2, rupee_amount_strategy()),
        proptest::option::of(rupee_amount_strategy()),
        proptest::option::of(date_strategy()),
    )
        .prop_map(
            |(id, client_id, insurer, status, mode, premium, annual, sum_assured, due)| {
                let mut policy = Policy::new(client_id, format!("POL-{}", id), insurer)
                    .with_status(status);
                policy.id = id;
                policy.premium_mode = mode;
                policy.premium_amount = premium.map(MoneyFixtures::inr);
                policy.annual_premium = annual.map(MoneyFixtures::inr);
                policy.sum_assured = sum_assured.map(MoneyFixtures::inr);
                policy.next_due_date = due;
                policy
            },
        )
}

/// Strategy for generating a payment against `policy_id`
pub fn payment_strategy(policy_id: PolicyId) -> impl Strategy<Value = PremiumPayment> {
    (
        date_strategy(),
        rupee_amount_strategy(),
        rupee_amount_strategy(),
        rupee_amount_strategy(),
    )
        .prop_map(move |(date, amount, late_fee, discount)| {
            PremiumPayment::new(policy_id, date, MoneyFixtures::inr(amount))
                .with_late_fee(MoneyFixtures::inr(late_fee))
                .with_discount(MoneyFixtures::inr(discount))
        })
}

/// Strategy for generating a portfolio of policies and payments on them
pub fn portfolio_strategy(max_policies: usize) -> impl Strategy<Value = (Vec<Policy>, Vec<PremiumPayment>)> {
    proptest::collection::vec(policy_strategy(), 0..=max_policies).prop_flat_map(|policies| {
        let payments = if policies.is_empty() {
            Just(Vec::new()).boxed()
        } else {
            let ids: Vec<PolicyId> = policies.iter().map(|p| p.id).collect();
            proptest::collection::vec(
                proptest::sample::select(ids).prop_flat_map(payment_strategy),
                0..20,
            )
            .boxed()
        };
        (Just(policies), payments)
    })
}
