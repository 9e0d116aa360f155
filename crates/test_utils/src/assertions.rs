//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more meaningful
//! error messages than standard assertions.

use chrono::NaiveDate;
use core_kernel::{Money, YearMonth};
use domain_analytics::{AnalyticsSnapshot, TREND_MONTHS};
use domain_billing::DueDatePreview;

/// Asserts that a Money value has the expected amount and currency
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Amount mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a preview rolled the due date to `expected`
pub fn assert_rolled_to(preview: &DueDatePreview, expected: NaiveDate) {
    assert!(
        preview.is_full_payment,
        "Expected a full payment, total {} < expected {}",
        preview.total,
        preview.expected_amount
    );
    assert_eq!(
        preview.next_due_date, expected,
        "Due date rolled from {} to {}, expected {}",
        preview.current_due_date, preview.next_due_date, expected
    );
}

/// Asserts that a preview left the due date where it was
pub fn assert_held(preview: &DueDatePreview) {
    assert_eq!(
        preview.next_due_date, preview.current_due_date,
        "Due date moved from {} to {} (total {}, expected {})",
        preview.current_due_date, preview.next_due_date, preview.total, preview.expected_amount
    );
}

/// Asserts that every breakdown accounts for every policy
pub fn assert_breakdowns_sum_to_total(snapshot: &AnalyticsSnapshot) {
    for (name, breakdown) in [
        ("status", &snapshot.policy_status_breakdown),
        ("insurer", &snapshot.insurer_breakdown),
        ("premium mode", &snapshot.premium_mode_breakdown),
    ] {
        assert_eq!(
            breakdown.total(),
            snapshot.total_policies,
            "{} breakdown counts {} policies, snapshot has {}",
            name,
            breakdown.total(),
            snapshot.total_policies
        );
    }
}

/// Asserts that the trend has twelve consecutive months ending at `reference`
pub fn assert_trend_window(snapshot: &AnalyticsSnapshot, reference: NaiveDate) {
    let trend = &snapshot.monthly_premium_trend;
    assert_eq!(trend.len(), TREND_MONTHS as usize, "Trend must have twelve points");

    for pair in trend.windows(2) {
        assert_eq!(
            pair[0].period.offset(1),
            pair[1].period,
            "Trend months not consecutive: {} then {}",
            pair[0].period,
            pair[1].period
        );
    }

    let last = trend.last().map(|p| p.period);
    assert_eq!(last, Some(YearMonth::of(reference)), "Trend must end at the reference month");
}
