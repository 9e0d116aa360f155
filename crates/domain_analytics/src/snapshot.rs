//! Dashboard and report figures

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::{Currency, Money};

use crate::breakdown::Breakdown;
use crate::trend::TrendPoint;

/// Summary of a set of policies and their payments
///
/// All monetary fields are in `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSnapshot {
    pub currency: Currency,
    /// Date whose calendar month closes the trend window
    pub reference_date: NaiveDate,
    pub total_policies: u64,
    pub active_policies: u64,
    pub total_sum_assured: Money,
    pub total_annual_premium: Money,
    /// Gross `amount_paid`, excluding late fees and discounts
    pub total_premiums_paid: Money,
    /// Sum assured per policy, zero when there are no policies
    pub average_policy_value: Money,
    pub policy_status_breakdown: Breakdown,
    pub insurer_breakdown: Breakdown,
    pub premium_mode_breakdown: Breakdown,
    /// Twelve monthly points, oldest first
    pub monthly_premium_trend: Vec<TrendPoint>,
}

impl AnalyticsSnapshot {
    /// True when there are no policies and nothing has been paid
    pub fn is_empty(&self) -> bool {
        self.total_policies == 0 && self.total_premiums_paid.is_zero()
    }
}
