//! Trailing twelve-month premium trend
//!
//! Payments are bucketed by the calendar month of their payment date into
//! the twelve months ending at the reference month. Chart renderers rely on
//! always receiving exactly twelve points in chronological order.

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::{Currency, Money, YearMonth};
use domain_billing::PremiumPayment;

use crate::error::AnalyticsError;

/// Number of months in the trend window
pub const TREND_MONTHS: u32 = 12;

/// Gross premium received in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Calendar month of the bucket
    pub period: YearMonth,
    /// Short label for chart axes, e.g. `Mar 2024`
    pub month: String,
    /// Sum of `amount_paid` for payments made in the month
    pub amount: Money,
}

/// Buckets payments into the trailing twelve calendar months
#[derive(Debug, Clone, Copy)]
pub struct MonthlyTrendBucketizer {
    currency: Currency,
}

impl MonthlyTrendBucketizer {
    /// Creates a bucketizer reporting in `currency`
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Buckets payments into the twelve months ending at `reference`
    ///
    /// Payments outside the window are skipped. Months without payments are
    /// reported as zero. Late fees and discounts are not included.
    ///
    /// # Errors
    ///
    /// Returns a money error if any payment is not in the reporting currency.
    pub fn bucket(&self, payments: &[PremiumPayment], reference: NaiveDate) -> Result<Vec<TrendPoint>, AnalyticsError> {
        let window = YearMonth::of(reference).trailing(TREND_MONTHS);
        let first = window[0];
        let zero = Money::zero(self.currency);
        let mut amounts = vec![zero; window.len()];

        for payment in payments {
            zero.ensure_same_currency(&payment.amount_paid)?;

            let month = YearMonth::of(payment.payment_date);
            let index = (month.year() - first.year()) * 12 + month.month() as i32 - first.month() as i32;
            if let Some(slot) = usize::try_from(index).ok().and_then(|i| amounts.get_mut(i)) {
                *slot = slot.checked_add(&payment.amount_paid)?;
            }
        }

        Ok(window
            .into_iter()
            .zip(amounts)
            .map(|(period, amount)| TrendPoint {
                period,
                month: period.label(),
                amount,
            })
            .collect())
    }
}
