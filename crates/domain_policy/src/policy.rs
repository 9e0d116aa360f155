//! Agency policy record
//!
//! Only the fields the premium engine reads are modelled here; the rest of
//! the CRM's policy form lives with the persistence layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClientId, Currency, Money, PolicyId};

use crate::premium::PremiumMode;

/// Lifecycle status of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    Active,
    Lapsed,
    Matured,
    Surrendered,
}

impl PolicyStatus {
    pub fn code(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "ACTIVE",
            PolicyStatus::Lapsed => "LAPSED",
            PolicyStatus::Matured => "MATURED",
            PolicyStatus::Surrendered => "SURRENDERED",
        }
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A policy held by an agency client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier
    pub id: PolicyId,
    /// Owning client
    pub client_id: ClientId,
    /// Insurer-issued policy number
    pub policy_number: String,
    /// Insurer name
    pub insurer: String,
    /// Lifecycle status
    pub status: PolicyStatus,
    /// Billing frequency
    pub premium_mode: Option<PremiumMode>,
    /// Expected amount per installment
    pub premium_amount: Option<Money>,
    /// Explicit annual premium, when the insurer quotes one
    pub annual_premium: Option<Money>,
    /// Insured coverage amount
    pub sum_assured: Option<Money>,
    /// Date the next installment falls due
    pub next_due_date: Option<NaiveDate>,
}

impl Policy {
    /// Creates an active policy with no premium terms
    ///
    /// # Arguments
    ///
    /// * `client_id` - Owning client
    /// * `policy_number` - Insurer-issued number
    /// * `insurer` - Insurer name
    pub fn new(
        client_id: ClientId,
        policy_number: impl Into<String>,
        insurer: impl Into<String>,
    ) -> Self {
        Self {
            id: PolicyId::new_v7(),
            client_id,
            policy_number: policy_number.into(),
            insurer: insurer.into(),
            status: PolicyStatus::Active,
            premium_mode: None,
            premium_amount: None,
            annual_premium: None,
            sum_assured: None,
            next_due_date: None,
        }
    }

    /// Sets the installment premium and its mode
    pub fn with_premium(mut self, amount: Money, mode: PremiumMode) -> Self {
        self.premium_amount = Some(amount);
        self.premium_mode = Some(mode);
        self
    }

    /// Sets an explicit annual premium
    pub fn with_annual_premium(mut self, amount: Money) -> Self {
        self.annual_premium = Some(amount);
        self
    }

    pub fn with_sum_assured(mut self, amount: Money) -> Self {
        self.sum_assured = Some(amount);
        self
    }

    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns a copy carrying a different next due date
    ///
    /// This is the only change the engine makes to a policy.
    pub fn with_next_due_date(mut self, date: NaiveDate) -> Self {
        self.next_due_date = Some(date);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == PolicyStatus::Active
    }

    /// Installment amount due each cycle, zero when none is recorded
    pub fn expected_installment(&self, currency: Currency) -> Money {
        self.premium_amount.unwrap_or_else(|| Money::zero(currency))
    }

    /// Insurer name used for grouping; blank names group as `Unknown`
    pub fn insurer_label(&self) -> &str {
        let trimmed = self.insurer.trim();
        if trimmed.is_empty() {
            "Unknown"
        } else {
            trimmed
        }
    }
}
