//! Due-status classification for premium reminders
//!
//! Dashboards list policies whose premium is overdue or falls due within a
//! configurable window. Classification is relative to an explicit reference
//! date so that results are reproducible.

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::{ClientId, Money, PolicyId};

use crate::policy::Policy;

/// Where a policy's next due date sits relative to a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DueStatus {
    /// No next due date recorded
    NotScheduled,
    /// Due date has passed by `days`
    Overdue { days: i64 },
    /// Due in `days` (zero means today), within the reminder window
    DueSoon { days: i64 },
    /// Due beyond the reminder window
    Upcoming { days: i64 },
}

impl DueStatus {
    /// True for statuses that warrant a reminder
    pub fn needs_attention(&self) -> bool {
        matches!(self, DueStatus::Overdue { .. } | DueStatus::DueSoon { .. })
    }
}

/// Classifies a policy's next due date
///
/// # Arguments
///
/// * `policy` - The policy to classify
/// * `reference` - The date to classify against, normally today
/// * `due_soon_days` - Width of the reminder window in days
pub fn due_status(policy: &Policy, reference: NaiveDate, due_soon_days: u32) -> DueStatus {
    let Some(due) = policy.next_due_date else {
        return DueStatus::NotScheduled;
    };

    let days = (due - reference).num_days();
    if days < 0 {
        DueStatus::Overdue { days: -days }
    } else if days <= i64::from(due_soon_days) {
        DueStatus::DueSoon { days }
    } else {
        DueStatus::Upcoming { days }
    }
}

/// A reminder line for one policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueReminder {
    pub policy_id: PolicyId,
    pub client_id: ClientId,
    pub policy_number: String,
    pub due_date: NaiveDate,
    pub amount_due: Option<Money>,
    pub status: DueStatus,
}

/// Lists active policies that are overdue or due within the window
///
/// Results are ordered by due date, then policy number.
pub fn upcoming_dues(policies: &[Policy], reference: NaiveDate, due_soon_days: u32) -> Vec<DueReminder> {
    let mut reminders: Vec<DueReminder> = policies
        .iter()
        .filter(|policy| policy.is_active())
        .filter_map(|policy| {
            let status = due_status(policy, reference, due_soon_days);
            let due_date = policy.next_due_date?;
            status.needs_attention().then(|| DueReminder {
                policy_id: policy.id,
                client_id: policy.client_id,
                policy_number: policy.policy_number.clone(),
                due_date,
                amount_due: policy.premium_amount,
                status,
            })
        })
        .collect();

    reminders.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.policy_number.cmp(&b.policy_number))
    });

    tracing::debug!(
        candidates = policies.len(),
        reminders = reminders.len(),
        %reference,
        "Classified premium due dates"
    );

    reminders
}
