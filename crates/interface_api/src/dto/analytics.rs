//! Analytics and reminder DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_policy::DueReminder;

use super::policy::PolicyRequest;
use super::premium::PaymentRequest;

/// Records to summarise for the dashboard or a report
#[derive(Debug, Deserialize, Validate)]
pub struct SnapshotRequest {
    #[serde(default)]
    #[validate(nested)]
    pub policies: Vec<PolicyRequest>,
    /// Payments; each must name its `policy_id`
    #[serde(default)]
    #[validate(nested)]
    pub payments: Vec<PaymentRequest>,
    /// Restricts the snapshot to one client's policies
    pub client_id: Option<Uuid>,
    /// Closes the trend window; defaults to today
    pub reference_date: Option<NaiveDate>,
}

/// Policies to scan for premiums needing a reminder
#[derive(Debug, Deserialize, Validate)]
pub struct DueRequest {
    #[validate(nested)]
    pub policies: Vec<PolicyRequest>,
    pub reference_date: Option<NaiveDate>,
    /// Reminder window; defaults to the configured window
    #[validate(range(max = 366))]
    pub within_days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DueResponse {
    pub reference_date: NaiveDate,
    pub within_days: u32,
    pub reminders: Vec<DueReminder>,
}
