//! Analytics and reminder handlers

use axum::{extract::State, Json};
use validator::Validate;

use core_kernel::ClientId;
use domain_analytics::AnalyticsSnapshot;
use domain_billing::PremiumPayment;
use domain_policy::{upcoming_dues, Policy};

use crate::dto::analytics::{DueRequest, DueResponse, SnapshotRequest};
use crate::{error::ApiError, AppState};

/// Summarises policies and payments for the dashboard
pub async fn portfolio_snapshot(
    State(state): State<AppState>,
    Json(request): Json<SnapshotRequest>,
) -> Result<Json<AnalyticsSnapshot>, ApiError> {
    request.validate()?;
    let currency = state.config.currency;
    let today = state.today();
    let reference = request.reference_date.unwrap_or(today);

    let policies = request
        .policies
        .into_iter()
        .map(|policy| policy.into_policy(currency))
        .collect::<Result<Vec<Policy>, _>>()?;
    let payments = request
        .payments
        .into_iter()
        .map(|payment| payment.into_payment(None, currency, today))
        .collect::<Result<Vec<PremiumPayment>, _>>()?;

    let snapshot = match request.client_id {
        Some(client_id) => state.aggregator.aggregate_for_client(
            ClientId::from(client_id),
            &policies,
            &payments,
            reference,
        )?,
        None => state.aggregator.aggregate(&policies, &payments, reference)?,
    };

    Ok(Json(snapshot))
}

/// Lists active policies that are overdue or falling due
pub async fn due_reminders(
    State(state): State<AppState>,
    Json(request): Json<DueRequest>,
) -> Result<Json<DueResponse>, ApiError> {
    request.validate()?;
    let reference_date = request.reference_date.unwrap_or_else(|| state.today());
    let within_days = request.within_days.unwrap_or(state.config.due_soon_days);

    let policies = request
        .policies
        .into_iter()
        .map(|policy| policy.into_policy(state.config.currency))
        .collect::<Result<Vec<Policy>, _>>()?;

    Ok(Json(DueResponse {
        reference_date,
        within_days,
        reminders: upcoming_dues(&policies, reference_date, within_days),
    }))
}
