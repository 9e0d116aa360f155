//! Premium payment handlers

use axum::{extract::State, Json};
use validator::Validate;

use core_kernel::Money;
use domain_billing::{compute_total, CommittedPayment};
use domain_policy::PremiumModeConfig;

use crate::dto::premium::{CommitRequest, PreviewRequest, PreviewResponse};
use crate::{error::ApiError, AppState};

/// Returns the active premium mode table
pub async fn list_modes(State(state): State<AppState>) -> Json<PremiumModeConfig> {
    Json(state.calculator.modes().clone())
}

/// Previews the due-date rollover for a payment being entered
///
/// Called on every change to the payment form, so it never records anything.
pub async fn preview_payment(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, ApiError> {
    request.validate()?;
    let currency = state.config.currency;

    let policy = request.policy.into_policy(currency)?;
    let total = compute_total(
        &Money::new(request.amount_paid, currency),
        &Money::new(request.late_fee, currency),
        &Money::new(request.discount, currency),
    )?;
    let preview = state.calculator.evaluate(&policy, &total)?;

    Ok(Json(PreviewResponse {
        total,
        applicable: preview.is_some(),
        preview,
    }))
}

/// Records a payment and returns the policy update to persist with it
pub async fn commit_payment(
    State(state): State<AppState>,
    Json(request): Json<CommitRequest>,
) -> Result<Json<CommittedPayment>, ApiError> {
    request.validate()?;
    let currency = state.config.currency;

    let policy = request.policy.into_policy(currency)?;
    let payment = request
        .payment
        .into_payment(Some(policy.id), currency, state.today())?;
    let committed = state.calculator.commit(&policy, payment)?;

    tracing::info!(
        policy_id = %committed.policy.id,
        payment_id = %committed.payment.id,
        total = %committed.total,
        next_due_date = ?committed.policy.next_due_date,
        "Premium payment committed"
    );

    Ok(Json(committed))
}
