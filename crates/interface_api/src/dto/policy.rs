//! Policy DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ClientId, Currency, Money, PolicyId};
use domain_policy::{Policy, PolicyStatus, PremiumMode};

use crate::error::ApiError;

/// Policy state as held by the caller
///
/// The engine does not store policies, so every request that needs one
/// carries its current state.
#[derive(Debug, Deserialize, Validate)]
pub struct PolicyRequest {
    pub id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    #[validate(length(min = 1, max = 64))]
    pub policy_number: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub insurer: String,
    pub status: Option<PolicyStatus>,
    /// Mode identifier; blank is treated as absent
    pub premium_mode: Option<String>,
    pub premium_amount: Option<Decimal>,
    pub annual_premium: Option<Decimal>,
    pub sum_assured: Option<Decimal>,
    pub next_due_date: Option<NaiveDate>,
}

impl PolicyRequest {
    /// Converts to a domain policy in `currency`
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown premium mode and a
    /// validation error for negative amounts.
    pub fn into_policy(self, currency: Currency) -> Result<Policy, ApiError> {
        let premium_mode = self
            .premium_mode
            .as_deref()
            .filter(|mode| !mode.trim().is_empty())
            .map(str::parse::<PremiumMode>)
            .transpose()?;

        let money = |field: &str, amount: Option<Decimal>| -> Result<Option<Money>, ApiError> {
            match amount {
                Some(value) if value < Decimal::ZERO => Err(ApiError::validation(format!(
                    "{} must not be negative, got {}",
                    field, value
                ))),
                other => Ok(other.map(|value| Money::new(value, currency))),
            }
        };

        let client_id = self.client_id.map(ClientId::from).unwrap_or_default();
        let mut policy = Policy::new(client_id, self.policy_number, self.insurer);
        if let Some(id) = self.id {
            policy.id = PolicyId::from(id);
        }
        policy.status = self.status.unwrap_or(PolicyStatus::Active);
        policy.premium_mode = premium_mode;
        policy.premium_amount = money("premium_amount", self.premium_amount)?;
        policy.annual_premium = money("annual_premium", self.annual_premium)?;
        policy.sum_assured = money("sum_assured", self.sum_assured)?;
        policy.next_due_date = self.next_due_date;
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> PolicyRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_into_policy() {
        let id = Uuid::new_v4();
        let policy = request(serde_json::json!({
            "id": id,
            "policy_number": "LIC-100234",
            "insurer": "LIC",
            "premium_mode": "quarterly",
            "premium_amount": "6000",
            "next_due_date": "2024-03-15"
        }))
        .into_policy(Currency::INR)
        .unwrap();

        assert_eq!(policy.id, PolicyId::from(id));
        assert_eq!(policy.premium_mode, Some(PremiumMode::Quarterly));
        assert_eq!(policy.status, PolicyStatus::Active);
        assert_eq!(policy.premium_amount, Some(Money::new(Decimal::from(6000), Currency::INR)));
    }

    #[test]
    fn test_blank_mode_is_absent() {
        let policy = request(serde_json::json!({ "policy_number": "A", "premium_mode": " " }))
            .into_policy(Currency::INR)
            .unwrap();
        assert!(policy.premium_mode.is_none());
    }

    #[test]
    fn test_unknown_mode_is_configuration_error() {
        let result = request(serde_json::json!({ "policy_number": "A", "premium_mode": "WEEKLY" }))
            .into_policy(Currency::INR);
        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }

    #[test]
    fn test_negative_sum_assured_rejected() {
        let result = request(serde_json::json!({ "policy_number": "A", "sum_assured": -1 }))
            .into_policy(Currency::INR);
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }

    #[test]
    fn test_empty_policy_number_fails_validation() {
        assert!(request(serde_json::json!({ "policy_number": "" })).validate().is_err());
    }
}
