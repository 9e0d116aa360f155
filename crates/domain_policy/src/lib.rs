//! Policy Domain
//!
//! This crate holds the policy-side state the premium engine reads:
//! - **Policy**: the due-date state and premium terms of an agency policy
//! - **PremiumModeConfig**: the single, validated table mapping each premium
//!   mode to its installment count and billing period
//! - **Scheduling**: classification of next due dates for reminders
//!
//! Policies are owned by clients and persisted elsewhere. Nothing in this
//! crate mutates a policy in place; the only change the engine ever makes is
//! producing a copy with a replaced `next_due_date`.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{Policy, PremiumMode, PremiumModeConfig};
//!
//! let modes = PremiumModeConfig::standard();
//! let period = modes.period_months(PremiumMode::Quarterly)?; // Some(3)
//! ```

pub mod error;
pub mod policy;
pub mod premium;
pub mod schedule;

pub use error::PolicyError;
pub use policy::{Policy, PolicyStatus};
pub use premium::{PremiumMode, PremiumModeConfig, PremiumModeEntry, PremiumModeSetting};
pub use schedule::{due_status, upcoming_dues, DueReminder, DueStatus};
