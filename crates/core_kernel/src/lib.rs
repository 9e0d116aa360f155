//! Core Kernel - Foundational types for the agency premium engine
//!
//! This crate provides the building blocks shared by the domain crates:
//! - Money types with fixed-point decimal arithmetic
//! - Calendar helpers for due-date rollover and monthly bucketing
//! - Strongly-typed identifiers for clients, policies and payments

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{YearMonth, Timezone, TemporalError, add_months_clamped};
pub use identifiers::{ClientId, IdError, PaymentId, PolicyId};
