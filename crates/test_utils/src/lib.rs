//! Shared test support for the premium engine
//!
//! Integration tests across the domain crates build their policies and
//! payments from here so that scenarios read the same everywhere.
//!
//! # Modules
//!
//! - `fixtures`: Named policies, dates and engine components used by the worked scenarios
//! - `builders`: Policy and payment builders with quarterly-premium defaults
//! - `assertions`: Rollover and snapshot assertions with descriptive failures
//! - `generators`: proptest strategies for policies, payments and portfolios

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
