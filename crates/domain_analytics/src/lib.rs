//! Portfolio Analytics
//!
//! Reduces a client's or workspace's policies and premium payments into the
//! summary figures shown on dashboards and in generated reports:
//!
//! - policy counts, sum assured, annualised premium, premiums paid
//! - breakdowns by status, insurer and premium mode, in first-seen order
//! - a trailing twelve-month premium trend, oldest month first
//!
//! Aggregation is a pure reduction over its inputs and an explicit reference
//! date. Empty inputs produce a zero snapshot, never an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_analytics::PortfolioAnalyticsAggregator;
//!
//! let aggregator = PortfolioAnalyticsAggregator::new(modes, Currency::INR);
//! let snapshot = aggregator.aggregate(&policies, &payments, today)?;
//! render_cards(snapshot.total_premiums_paid, snapshot.monthly_premium_trend);
//! ```

pub mod aggregator;
pub mod breakdown;
pub mod error;
pub mod snapshot;
pub mod trend;

pub use aggregator::PortfolioAnalyticsAggregator;
pub use breakdown::Breakdown;
pub use error::AnalyticsError;
pub use snapshot::AnalyticsSnapshot;
pub use trend::{MonthlyTrendBucketizer, TrendPoint, TREND_MONTHS};
