//! HTTP API Layer
//!
//! This crate exposes the premium engine over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Rollover preview and commit, analytics snapshot, due reminders
//! - **Middleware**: Request ids, tracing, request logging
//! - **DTOs**: Request/Response data transfer objects with validation
//! - **Error Handling**: Consistent JSON error responses
//!
//! The engine keeps no state between requests beyond the premium mode table
//! loaded at startup; callers send the policy and payment records each
//! operation needs.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(config)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_analytics::PortfolioAnalyticsAggregator;
use domain_billing::PaymentRolloverCalculator;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::{analytics, health, premium};
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub calculator: PaymentRolloverCalculator,
    pub aggregator: PortfolioAnalyticsAggregator,
}

impl AppState {
    /// Builds the engine components over one validated premium mode table
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the premium mode table cannot be
    /// loaded.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let modes = Arc::new(config.load_premium_modes()?);

        Ok(Self {
            calculator: PaymentRolloverCalculator::new(Arc::clone(&modes)),
            aggregator: PortfolioAnalyticsAggregator::new(modes, config.currency),
            config: Arc::new(config),
        })
    }

    /// Today in the configured timezone
    pub fn today(&self) -> NaiveDate {
        self.config.timezone.today()
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared engine state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/premium-modes", get(premium::list_modes))
        .route("/premiums/preview", post(premium::preview_payment))
        .route("/premiums/commit", post(premium::commit_payment))
        .route("/analytics/snapshot", post(analytics::portfolio_snapshot))
        .route("/policies/due", post(analytics::due_reminders));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
