//! API configuration

use std::collections::BTreeMap;

use serde::Deserialize;

use core_kernel::{Currency, Timezone};
use domain_policy::{PremiumModeConfig, PremiumModeSetting};

use crate::error::ApiError;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Timezone used to resolve "today" when a request has no reference date
    pub timezone: Timezone,
    /// Currency of every amount the API accepts and reports
    pub currency: Currency,
    /// Reminder window for due-date listings, in days
    pub due_soon_days: u32,
    /// Optional premium mode table file; the standard table is used when absent
    pub premium_modes_file: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_json: false,
            timezone: Timezone::default(),
            currency: Currency::INR,
            due_soon_days: 30,
            premium_modes_file: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// Unset variables keep their default value.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Loads and validates the premium mode table
    ///
    /// The file maps mode identifiers to `installments_per_year` and an
    /// optional `recurring` flag. Its format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the file cannot be read or the
    /// table it describes is incomplete or inconsistent.
    pub fn load_premium_modes(&self) -> Result<PremiumModeConfig, ApiError> {
        let Some(path) = &self.premium_modes_file else {
            return Ok(PremiumModeConfig::standard());
        };

        let settings: BTreeMap<String, PremiumModeSetting> = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?
            .try_deserialize()?;

        let modes = PremiumModeConfig::from_settings(&settings)?;
        tracing::info!(path = %path, modes = settings.len(), "Loaded premium mode table");
        Ok(modes)
    }
}
