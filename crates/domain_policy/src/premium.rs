//! Premium modes and the premium mode table
//!
//! A premium mode is the billing frequency of a policy. Its installment count
//! and billing period are owned by one `PremiumModeConfig`, validated for
//! completeness when it is built and then shared read-only by the rollover
//! calculator and the analytics aggregator.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

const MONTHS_PER_YEAR: u32 = 12;

/// Premium payment frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PremiumMode {
    /// Twelve installments a year
    Monthly,
    /// Four installments a year
    Quarterly,
    /// Two installments a year
    HalfYearly,
    /// One installment a year
    Yearly,
    /// One-off premium, never recurs
    Single,
}

impl PremiumMode {
    /// Every mode a complete table must cover
    pub const ALL: [PremiumMode; 5] = [
        PremiumMode::Monthly,
        PremiumMode::Quarterly,
        PremiumMode::HalfYearly,
        PremiumMode::Yearly,
        PremiumMode::Single,
    ];

    /// Canonical identifier, as stored and rendered
    pub fn code(&self) -> &'static str {
        match self {
            PremiumMode::Monthly => "MONTHLY",
            PremiumMode::Quarterly => "QUARTERLY",
            PremiumMode::HalfYearly => "HALF_YEARLY",
            PremiumMode::Yearly => "YEARLY",
            PremiumMode::Single => "SINGLE",
        }
    }

    /// False only for SINGLE, whose due date never rolls forward
    pub fn is_recurring(&self) -> bool {
        !matches!(self, PremiumMode::Single)
    }
}

impl fmt::Display for PremiumMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PremiumMode {
    type Err = PolicyError;

    /// Parses a mode identifier case-insensitively
    ///
    /// Unknown identifiers are a configuration error rather than a fallback
    /// to some default frequency.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "MONTHLY" => Ok(PremiumMode::Monthly),
            "QUARTERLY" => Ok(PremiumMode::Quarterly),
            "HALFYEARLY" | "SEMIANNUAL" => Ok(PremiumMode::HalfYearly),
            "YEARLY" | "ANNUAL" => Ok(PremiumMode::Yearly),
            "SINGLE" => Ok(PremiumMode::Single),
            _ => Err(PolicyError::configuration(format!(
                "unknown premium mode '{}'",
                s
            ))),
        }
    }
}

/// Billing terms of one premium mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PremiumModeEntry {
    installments_per_year: u32,
    /// Months between installments; `None` marks a non-recurring mode
    period_months: Option<u32>,
}

impl PremiumModeEntry {
    /// A recurring mode with `installments_per_year` installments
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless the count is a positive divisor of 12
    pub fn recurring(installments_per_year: u32) -> Result<Self, PolicyError> {
        if installments_per_year == 0 || MONTHS_PER_YEAR % installments_per_year != 0 {
            return Err(PolicyError::configuration(format!(
                "installments per year must be a positive divisor of 12, got {}",
                installments_per_year
            )));
        }
        Ok(Self {
            installments_per_year,
            period_months: Some(MONTHS_PER_YEAR / installments_per_year),
        })
    }

    /// A one-off mode: counted once a year and never rolled forward
    pub fn non_recurring() -> Self {
        Self {
            installments_per_year: 1,
            period_months: None,
        }
    }

    pub fn installments_per_year(&self) -> u32 {
        self.installments_per_year
    }

    pub fn period_months(&self) -> Option<u32> {
        self.period_months
    }

    /// Multiplier from one installment to an annual premium
    pub fn annual_factor(&self) -> Decimal {
        Decimal::from(self.installments_per_year)
    }
}

/// One row of a premium mode table as written in a configuration file
///
/// `recurring` may be omitted, in which case the mode's own recurrence
/// applies. An explicit value must agree with it.
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumModeSetting {
    pub installments_per_year: u32,
    #[serde(default)]
    pub recurring: Option<bool>,
}

/// The premium mode table
///
/// Construction fails unless every [`PremiumMode`] has an entry, so callers
/// can rely on a lookup succeeding for any mode a policy carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PremiumModeConfig {
    entries: BTreeMap<PremiumMode, PremiumModeEntry>,
}

impl PremiumModeConfig {
    /// The standard agency table
    ///
    /// MONTHLY 12, QUARTERLY 4, HALF_YEARLY 2, YEARLY 1, SINGLE non-recurring.
    pub fn standard() -> Self {
        let entries = [
            (PremiumMode::Monthly, 12),
            (PremiumMode::Quarterly, 4),
            (PremiumMode::HalfYearly, 2),
            (PremiumMode::Yearly, 1),
        ]
        .into_iter()
        .map(|(mode, n)| {
            (
                mode,
                PremiumModeEntry {
                    installments_per_year: n,
                    period_months: Some(MONTHS_PER_YEAR / n),
                },
            )
        })
        .chain(std::iter::once((PremiumMode::Single, PremiumModeEntry::non_recurring())))
        .collect();

        Self { entries }
    }

    /// Builds a table from explicit entries, checking completeness
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a mode appears twice, if SINGLE is
    /// given a billing period or another mode is given none, or naming the
    /// modes without an entry.
    pub fn from_entries<I>(entries: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = (PremiumMode, PremiumModeEntry)>,
    {
        let mut table = BTreeMap::new();
        for (mode, entry) in entries {
            if entry.period_months().is_some() != mode.is_recurring() {
                return Err(PolicyError::configuration(format!(
                    "premium mode {} must {}have a billing period",
                    mode,
                    if mode.is_recurring() { "" } else { "not " }
                )));
            }
            if table.insert(mode, entry).is_some() {
                return Err(PolicyError::configuration(format!(
                    "premium mode {} is configured more than once",
                    mode
                )));
            }
        }
        let entries = table;

        let missing: Vec<&str> = PremiumMode::ALL
            .iter()
            .filter(|mode| !entries.contains_key(mode))
            .map(|mode| mode.code())
            .collect();

        if !missing.is_empty() {
            return Err(PolicyError::configuration(format!(
                "premium mode table has no entry for {}",
                missing.join(", ")
            )));
        }

        Ok(Self { entries })
    }

    /// Builds a table from configuration-file rows keyed by mode identifier
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown identifiers, two keys
    /// naming the same mode, a `recurring` flag that contradicts the mode,
    /// invalid installment counts, non-recurring rows with more than one
    /// installment, or an incomplete table.
    pub fn from_settings(settings: &BTreeMap<String, PremiumModeSetting>) -> Result<Self, PolicyError> {
        let mut entries = Vec::with_capacity(settings.len());

        for (key, setting) in settings {
            let mode: PremiumMode = key.parse()?;
            let recurring = setting.recurring.unwrap_or_else(|| mode.is_recurring());
            if recurring != mode.is_recurring() {
                return Err(PolicyError::configuration(format!(
                    "premium mode {} cannot be configured with recurring = {}",
                    mode, recurring
                )));
            }
            let entry = if recurring {
                PremiumModeEntry::recurring(setting.installments_per_year)?
            } else if setting.installments_per_year == 1 {
                PremiumModeEntry::non_recurring()
            } else {
                return Err(PolicyError::configuration(format!(
                    "non-recurring mode {} must have exactly one installment per year",
                    mode
                )));
            };
            entries.push((mode, entry));
        }

        Self::from_entries(entries)
    }

    /// Looks up the entry for a mode
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the mode has no entry
    pub fn entry(&self, mode: PremiumMode) -> Result<&PremiumModeEntry, PolicyError> {
        self.entries.get(&mode).ok_or_else(|| {
            PolicyError::configuration(format!("premium mode {} is not configured", mode))
        })
    }

    pub fn installments_per_year(&self, mode: PremiumMode) -> Result<u32, PolicyError> {
        self.entry(mode).map(PremiumModeEntry::installments_per_year)
    }

    /// Months between installments, `None` for non-recurring modes
    pub fn period_months(&self, mode: PremiumMode) -> Result<Option<u32>, PolicyError> {
        self.entry(mode).map(PremiumModeEntry::period_months)
    }

    /// Entries in mode order
    pub fn iter(&self) -> impl Iterator<Item = (PremiumMode, &PremiumModeEntry)> {
        self.entries.iter().map(|(mode, entry)| (*mode, entry))
    }
}

impl Default for PremiumModeConfig {
    fn default() -> Self {
        Self::standard()
    }
}
