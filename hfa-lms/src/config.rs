use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HfaError, Result};
use crate::thresholds::ThresholdTable;

/// Youngest age, in months, accepted by the school screening preset.
pub const SCREENING_MIN_MONTHS: u32 = 24;

/// Oldest age, in months, accepted by the school screening preset.
pub const SCREENING_MAX_MONTHS: u32 = 228;

/// How the total age in months is derived from the day count.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthPolicy {
    /// `years * 12 + months` from the 365/30-day decomposition.
    Decomposed,
    /// `round(total_days / 30.4375)`.
    MeanMonth,
}

/// How a reference row is matched to an age.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupPolicy {
    Exact,
    Nearest,
}

/// Inclusive range of ages, in months, that may be assessed at all.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct AgeWindow {
    pub min_months: u32,
    pub max_months: u32,
}

impl AgeWindow {
    pub fn new(min_months: u32, max_months: u32) -> Result<Self> {
        if min_months > max_months {
            return Err(HfaError::InvalidConfig(format!(
                "age window {min_months}..={max_months} is empty"
            )));
        }
        Ok(AgeWindow { min_months, max_months })
    }

    /// Accept a fractional age in months lying within the window. An age
    /// a few tenths of a month outside is rejected even though it would
    /// round onto an edge month.
    pub fn check(&self, age_months: f64) -> Result<()> {
        if age_months < f64::from(self.min_months) || age_months > f64::from(self.max_months) {
            return Err(HfaError::AgeOutOfRange {
                age_months,
                min_months: self.min_months,
                max_months: self.max_months,
            });
        }
        Ok(())
    }
}

/// Every policy choice an assessment depends on.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    pub month_policy: MonthPolicy,
    pub lookup_policy: LookupPolicy,
    pub thresholds: ThresholdTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_window: Option<AgeWindow>,
}

impl AssessmentConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(window) = self.age_window {
            AgeWindow::new(window.min_months, window.max_months)?;
        }
        Ok(())
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Preset::Standard.config()
    }
}

/// Named configurations covering the screening variants in use.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Mean-month age, exact lookup, four bands, 24..=228 months.
    Standard,
    /// Decomposed age, exact lookup, severity bands with a tall band.
    Severity,
    /// Decomposed age, nearest-row lookup, four bands.
    Nearest,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Standard, Preset::Severity, Preset::Nearest];

    pub fn config(&self) -> AssessmentConfig {
        match self {
            Preset::Standard => AssessmentConfig {
                month_policy: MonthPolicy::MeanMonth,
                lookup_policy: LookupPolicy::Exact,
                thresholds: ThresholdTable::four_band(),
                age_window: Some(AgeWindow {
                    min_months: SCREENING_MIN_MONTHS,
                    max_months: SCREENING_MAX_MONTHS,
                }),
            },
            Preset::Severity => AssessmentConfig {
                month_policy: MonthPolicy::Decomposed,
                lookup_policy: LookupPolicy::Exact,
                thresholds: ThresholdTable::severity_with_tall(),
                age_window: None,
            },
            Preset::Nearest => AssessmentConfig {
                month_policy: MonthPolicy::Decomposed,
                lookup_policy: LookupPolicy::Nearest,
                thresholds: ThresholdTable::four_band(),
                age_window: None,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Standard => "standard",
            Preset::Severity => "severity",
            Preset::Nearest => "nearest",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
