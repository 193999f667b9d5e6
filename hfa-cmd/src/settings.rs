//! Assessment configuration: a named preset, optionally overridden by a
//! TOML file.
//!
//! # Example file
//! ```toml
//! month_policy = "decomposed"
//! lookup_policy = "nearest"
//! disable_age_window = true
//!
//! [thresholds]
//! lowest = "severe"
//! cuts = [
//!   { at = -3.0, boundary = "inclusive", category = "moderate" },
//!   { at = -2.0, boundary = "inclusive", category = "normal" },
//! ]
//! ```

use anyhow::Context;
use clap::ValueEnum;
use hfa_lms::{AgeWindow, AssessmentConfig, LookupPolicy, MonthPolicy, Preset, ThresholdTable};
use log::info;
use serde::Deserialize;
use std::path::Path;

/// Command-line name for a [`Preset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    /// Mean-month age, exact lookup, four bands, ages 24..=228 months
    Standard,
    /// Decomposed age, exact lookup, severe/moderate/normal/tall bands
    Severity,
    /// Decomposed age, nearest-row lookup, four bands
    Nearest,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Standard => Preset::Standard,
            PresetArg::Severity => Preset::Severity,
            PresetArg::Nearest => Preset::Nearest,
        }
    }
}

/// Overrides read from a config file. Absent keys keep the preset value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub month_policy: Option<MonthPolicy>,
    pub lookup_policy: Option<LookupPolicy>,
    pub thresholds: Option<ThresholdTable>,
    pub age_window: Option<AgeWindow>,
    #[serde(default)]
    pub disable_age_window: bool,
}

impl ConfigFile {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply these overrides on top of `base`.
    pub fn apply(self, mut base: AssessmentConfig) -> anyhow::Result<AssessmentConfig> {
        if let Some(policy) = self.month_policy {
            base.month_policy = policy;
        }
        if let Some(policy) = self.lookup_policy {
            base.lookup_policy = policy;
        }
        if let Some(thresholds) = self.thresholds {
            base.thresholds = thresholds;
        }
        if self.disable_age_window {
            if self.age_window.is_some() {
                anyhow::bail!("age_window and disable_age_window are mutually exclusive");
            }
            base.age_window = None;
        } else if let Some(window) = self.age_window {
            base.age_window = Some(AgeWindow::new(window.min_months, window.max_months)?);
        }
        base.validate()?;
        Ok(base)
    }
}

/// Resolve the configuration for a run.
pub fn load_config(preset: Preset, path: Option<&Path>) -> anyhow::Result<AssessmentConfig> {
    let base = preset.config();
    let Some(path) = path else {
        info!("using {} preset", preset);
        return Ok(base);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let file = ConfigFile::parse(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!("using {} preset with overrides from {}", preset, path.display());
    file.apply(base)
}
