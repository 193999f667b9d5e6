//! The `bands` subcommand: show the active threshold table.

use hfa_lms::{advise, AssessmentConfig, Preset};
use std::path::Path;

use crate::settings::load_config;

/// Render the policies and bands of a configuration, one band per line.
pub fn describe(config: &AssessmentConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("month policy: {:?}\n", config.month_policy));
    out.push_str(&format!("lookup policy: {:?}\n", config.lookup_policy));
    match config.age_window {
        Some(w) => out.push_str(&format!("age window: {}..={} months\n", w.min_months, w.max_months)),
        None => out.push_str("age window: none\n"),
    }
    for band in config.thresholds.bands() {
        out.push_str(&format!(
            "{:<14} {:<20} {}\n",
            band.to_string(),
            band.category.label(),
            advise(band.category)
        ));
    }
    out
}

pub fn run_bands(preset: Preset, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(preset, config_path)?;
    print!("{}", describe(&config));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_lists_every_band() {
        let text = describe(&Preset::Standard.config());
        assert!(text.contains("age window: 24..=228 months"));
        assert!(text.contains("[-2, -1)"));
        assert!(text.contains("Overgrowth risk"));
        assert_eq!(text.lines().count(), 3 + 4);
    }

    #[test]
    fn describe_severity_has_tall_band() {
        let text = describe(&Preset::Severity.config());
        assert!(text.contains("age window: none"));
        assert!(text.contains("(2, +inf)"));
        assert!(text.contains("Tall"));
    }
}
