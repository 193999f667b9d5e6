//! The `assess` subcommand: assess one child, print the result, and
//! optionally log it and write a report.

use anyhow::{bail, Context};
use clap::Args;
use hfa_db::models::AssessmentRecord;
use hfa_db::report::{render_report, write_report};
use hfa_db::store::AssessmentLog;
use hfa_lms::{AssessmentResult, Assessor, Observation, ReferenceSet, Sex};
use hfa_utils::dates::{parse_date_lenient, today};
use hfa_utils::numbers::format_z;
use log::{debug, info, warn};
use serde::Serialize;
use std::path::PathBuf;

use crate::settings::{load_config, PresetArg};

/// Accepted height range on the screening form, in centimetres.
pub const HEIGHT_RANGE_CM: (f64, f64) = (30.0, 200.0);

/// Accepted weight range on the screening form, in kilograms.
pub const WEIGHT_RANGE_KG: (f64, f64) = (5.0, 100.0);

#[derive(Debug, Clone, Args)]
pub struct AssessArgs {
    /// Child's name
    #[arg(long)]
    pub name: String,

    /// School class, e.g. "3B"
    #[arg(long)]
    pub class: String,

    /// Birth date (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(short = 'b', long)]
    pub birth_date: String,

    /// Sex: male/female (also m/f, boy/girl, Laki-laki/Perempuan)
    #[arg(short = 's', long)]
    pub sex: String,

    /// Height in centimetres
    #[arg(long)]
    pub height: f64,

    /// Weight in kilograms (logged only)
    #[arg(long)]
    pub weight: f64,

    /// Measurement date (defaults to today)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Reference CSV for boys (columns Month, L, M, S)
    #[arg(long, env = "HFA_BOYS_TABLE")]
    pub boys_table: PathBuf,

    /// Reference CSV for girls (columns Month, L, M, S)
    #[arg(long, env = "HFA_GIRLS_TABLE")]
    pub girls_table: PathBuf,

    /// Policy preset
    #[arg(long, value_enum, default_value = "standard")]
    pub preset: PresetArg,

    /// TOML file overriding parts of the preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Append the result to this CSV log
    #[arg(short = 'l', long)]
    pub log: Option<PathBuf>,

    /// Write a text report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON shape printed by `assess --json`.
#[derive(Debug, Serialize)]
struct AssessOutput<'a> {
    record: &'a AssessmentRecord,
    result: &'a AssessmentResult,
}

/// Check the form fields before any computation.
fn validate_form(args: &AssessArgs) -> anyhow::Result<()> {
    for (field, value) in [("name", &args.name), ("class", &args.class)] {
        if value.trim().is_empty() {
            bail!("{field} must not be empty");
        }
        // Reports hold one `Key: value` pair per line.
        if value.chars().any(char::is_control) {
            bail!("{field} must not contain control characters");
        }
    }
    let (min_h, max_h) = HEIGHT_RANGE_CM;
    if !(min_h..=max_h).contains(&args.height) {
        bail!("height {} cm is outside {}..={} cm", args.height, min_h, max_h);
    }
    let (min_w, max_w) = WEIGHT_RANGE_KG;
    if !(min_w..=max_w).contains(&args.weight) {
        bail!("weight {} kg is outside {}..={} kg", args.weight, min_w, max_w);
    }
    Ok(())
}

/// Run one assessment. Returns the logged record.
///
/// Nothing is written to the log or report when the assessment fails.
pub fn run_assess(args: &AssessArgs) -> anyhow::Result<AssessmentRecord> {
    validate_form(args)?;
    let birth_date = parse_date_lenient(&args.birth_date).context("birth date")?;
    let observation_date = match &args.as_of {
        Some(s) => parse_date_lenient(s).context("measurement date")?,
        None => today(),
    };
    let sex: Sex = args.sex.parse()?;

    let config = load_config(args.preset.into(), args.config.as_deref())?;
    let references = ReferenceSet::from_csv_paths(&args.boys_table, &args.girls_table)
        .context("loading reference tables")?;
    let assessor = Assessor::new(references, config)?;

    let observation = Observation::new(birth_date, observation_date, sex, args.height);
    let result = assessor.assess(&observation).map_err(|e| {
        warn!("assessment of {} failed: {}", args.name, e);
        e
    })?;
    let record = AssessmentRecord::from_assessment(&args.name, &args.class, args.weight, &observation, &result);

    if args.json {
        let output = AssessOutput { record: &record, result: &result };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Result: {}", result.category);
        println!("Age: {}", record.age);
        println!(
            "Z-score: {} (reference month {}, L={}, M={}, S={})",
            format_z(result.z_score),
            result.reference.age_months,
            result.reference.l,
            result.reference.m,
            result.reference.s
        );
        println!("Advice: {}", result.advisory);
    }

    if let Some(path) = &args.log {
        let log = AssessmentLog::new(path);
        log.append(&record)?;
        info!("logged {} to {}", record.name, log.path().display());
    }
    if let Some(path) = &args.report {
        write_report(&record, path)?;
    } else {
        debug!("report:\n{}", render_report(&record));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfa_lms::Category;
    use std::path::Path;

    const BOYS: &str = "Month,L,M,S\n95,1,119.5,0.09\n96,1,120.0,0.09\n97,1,120.5,0.09\n";
    const GIRLS: &str = "Month,L,M,S\n96,0,100.0,0.1\n";

    fn args(dir: &Path) -> AssessArgs {
        let boys = dir.join("boys.csv");
        let girls = dir.join("girls.csv");
        std::fs::write(&boys, BOYS).unwrap();
        std::fs::write(&girls, GIRLS).unwrap();
        AssessArgs {
            name: "Ana".to_string(),
            class: "3A".to_string(),
            birth_date: "2016-06-01".to_string(),
            sex: "male".to_string(),
            height: 110.0,
            weight: 19.5,
            as_of: Some("2024-06-01".to_string()),
            boys_table: boys,
            girls_table: girls,
            preset: PresetArg::Standard,
            config: None,
            log: Some(dir.join("log.csv")),
            report: Some(dir.join("report.txt")),
            json: false,
        }
    }

    #[test]
    fn assess_logs_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path());
        let record = run_assess(&args).unwrap();
        assert_eq!(record.category, Category::Normal);
        assert!((record.z_score - (-0.926)).abs() < 1e-3);

        let logged = AssessmentLog::new(dir.path().join("log.csv")).read_all().unwrap();
        assert_eq!(logged, vec![record.clone()]);
        let report = std::fs::read_to_string(dir.path().join("report.txt")).unwrap();
        assert!(report.contains("Status: Normal"));
    }

    #[test]
    fn girl_on_log_branch_needs_attention() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path());
        args.sex = "Perempuan".to_string();
        args.height = 82.0;
        args.birth_date = "01/06/2016".to_string();
        let record = run_assess(&args).unwrap();
        assert_eq!(record.category, Category::NeedsAttention);
        assert_eq!(record.sex, Sex::Female);
    }

    #[test]
    fn failed_assessment_does_not_touch_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = AssessmentLog::new(dir.path().join("log.csv"));
        let first = run_assess(&args(dir.path())).unwrap();

        let mut bad = args(dir.path());
        bad.as_of = Some("2020-06-01".to_string());
        assert!(run_assess(&bad).is_err());

        let mut inverted = args(dir.path());
        inverted.as_of = Some("2015-01-01".to_string());
        assert!(run_assess(&inverted).is_err());

        assert_eq!(log.read_all().unwrap(), vec![first]);
    }

    #[test]
    fn rejects_empty_name_and_class() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path());
        a.name = "  ".to_string();
        assert!(run_assess(&a).is_err());
        let mut a = args(dir.path());
        a.class = String::new();
        assert!(run_assess(&a).is_err());
    }

    #[test]
    fn rejects_control_characters_in_text_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path());
        a.name = "Ana\nStatus: Normal".to_string();
        let err = run_assess(&a).unwrap_err();
        assert!(err.to_string().contains("control characters"));
        let mut a = args(dir.path());
        a.class = "3A\t".to_string();
        assert!(run_assess(&a).is_err());
        assert!(!dir.path().join("report.txt").exists());
        assert!(!dir.path().join("log.csv").exists());
    }

    #[test]
    fn rejects_out_of_range_measurements() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path());
        a.height = 250.0;
        assert!(run_assess(&a).is_err());
        let mut a = args(dir.path());
        a.weight = 2.0;
        assert!(run_assess(&a).is_err());
    }

    #[test]
    fn nearest_preset_accepts_missing_month() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path());
        a.preset = PresetArg::Nearest;
        a.as_of = Some("2024-09-15".to_string());
        let record = run_assess(&a).unwrap();
        assert_eq!(record.observation_date.to_string(), "2024-09-15");
    }
}
