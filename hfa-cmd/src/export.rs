//! The `export` and `summary` subcommands.

use hfa_db::models::{CategoryTotal, SummaryRow};
use hfa_db::store::AssessmentLog;
use hfa_db::Database;
use hfa_lms::Category;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Grouped counts plus per-category totals over the whole log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub groups: Vec<SummaryRow>,
    pub totals: Vec<CategoryTotal>,
}

fn label(key: &str) -> &str {
    Category::from_key(key).map(|c| c.label()).unwrap_or(key)
}

/// Copy the whole log, header included, to `output`.
pub fn run_export(log_csv: &Path, output: &Path) -> anyhow::Result<()> {
    let log = AssessmentLog::new(log_csv);
    if !log_csv.exists() {
        anyhow::bail!("no assessments saved yet: {} does not exist", log_csv.display());
    }
    let count = log.export_to(output)?;
    println!("Exported {} assessments to {}", count, output.display());
    Ok(())
}

/// Load the log into an in-memory database and return the grouped counts.
pub fn summarize(log_csv: &Path) -> anyhow::Result<Summary> {
    let records = AssessmentLog::new(log_csv).read_all()?;
    let db = Database::new()?;
    db.load_records(&records)?;
    let groups = db.query_summary()?;
    let totals = db.query_category_totals()?;
    info!(
        "summarized {} assessments into {} groups",
        records.len(),
        groups.len()
    );
    Ok(Summary { groups, totals })
}

/// Print counts per class, sex and category.
pub fn run_summary(log_csv: &Path, json: bool) -> anyhow::Result<()> {
    let summary = summarize(log_csv)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    if summary.groups.is_empty() {
        println!("No data to summarize yet.");
        return Ok(());
    }
    println!("{:<8} {:<7} {:<20} {:>5}", "class", "sex", "status", "count");
    for row in &summary.groups {
        println!("{:<8} {:<7} {:<20} {:>5}", row.class, row.sex, label(&row.category), row.count);
    }
    println!();
    println!("{:<37} {:>5}", "total", "count");
    for total in &summary.totals {
        println!("{:<37} {:>5}", label(&total.category), total.count);
    }
    Ok(())
}
