//! Plain-text per-child report: one `Key: value` line per field.

use anyhow::Context;
use std::path::Path;

use crate::models::AssessmentRecord;

/// Render the report for one record.
pub fn render_report(record: &AssessmentRecord) -> String {
    record
        .report_fields()
        .into_iter()
        .map(|(key, value)| format!("{key}: {value}\n"))
        .collect()
}

/// Render and write the report for one record.
pub fn write_report<P: AsRef<Path>>(record: &AssessmentRecord, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_report(record))
        .with_context(|| format!("writing report {}", path.display()))?;
    log::info!("wrote report for {} to {}", record.name, path.display());
    Ok(())
}
