//! File-backed, append-only assessment log.
//!
//! The log is a CSV file with the [`LOG_HEADER`] columns. Rows are only
//! ever appended; the header is written when the file is new or empty.
//! A missing file reads as an empty log.

use anyhow::Context;
use log::{debug, info};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::models::{AssessmentRecord, LOG_HEADER};

/// Caller-owned handle to a CSV assessment log.
#[derive(Debug, Clone)]
pub struct AssessmentLog {
    path: PathBuf,
}

impl AssessmentLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        AssessmentLog {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush it to disk.
    pub fn append(&self, record: &AssessmentRecord) -> anyhow::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening log {}", self.path.display()))?;
        let is_empty = file.metadata()?.len() == 0;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_empty {
            wtr.write_record(LOG_HEADER)?;
        }
        wtr.serialize(record)?;
        wtr.flush()?;
        debug!("appended {} to {}", record.name, self.path.display());
        Ok(())
    }

    /// Read every record in append order.
    pub fn read_all(&self) -> anyhow::Result<Vec<AssessmentRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .with_context(|| format!("opening log {}", self.path.display()))?;
        let records = rdr
            .deserialize()
            .collect::<Result<Vec<AssessmentRecord>, _>>()
            .with_context(|| format!("parsing log {}", self.path.display()))?;
        info!("read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Write the whole log, header included, to a new CSV file.
    pub fn export_to<P: AsRef<Path>>(&self, output: P) -> anyhow::Result<usize> {
        let output = output.as_ref();
        let records = self.read_all()?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(output)
            .with_context(|| format!("creating {}", output.display()))?;
        wtr.write_record(LOG_HEADER)?;
        for record in &records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        info!("exported {} records to {}", records.len(), output.display());
        Ok(records.len())
    }
}
