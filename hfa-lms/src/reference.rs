use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};

use crate::config::LookupPolicy;
use crate::error::{HfaError, Result};
use crate::observation::Sex;

/// Column names read from a reference CSV. Matching is case-insensitive
/// and every other column (SD cut-offs, percentiles) is ignored.
pub const MONTH_COLUMN: &str = "month";
pub const L_COLUMN: &str = "l";
pub const M_COLUMN: &str = "m";
pub const S_COLUMN: &str = "s";

/// One row of a growth-reference table: the LMS parameters for an age.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub age_months: u32,
    /// Box-Cox power (lambda)
    pub l: f64,
    /// Median (mu), in centimetres
    pub m: f64,
    /// Coefficient of variation (sigma)
    pub s: f64,
}

/// The reference rows for one sex, kept in source order.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ReferenceTable {
    sex: Sex,
    rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    /// Build a table, rejecting empty input, duplicate ages and
    /// non-positive or non-finite parameters.
    pub fn new(sex: Sex, rows: Vec<ReferenceRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(HfaError::InvalidReference(format!("{sex} table has no rows")));
        }
        let mut seen = HashSet::new();
        for row in &rows {
            if !seen.insert(row.age_months) {
                return Err(HfaError::InvalidReference(format!(
                    "{sex} table has duplicate month {}",
                    row.age_months
                )));
            }
            if !(row.l.is_finite() && row.m.is_finite() && row.s.is_finite()) {
                return Err(HfaError::InvalidReference(format!(
                    "{sex} month {} has a non-finite parameter",
                    row.age_months
                )));
            }
            if row.m <= 0.0 || row.s <= 0.0 {
                return Err(HfaError::InvalidReference(format!(
                    "{sex} month {}: M and S must be positive (M={}, S={})",
                    row.age_months, row.m, row.s
                )));
            }
        }
        Ok(ReferenceTable { sex, rows })
    }

    /// Parse a reference table from CSV text with a header row.
    ///
    /// Expected columns (any order, case-insensitive): `Month, L, M, S`
    ///
    /// # Example CSV
    /// ```text
    /// Month,L,M,S,SD2neg,SD2
    /// 61,1,110.2647,0.04164,101.1,119.4
    /// ```
    pub fn from_csv_str(sex: Sex, csv_data: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());
        let headers = rdr.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers)?;
        let mut rows = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result?;
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }
            rows.push(columns.parse_row(&record, line + 2)?);
        }
        debug!("parsed {} {} reference rows", rows.len(), sex);
        ReferenceTable::new(sex, rows)
    }

    /// Read and parse a reference table from a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(sex: Sex, path: P) -> Result<Self> {
        let path = path.as_ref();
        let csv_data = std::fs::read_to_string(path)?;
        let table = ReferenceTable::from_csv_str(sex, &csv_data)?;
        info!(
            "loaded {} reference table from {} ({} rows)",
            sex,
            path.display(),
            table.len()
        );
        Ok(table)
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Smallest and largest age covered by the table.
    pub fn age_span(&self) -> (u32, u32) {
        let min = self.rows.iter().map(|r| r.age_months).min().unwrap_or(0);
        let max = self.rows.iter().map(|r| r.age_months).max().unwrap_or(0);
        (min, max)
    }
}

/// Positions of the LMS columns within a CSV header.
struct ColumnIndex {
    month: usize,
    l: usize,
    m: usize,
    s: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| HfaError::InvalidReference(format!("missing column '{name}'")))
        };
        Ok(ColumnIndex {
            month: find(MONTH_COLUMN)?,
            l: find(L_COLUMN)?,
            m: find(M_COLUMN)?,
            s: find(S_COLUMN)?,
        })
    }

    fn parse_row(&self, record: &StringRecord, line: usize) -> Result<ReferenceRow> {
        let month_raw = field(record, self.month, "Month", line)?;
        let age_months = month_raw.parse::<u32>().map_err(|_| {
            HfaError::InvalidReference(format!("line {line}: Month '{month_raw}' is not a whole number"))
        })?;
        Ok(ReferenceRow {
            age_months,
            l: number(record, self.l, "L", line)?,
            m: number(record, self.m, "M", line)?,
            s: number(record, self.s, "S", line)?,
        })
    }
}

fn field<'r>(record: &'r StringRecord, idx: usize, name: &str, line: usize) -> Result<&'r str> {
    record
        .get(idx)
        .ok_or_else(|| HfaError::InvalidReference(format!("line {line}: missing {name}")))
}

fn number(record: &StringRecord, idx: usize, name: &str, line: usize) -> Result<f64> {
    let raw = field(record, idx, name, line)?;
    raw.parse::<f64>()
        .map_err(|_| HfaError::InvalidReference(format!("line {line}: {name} '{raw}' is not a number")))
}

/// Exactly one reference table per sex.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSet {
    male: ReferenceTable,
    female: ReferenceTable,
}

impl ReferenceSet {
    pub fn new(male: ReferenceTable, female: ReferenceTable) -> Result<Self> {
        if male.sex() != Sex::Male || female.sex() != Sex::Female {
            return Err(HfaError::InvalidReference(
                "reference set needs one male and one female table".to_string(),
            ));
        }
        Ok(ReferenceSet { male, female })
    }

    /// Load both tables from CSV files.
    pub fn from_csv_paths<P: AsRef<Path>, Q: AsRef<Path>>(male: P, female: Q) -> Result<Self> {
        ReferenceSet::new(
            ReferenceTable::from_csv_path(Sex::Male, male)?,
            ReferenceTable::from_csv_path(Sex::Female, female)?,
        )
    }

    pub fn table(&self, sex: Sex) -> &ReferenceTable {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }
}

/// Find the reference row for an age under the given policy.
///
/// `Exact` fails with [`HfaError::NotFound`] when no row has that age.
/// `Nearest` returns the row closest in age; on a tie the row that comes
/// first in the table wins.
pub fn lookup_row(table: &ReferenceTable, age_months: u32, policy: LookupPolicy) -> Result<ReferenceRow> {
    let found = match policy {
        LookupPolicy::Exact => table.rows.iter().find(|r| r.age_months == age_months),
        LookupPolicy::Nearest => table
            .rows
            .iter()
            .fold(None::<&ReferenceRow>, |best, row| match best {
                Some(b) if b.age_months.abs_diff(age_months) <= row.age_months.abs_diff(age_months) => Some(b),
                _ => Some(row),
            }),
    };
    found.copied().ok_or(HfaError::NotFound {
        sex: table.sex,
        age_months,
    })
}
