//! Age decomposition used for reference-table lookup.
//!
//! The breakdown uses fixed 365-day years and 30-day months. It is not
//! calendar-accurate, and the reference lookups are calibrated against
//! exactly this arithmetic, so it must not be "corrected".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::MonthPolicy;
use crate::error::{HfaError, Result};

/// Days in an approximate year.
pub const DAYS_PER_YEAR: i64 = 365;

/// Days in an approximate month.
pub const DAYS_PER_MONTH: i64 = 30;

/// Mean Gregorian month length, used by [`MonthPolicy::MeanMonth`].
pub const MEAN_MONTH_DAYS: f64 = 30.4375;

/// Age of a subject on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub total_days: u32,
    /// Age in months used for the reference lookup.
    pub total_months: u32,
    /// Fractional age in months, to one decimal place. Age windows are
    /// checked against this value rather than the rounded lookup age.
    pub months_exact: f64,
}

impl AgeBreakdown {
    /// Display text in the form "8 years, 0 months, 3 days".
    pub fn text(&self) -> String {
        format!(
            "{} years, {} months, {} days",
            self.years, self.months, self.days
        )
    }
}

/// Compute the age of a subject born on `birth` as of `as_of`.
///
/// Fails with [`HfaError::InvalidDate`] when `as_of` precedes `birth`.
pub fn compute_age(birth: NaiveDate, as_of: NaiveDate, policy: MonthPolicy) -> Result<AgeBreakdown> {
    let total_days = (as_of - birth).num_days();
    if total_days < 0 {
        return Err(HfaError::InvalidDate { birth, as_of });
    }
    let years = total_days / DAYS_PER_YEAR;
    let remainder = total_days % DAYS_PER_YEAR;
    let months = remainder / DAYS_PER_MONTH;
    let days = remainder % DAYS_PER_MONTH;
    let (total_months, months_exact) = match policy {
        MonthPolicy::Decomposed => (
            years * 12 + months,
            (years * 12 + months) as f64 + days as f64 / DAYS_PER_MONTH as f64,
        ),
        MonthPolicy::MeanMonth => {
            let exact = total_days as f64 / MEAN_MONTH_DAYS;
            (exact.round() as i64, exact)
        }
    };
    Ok(AgeBreakdown {
        years: years as u32,
        months: months as u32,
        days: days as u32,
        total_days: total_days as u32,
        total_months: total_months as u32,
        months_exact: (months_exact * 10.0).round() / 10.0,
    })
}
