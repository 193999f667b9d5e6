//! Record and query result structs for the assessment log.
//!
//! All structs derive `Serialize` so they can be written to CSV or
//! printed as JSON by the command layer.

use chrono::NaiveDate;
use hfa_lms::{AssessmentResult, Category, Observation, Sex};
use hfa_utils::dates::format_date;
use hfa_utils::numbers::format_measure;
use serde::{Deserialize, Serialize};

/// CSV header of the assessment log, in column order.
pub const LOG_HEADER: [&str; 11] = [
    "name",
    "birth_date",
    "sex",
    "class",
    "height_cm",
    "weight_kg",
    "age",
    "z_score",
    "category",
    "advisory",
    "observation_date",
];

/// One row of the assessment log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Child's name as entered.
    pub name: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    /// School class, e.g. "3B".
    pub class: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Age text, "8 years, 0 months, 2 days".
    pub age: String,
    pub z_score: f64,
    pub category: Category,
    pub advisory: String,
    pub observation_date: NaiveDate,
}

impl AssessmentRecord {
    /// Build a log row from a completed assessment. Weight is recorded
    /// but plays no part in the height-for-age score.
    pub fn from_assessment(
        name: &str,
        class: &str,
        weight_kg: f64,
        observation: &Observation,
        result: &AssessmentResult,
    ) -> Self {
        AssessmentRecord {
            name: name.trim().to_string(),
            birth_date: observation.birth_date,
            sex: observation.sex,
            class: class.trim().to_string(),
            height_cm: observation.height_cm,
            weight_kg,
            age: result.age.text(),
            z_score: result.z_score,
            category: result.category,
            advisory: result.advisory.to_string(),
            observation_date: observation.observation_date,
        }
    }

    /// Report lines in display order.
    pub fn report_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Birth date", format_date(&self.birth_date)),
            ("Observation date", format_date(&self.observation_date)),
            ("Age", self.age.clone()),
            ("Sex", self.sex.to_string()),
            ("Class", self.class.clone()),
            ("Height (cm)", format_measure(self.height_cm)),
            ("Weight (kg)", format_measure(self.weight_kg)),
            ("Z-score", format!("{:.2}", self.z_score)),
            ("Status", self.category.label().to_string()),
            ("Advice", self.advisory.clone()),
        ]
    }
}

/// Number of assessments for one (class, sex, category) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub class: String,
    pub sex: String,
    pub category: String,
    pub count: i64,
}

/// Number of assessments per category over the whole log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub count: i64,
}
