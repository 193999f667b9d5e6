use log::debug;
use serde::Serialize;

use crate::age::{compute_age, AgeBreakdown};
use crate::category::{advise, Category};
use crate::config::AssessmentConfig;
use crate::error::Result;
use crate::observation::{Observation, Sex};
use crate::reference::{lookup_row, ReferenceRow, ReferenceSet};
use crate::score::compute_score;

/// Outcome of assessing one observation. Only produced when a reference
/// row was found, so `z_score` and `category` are always meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub sex: Sex,
    pub age: AgeBreakdown,
    pub reference: ReferenceRow,
    pub z_score: f64,
    pub category: Category,
    pub advisory: &'static str,
}

/// Runs assessments against a fixed reference set and configuration.
#[derive(Debug, Clone)]
pub struct Assessor {
    references: ReferenceSet,
    config: AssessmentConfig,
}

impl Assessor {
    pub fn new(references: ReferenceSet, config: AssessmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Assessor { references, config })
    }

    /// Age, lookup, score, classification and advice for one observation.
    pub fn assess(&self, observation: &Observation) -> Result<AssessmentResult> {
        let age = compute_age(
            observation.birth_date,
            observation.observation_date,
            self.config.month_policy,
        )?;
        if let Some(window) = self.config.age_window {
            window.check(age.months_exact)?;
        }
        let table = self.references.table(observation.sex);
        let reference = lookup_row(table, age.total_months, self.config.lookup_policy)?;
        let z_score = compute_score(observation.height_cm, &reference)?;
        let category = self.config.thresholds.classify(z_score);
        debug!(
            "{} at {} months (row {}): z={:.3} -> {}",
            observation.sex,
            age.total_months,
            reference.age_months,
            z_score,
            category.key()
        );
        Ok(AssessmentResult {
            sex: observation.sex,
            age,
            reference,
            z_score,
            category,
            advisory: advise(category),
        })
    }
}
