//! Height-for-age growth assessment.
//!
//! Computes a child's age from explicit dates, finds the matching LMS
//! reference row for the child's sex, converts height into a z-score and
//! classifies it through a configurable threshold table. Nothing here
//! performs I/O except the CSV loaders on [`reference::ReferenceTable`].

pub mod age;
pub mod assessment;
pub mod category;
pub mod config;
pub mod error;
pub mod observation;
pub mod reference;
pub mod score;
pub mod thresholds;

pub use age::{compute_age, AgeBreakdown};
pub use assessment::{AssessmentResult, Assessor};
pub use category::{advise, Category};
pub use config::{AgeWindow, AssessmentConfig, LookupPolicy, MonthPolicy, Preset};
pub use error::{HfaError, Result};
pub use observation::{Observation, Sex};
pub use reference::{lookup_row, ReferenceRow, ReferenceSet, ReferenceTable};
pub use score::compute_score;
pub use thresholds::{classify, Boundary, Cut, ThresholdTable};
