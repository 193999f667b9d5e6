//! Threshold tables mapping a z-score onto a [`Category`].
//!
//! A table is a lowest category followed by strictly ascending cut points.
//! Each cut point says which side a z-score lying exactly on it falls to,
//! so every real z maps to exactly one band and bands never overlap.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::category::Category;
use crate::error::{HfaError, Result};

/// Where a z-score equal to a cut point belongs.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// The cut value starts the band above it: `z >= at`.
    Inclusive,
    /// The cut value stays in the band below it: `z > at`.
    Exclusive,
}

/// A single cut point and the category that starts there.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Cut {
    pub at: f64,
    pub boundary: Boundary,
    pub category: Category,
}

impl Cut {
    fn admits(&self, z: f64) -> bool {
        match self.boundary {
            Boundary::Inclusive => z >= self.at,
            Boundary::Exclusive => z > self.at,
        }
    }
}

#[derive(Deserialize)]
struct RawThresholdTable {
    lowest: Category,
    cuts: Vec<Cut>,
}

/// Validated banding of the z axis.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawThresholdTable")]
pub struct ThresholdTable {
    lowest: Category,
    cuts: Vec<Cut>,
}

impl TryFrom<RawThresholdTable> for ThresholdTable {
    type Error = HfaError;

    fn try_from(raw: RawThresholdTable) -> Result<Self> {
        ThresholdTable::new(raw.lowest, raw.cuts)
    }
}

impl ThresholdTable {
    /// Build a table. Cut points must be finite and strictly ascending, and
    /// no category may label more than one band.
    pub fn new(lowest: Category, cuts: Vec<Cut>) -> Result<Self> {
        let mut seen = HashSet::from([lowest]);
        let mut previous: Option<f64> = None;
        for cut in &cuts {
            if !cut.at.is_finite() {
                return Err(HfaError::InvalidThresholds(format!("cut point {} is not finite", cut.at)));
            }
            if let Some(prev) = previous {
                if cut.at <= prev {
                    return Err(HfaError::InvalidThresholds(format!(
                        "cut points must ascend: {} follows {}",
                        cut.at, prev
                    )));
                }
            }
            if !seen.insert(cut.category) {
                return Err(HfaError::InvalidThresholds(format!(
                    "category '{}' labels more than one band",
                    cut.category.key()
                )));
            }
            previous = Some(cut.at);
        }
        Ok(ThresholdTable { lowest, cuts })
    }

    /// `z < -2` stunting risk, `[-2, -1)` needs attention, `[-1, 2]` normal,
    /// `z > 2` overgrowth risk.
    pub fn four_band() -> Self {
        ThresholdTable {
            lowest: Category::StuntingRisk,
            cuts: vec![
                Cut { at: -2.0, boundary: Boundary::Inclusive, category: Category::NeedsAttention },
                Cut { at: -1.0, boundary: Boundary::Inclusive, category: Category::Normal },
                Cut { at: 2.0, boundary: Boundary::Exclusive, category: Category::OvergrowthRisk },
            ],
        }
    }

    /// `z < -3` severe, `[-3, -2)` moderate, `z >= -2` normal.
    pub fn severity() -> Self {
        ThresholdTable {
            lowest: Category::Severe,
            cuts: vec![
                Cut { at: -3.0, boundary: Boundary::Inclusive, category: Category::Moderate },
                Cut { at: -2.0, boundary: Boundary::Inclusive, category: Category::Normal },
            ],
        }
    }

    /// [`ThresholdTable::severity`] with `z > 2` split off as tall.
    pub fn severity_with_tall() -> Self {
        let mut table = ThresholdTable::severity();
        table.cuts.push(Cut {
            at: 2.0,
            boundary: Boundary::Exclusive,
            category: Category::Tall,
        });
        table
    }

    /// Map a z-score onto its band.
    pub fn classify(&self, z: f64) -> Category {
        self.cuts
            .iter()
            .take_while(|cut| cut.admits(z))
            .last()
            .map(|cut| cut.category)
            .unwrap_or(self.lowest)
    }

    /// Every category this table can produce, lowest band first.
    pub fn categories(&self) -> Vec<Category> {
        std::iter::once(self.lowest)
            .chain(self.cuts.iter().map(|c| c.category))
            .collect()
    }

    /// The bands in ascending order with their bounds.
    pub fn bands(&self) -> Vec<Band> {
        let mut bands = Vec::with_capacity(self.cuts.len() + 1);
        let mut lower: Option<Cut> = None;
        let mut category = self.lowest;
        for cut in &self.cuts {
            bands.push(Band { category, lower, upper: Some(*cut) });
            lower = Some(*cut);
            category = cut.category;
        }
        bands.push(Band { category, lower, upper: None });
        bands
    }
}

/// Free function form of [`ThresholdTable::classify`].
pub fn classify(z: f64, table: &ThresholdTable) -> Category {
    table.classify(z)
}

/// One band of a threshold table, for display.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Band {
    pub category: Category,
    pub lower: Option<Cut>,
    pub upper: Option<Cut>,
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower {
            None => write!(f, "(-inf, ")?,
            Some(cut) if cut.boundary == Boundary::Inclusive => write!(f, "[{}, ", cut.at)?,
            Some(cut) => write!(f, "({}, ", cut.at)?,
        }
        match self.upper {
            None => write!(f, "+inf)"),
            Some(cut) if cut.boundary == Boundary::Inclusive => write!(f, "{})", cut.at),
            Some(cut) => write!(f, "{}]", cut.at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tables() -> Vec<ThresholdTable> {
        vec![
            ThresholdTable::four_band(),
            ThresholdTable::severity(),
            ThresholdTable::severity_with_tall(),
        ]
    }

    #[test]
    fn test_four_band_boundaries() {
        let t = ThresholdTable::four_band();
        assert_eq!(t.classify(-2.5), Category::StuntingRisk);
        assert_eq!(t.classify(-2.000_001), Category::StuntingRisk);
        assert_eq!(t.classify(-2.0), Category::NeedsAttention);
        assert_eq!(t.classify(-1.984), Category::NeedsAttention);
        assert_eq!(t.classify(-1.000_001), Category::NeedsAttention);
        assert_eq!(t.classify(-1.0), Category::Normal);
        assert_eq!(t.classify(-0.926), Category::Normal);
        assert_eq!(t.classify(2.0), Category::Normal);
        assert_eq!(t.classify(2.000_001), Category::OvergrowthRisk);
    }

    #[test]
    fn test_severity_boundaries() {
        let t = ThresholdTable::severity();
        assert_eq!(t.classify(-3.5), Category::Severe);
        assert_eq!(t.classify(-3.0), Category::Moderate);
        assert_eq!(t.classify(-2.1), Category::Moderate);
        assert_eq!(t.classify(-2.0), Category::Normal);
        assert_eq!(t.classify(5.0), Category::Normal);

        let tall = ThresholdTable::severity_with_tall();
        assert_eq!(tall.classify(2.0), Category::Normal);
        assert_eq!(tall.classify(2.5), Category::Tall);
    }

    #[test]
    fn test_classify_is_total_and_monotonic() {
        for table in all_tables() {
            let categories = table.categories();
            let mut previous = table.classify(f64::MIN);
            let mut z = -6.0;
            while z <= 6.0 {
                let category = table.classify(z);
                assert!(categories.contains(&category));
                assert!(category.rank() >= previous.rank(), "{:?} after {:?} at z={}", category, previous, z);
                let here = categories.iter().position(|c| *c == category).unwrap();
                let before = categories.iter().position(|c| *c == previous).unwrap();
                assert!(here >= before);
                previous = category;
                z += 0.001;
            }
            assert_eq!(table.classify(f64::MAX), *categories.last().unwrap());
        }
    }

    #[test]
    fn test_bands_cover_axis() {
        let bands = ThresholdTable::four_band().bands();
        assert_eq!(bands.len(), 4);
        assert_eq!(bands[0].to_string(), "(-inf, -2)");
        assert_eq!(bands[1].to_string(), "[-2, -1)");
        assert_eq!(bands[2].to_string(), "[-1, 2]");
        assert_eq!(bands[3].to_string(), "(2, +inf)");
        for pair in bands.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }

    #[test]
    fn test_rejects_unordered_cuts() {
        let cuts = vec![
            Cut { at: 1.0, boundary: Boundary::Inclusive, category: Category::Normal },
            Cut { at: 1.0, boundary: Boundary::Exclusive, category: Category::Tall },
        ];
        let err = ThresholdTable::new(Category::Moderate, cuts).unwrap_err();
        assert!(matches!(err, HfaError::InvalidThresholds(_)));
    }

    #[test]
    fn test_rejects_repeated_category() {
        let cuts = vec![Cut { at: 0.0, boundary: Boundary::Inclusive, category: Category::Normal }];
        assert!(ThresholdTable::new(Category::Normal, cuts).is_err());
    }

    #[test]
    fn test_rejects_non_finite_cut() {
        let cuts = vec![Cut { at: f64::NAN, boundary: Boundary::Inclusive, category: Category::Normal }];
        assert!(ThresholdTable::new(Category::Severe, cuts).is_err());
    }

    #[test]
    fn test_builtin_tables_validate() {
        for table in all_tables() {
            let rebuilt = ThresholdTable::new(table.lowest, table.cuts.clone()).unwrap();
            assert_eq!(rebuilt, table);
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok = r#"{"lowest":"severe","cuts":[{"at":-3.0,"boundary":"inclusive","category":"moderate"}]}"#;
        let table: ThresholdTable = serde_json::from_str(ok).unwrap();
        assert_eq!(table.classify(-3.0), Category::Moderate);

        let bad = r#"{"lowest":"severe","cuts":[{"at":1.0,"boundary":"inclusive","category":"severe"}]}"#;
        assert!(serde_json::from_str::<ThresholdTable>(bad).is_err());
    }

    #[test]
    fn test_every_band_has_advice() {
        for table in all_tables() {
            for category in table.categories() {
                assert!(!crate::category::advise(category).is_empty());
            }
        }
    }
}
