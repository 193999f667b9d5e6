//! Typed queries over the loaded assessments.
//!
//! All queries scan the `assessments` table; there is no other access path.

use crate::models::{AssessmentRecord, CategoryTotal, SummaryRow};
use crate::Database;
use anyhow::{anyhow, Context};
use hfa_lms::{Category, Sex};

impl Database {
    /// Counts grouped by class, sex and category.
    ///
    /// Ordered by class, then sex, then category key.
    pub fn query_summary(&self) -> anyhow::Result<Vec<SummaryRow>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT class, sex, category, COUNT(*) AS n
             FROM assessments
             GROUP BY class, sex, category
             ORDER BY class, sex, category",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SummaryRow {
                    class: row.get(0)?,
                    sex: row.get(1)?,
                    category: row.get(2)?,
                    count: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_summary returned {} groups", rows.len());
        Ok(rows)
    }

    /// Counts per category across the whole log, largest first.
    pub fn query_category_totals(&self) -> anyhow::Result<Vec<CategoryTotal>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT category, COUNT(*) AS n
             FROM assessments
             GROUP BY category
             ORDER BY n DESC, category",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Every record in insertion order.
    pub fn query_records(&self) -> anyhow::Result<Vec<AssessmentRecord>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT name, birth_date, sex, class, height_cm, weight_kg, age, z_score, category, advisory, observation_date
             FROM assessments
             ORDER BY id",
        )?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, f64>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, f64>(7)?,
                    row.get::<_, String>(8)?,
                    row.get::<_, String>(9)?,
                    row.get::<_, String>(10)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        raw.into_iter()
            .map(
                |(name, birth, sex, class, height_cm, weight_kg, age, z_score, category, advisory, observed)|
                 -> anyhow::Result<AssessmentRecord> {
                    Ok(AssessmentRecord {
                        name,
                        birth_date: hfa_utils::dates::parse_date(&birth)?,
                        sex: sex.parse::<Sex>().context("stored sex")?,
                        class,
                        height_cm,
                        weight_kg,
                        age,
                        z_score,
                        category: Category::from_key(&category)
                            .ok_or_else(|| anyhow!("stored category '{}' is unknown", category))?,
                        advisory,
                        observation_date: hfa_utils::dates::parse_date(&observed)?,
                    })
                },
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{CategoryTotal, SummaryRow};
    use crate::test_support::record;
    use crate::Database;
    use hfa_lms::{Category, Sex};

    fn loaded() -> Database {
        let db = Database::new().unwrap();
        let mut girl = record("Citra", "3A", Category::Normal);
        girl.sex = Sex::Female;
        db.load_records(&[
            record("Ana", "3A", Category::Normal),
            record("Budi", "3A", Category::StuntingRisk),
            record("Dodi", "3A", Category::Normal),
            girl,
            record("Eka", "2B", Category::NeedsAttention),
        ])
        .unwrap();
        db
    }

    #[test]
    fn summary_groups_by_class_sex_category() {
        let summary = loaded().query_summary().unwrap();
        let row = |class: &str, sex: &str, category: &str, count: i64| SummaryRow {
            class: class.to_string(),
            sex: sex.to_string(),
            category: category.to_string(),
            count,
        };
        assert_eq!(
            summary,
            vec![
                row("2B", "male", "needs-attention", 1),
                row("3A", "female", "normal", 1),
                row("3A", "male", "normal", 2),
                row("3A", "male", "stunting-risk", 1),
            ]
        );
    }

    #[test]
    fn category_totals_largest_first() {
        let totals = loaded().query_category_totals().unwrap();
        assert_eq!(
            totals[0],
            CategoryTotal {
                category: "normal".to_string(),
                count: 3
            }
        );
        assert_eq!(totals.iter().map(|t| t.count).sum::<i64>(), 5);
    }

    #[test]
    fn records_round_trip_through_database() {
        let db = Database::new().unwrap();
        let records = vec![
            record("Ana", "3A", Category::Normal),
            record("Budi", "3B", Category::OvergrowthRisk),
        ];
        db.load_records(&records).unwrap();
        assert_eq!(db.query_records().unwrap(), records);
    }

    #[test]
    fn empty_database_has_empty_summary() {
        let db = Database::new().unwrap();
        assert!(db.query_summary().unwrap().is_empty());
        assert!(db.query_category_totals().unwrap().is_empty());
    }
}
