//! Loading assessment records, as read from an
//! [`AssessmentLog`](crate::store::AssessmentLog), into the in-memory
//! SQLite database.

use crate::models::AssessmentRecord;
use crate::Database;
use hfa_utils::dates::format_date;
use rusqlite::params;

impl Database {
    /// Insert records in the given order.
    pub fn load_records(&self, records: &[AssessmentRecord]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO assessments
                 (name, birth_date, sex, class, height_cm, weight_kg, age, z_score, category, advisory, observation_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for r in records {
                stmt.execute(params![
                    r.name,
                    format_date(&r.birth_date),
                    r.sex.as_str(),
                    r.class,
                    r.height_cm,
                    r.weight_kg,
                    r.age,
                    r.z_score,
                    r.category.key(),
                    r.advisory,
                    format_date(&r.observation_date),
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} assessments", records.len());
        Ok(())
    }

}
