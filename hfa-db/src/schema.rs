//! SQL schema for the in-memory summary database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// - `assessments` - one row per logged assessment, in append order
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS assessments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        birth_date TEXT NOT NULL,
        sex TEXT NOT NULL,
        class TEXT NOT NULL,
        height_cm REAL NOT NULL,
        weight_kg REAL NOT NULL,
        age TEXT NOT NULL,
        z_score REAL NOT NULL,
        category TEXT NOT NULL,
        advisory TEXT NOT NULL,
        observation_date TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_assessments_group ON assessments(class, sex, category);
    "#
}
