//! Assessment log, reports and summaries for height-for-age screening.
//!
//! The log itself is an append-only CSV file owned by the caller
//! ([`store::AssessmentLog`]). For grouped summaries the log is loaded into
//! an in-memory SQLite database ([`Database`]) and scanned with SQL.
//!
//! # Usage
//!
//! ```rust
//! use hfa_db::store::AssessmentLog;
//! use hfa_db::Database;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("log.csv");
//! std::fs::write(&path, "name,birth_date,sex,class,height_cm,weight_kg,age,z_score,category,advisory,observation_date\n\
//!     Ana,2016-06-01,female,3A,110.0,19.5,8y,-0.93,normal,Keep it up.,2024-06-01\n").unwrap();
//!
//! let db = Database::new().unwrap();
//! db.load_records(&AssessmentLog::new(&path).read_all().unwrap()).unwrap();
//! let summary = db.query_summary().unwrap();
//! assert_eq!(summary[0].count, 1);
//! ```

pub mod store;
mod loader;
pub mod models;
mod queries;
pub mod report;
pub mod schema;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding a snapshot of the assessment log.
///
/// Cheaply cloneable (via `Rc`); clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
