//! SQLite record store standing in for the host application.

mod schema;
mod assessments;
mod plans;

pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use crate::models::{ModelError, TreatmentPlan};
use crate::widgets::Commit;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::Constraint(e.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Apply one widget commit for a patient.
    ///
    /// Returns the stored plan for plan commits (with its final id for added
    /// plans) and `None` for assessment commits.
    pub fn apply_commit(&self, patient_id: &str, commit: &Commit) -> DbResult<Option<TreatmentPlan>> {
        match commit {
            Commit::AssessmentUpdated(assessment) => {
                self.upsert_assessment(patient_id, assessment)?;
                Ok(None)
            }
            Commit::PlanUpdated(plan) => {
                if !self.update_plan(plan)? {
                    return Err(DbError::NotFound(format!("treatment plan {}", plan.id)));
                }
                Ok(Some(plan.clone()))
            }
            Commit::PlanAdded(plan) => self.insert_plan(patient_id, plan).map(Some),
        }
    }
}
