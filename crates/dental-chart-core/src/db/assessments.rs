//! Oral health assessment database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::OralHealthAssessment;

impl Database {
    /// Insert or replace the patient's current assessment.
    pub fn upsert_assessment(&self, patient_id: &str, assessment: &OralHealthAssessment) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO oral_health_assessments (
                patient_id, gum_health, oral_hygiene,
                issues, risk_factors, recommendations, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
            ON CONFLICT(patient_id) DO UPDATE SET
                gum_health = excluded.gum_health,
                oral_hygiene = excluded.oral_hygiene,
                issues = excluded.issues,
                risk_factors = excluded.risk_factors,
                recommendations = excluded.recommendations,
                updated_at = datetime('now')
            "#,
            params![
                patient_id,
                assessment.gum_health.as_str(),
                assessment.oral_hygiene.as_str(),
                serde_json::to_string(&assessment.issues)?,
                serde_json::to_string(&assessment.risk_factors)?,
                serde_json::to_string(&assessment.recommendations)?,
            ],
        )?;
        Ok(())
    }

    /// Get the patient's current assessment.
    pub fn get_assessment(&self, patient_id: &str) -> DbResult<Option<OralHealthAssessment>> {
        self.conn
            .query_row(
                r#"
                SELECT gum_health, oral_hygiene, issues, risk_factors, recommendations
                FROM oral_health_assessments
                WHERE patient_id = ?
                "#,
                [patient_id],
                |row| {
                    Ok(AssessmentRow {
                        gum_health: row.get(0)?,
                        oral_hygiene: row.get(1)?,
                        issues: row.get(2)?,
                        risk_factors: row.get(3)?,
                        recommendations: row.get(4)?,
                    })
                },
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }
}

/// Intermediate row struct for database mapping.
struct AssessmentRow {
    gum_health: String,
    oral_hygiene: String,
    issues: String,
    risk_factors: String,
    recommendations: String,
}

impl TryFrom<AssessmentRow> for OralHealthAssessment {
    type Error = DbError;

    fn try_from(row: AssessmentRow) -> Result<Self, Self::Error> {
        Ok(OralHealthAssessment {
            gum_health: row.gum_health.parse()?,
            oral_hygiene: row.oral_hygiene.parse()?,
            issues: serde_json::from_str(&row.issues)?,
            risk_factors: serde_json::from_str(&row.risk_factors)?,
            recommendations: serde_json::from_str(&row.recommendations)?,
        })
    }
}
