//! Treatment plan database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::TreatmentPlan;

impl Database {
    /// Insert a new plan at the end of the patient's list.
    ///
    /// The incoming id is a placeholder: it is kept when it is non-empty and
    /// unused, otherwise a UUID is assigned. Returns the plan as stored.
    pub fn insert_plan(&self, patient_id: &str, plan: &TreatmentPlan) -> DbResult<TreatmentPlan> {
        let mut stored = plan.clone();
        if stored.id.is_empty() || self.plan_exists(&stored.id)? {
            let assigned = uuid::Uuid::new_v4().to_string();
            tracing::warn!(placeholder = %stored.id, assigned = %assigned, "plan id replaced");
            stored.id = assigned;
        }

        let position: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM treatment_plans WHERE patient_id = ?",
            [patient_id],
            |row| row.get(0),
        )?;

        self.conn.execute(
            r#"
            INSERT INTO treatment_plans (
                id, patient_id, position, title, stage, procedures,
                estimated_cost, start_date, estimated_completion
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                stored.id,
                patient_id,
                position,
                stored.title,
                stored.stage.as_str(),
                serde_json::to_string(&stored.procedures)?,
                stored.estimated_cost,
                stored.start_date,
                stored.estimated_completion,
            ],
        )?;
        Ok(stored)
    }

    /// Update an existing plan. Position and owner are unchanged.
    pub fn update_plan(&self, plan: &TreatmentPlan) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE treatment_plans SET
                title = ?2,
                stage = ?3,
                procedures = ?4,
                estimated_cost = ?5,
                start_date = ?6,
                estimated_completion = ?7,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                plan.id,
                plan.title,
                plan.stage.as_str(),
                serde_json::to_string(&plan.procedures)?,
                plan.estimated_cost,
                plan.start_date,
                plan.estimated_completion,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a plan by id.
    pub fn get_plan(&self, id: &str) -> DbResult<Option<TreatmentPlan>> {
        self.conn
            .query_row(
                r#"
                SELECT id, title, stage, procedures, estimated_cost,
                       start_date, estimated_completion
                FROM treatment_plans
                WHERE id = ?
                "#,
                [id],
                plan_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List a patient's plans in insertion order.
    pub fn list_plans(&self, patient_id: &str) -> DbResult<Vec<TreatmentPlan>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, title, stage, procedures, estimated_cost,
                   start_date, estimated_completion
            FROM treatment_plans
            WHERE patient_id = ?
            ORDER BY position ASC
            "#,
        )?;

        let rows = stmt.query_map([patient_id], plan_row)?;

        let mut plans = Vec::new();
        for row in rows {
            plans.push(row?.try_into()?);
        }
        Ok(plans)
    }

    /// Delete a plan.
    pub fn delete_plan(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM treatment_plans WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    fn plan_exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM treatment_plans WHERE id = ?", [id], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }
}

fn plan_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PlanRow> {
    Ok(PlanRow {
        id: row.get(0)?,
        title: row.get(1)?,
        stage: row.get(2)?,
        procedures: row.get(3)?,
        estimated_cost: row.get(4)?,
        start_date: row.get(5)?,
        estimated_completion: row.get(6)?,
    })
}

/// Intermediate row struct for database mapping.
struct PlanRow {
    id: String,
    title: String,
    stage: String,
    procedures: String,
    estimated_cost: f64,
    start_date: String,
    estimated_completion: String,
}

impl TryFrom<PlanRow> for TreatmentPlan {
    type Error = DbError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        Ok(TreatmentPlan {
            id: row.id,
            title: row.title,
            stage: row.stage.parse()?,
            procedures: serde_json::from_str(&row.procedures)?,
            estimated_cost: row.estimated_cost,
            start_date: row.start_date,
            estimated_completion: row.estimated_completion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stage;

    fn make_plan(id: &str, title: &str) -> TreatmentPlan {
        let mut plan = TreatmentPlan::new(id.into(), title.into(), "2024-01-01".into());
        plan.procedures = vec!["Exam".into(), "X-rays".into()];
        plan.estimated_cost = 250.0;
        plan
    }

    #[test]
    fn test_insert_and_get_plan() {
        let db = Database::open_in_memory().unwrap();
        let plan = make_plan("1700000000000", "Root Canal");

        let stored = db.insert_plan("patient-1", &plan).unwrap();
        assert_eq!(stored, plan);

        let retrieved = db.get_plan("1700000000000").unwrap().unwrap();
        assert_eq!(retrieved, plan);
    }

    #[test]
    fn test_list_plans_keeps_insertion_order() {
        let db = Database::open_in_memory().unwrap();
        db.insert_plan("patient-1", &make_plan("b", "Second")).unwrap();
        db.insert_plan("patient-1", &make_plan("a", "Third")).unwrap();
        db.insert_plan("patient-2", &make_plan("c", "Other patient")).unwrap();

        let titles: Vec<String> = db
            .list_plans("patient-1")
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Second".to_string(), "Third".to_string()]);
    }

    #[test]
    fn test_duplicate_id_is_replaced() {
        let db = Database::open_in_memory().unwrap();
        db.insert_plan("patient-1", &make_plan("42", "First")).unwrap();

        let stored = db.insert_plan("patient-1", &make_plan("42", "Second")).unwrap();
        assert_ne!(stored.id, "42");
        assert_eq!(stored.id.len(), 36);
        assert_eq!(db.list_plans("patient-1").unwrap().len(), 2);
    }

    #[test]
    fn test_empty_id_is_assigned() {
        let db = Database::open_in_memory().unwrap();
        let stored = db.insert_plan("patient-1", &make_plan("", "Sealants")).unwrap();
        assert!(!stored.id.is_empty());
    }

    #[test]
    fn test_update_and_delete_plan() {
        let db = Database::open_in_memory().unwrap();
        let plan = db.insert_plan("patient-1", &make_plan("p", "Crown")).unwrap();

        assert!(db.update_plan(&plan.with_stage(Stage::Completed)).unwrap());
        assert_eq!(db.get_plan("p").unwrap().unwrap().stage, Stage::Completed);

        assert!(db.delete_plan("p").unwrap());
        assert!(!db.delete_plan("p").unwrap());
        assert!(db.get_plan("p").unwrap().is_none());
    }
}
