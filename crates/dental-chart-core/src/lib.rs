//! Dental Chart Core Library
//!
//! Headless state for two clinical widgets of a dental records app: the oral
//! health assessment editor and the treatment plan tracker with its creation
//! modal. Native shells render the view models and forward user input.
//!
//! # Architecture
//!
//! ```text
//!   Host records (Database)
//!         │ plans, assessment
//!         ▼
//!   ┌─────────────────────────────┐      ┌──────────────────────────┐
//!   │ AssessmentEditor            │      │ TreatmentPlanTracker     │
//!   │   DraftSession<Assessment>  │      │   active_plan / timeline │
//!   │   ListEditor on each list   │      │   CreationModal (draft)  │
//!   └──────────────┬──────────────┘      └────────────┬─────────────┘
//!                  │ save                 stage click │ submit
//!                  ▼                                  ▼
//!            AssessmentSink                       PlanSink
//!                  └──────────────┬───────────────────┘
//!                                 ▼
//!                     Host applies commit, re-syncs widgets
//! ```
//!
//! # Core Principle
//!
//! **Widgets never write authoritative records.** Drafts stay local until an
//! explicit save or submit hands them to a sink.
//!
//! # Modules
//!
//! - [`models`]: Domain types (OralHealthAssessment, TreatmentPlan, Stage, etc.)
//! - [`session`]: Generic draft session and list editing
//! - [`widgets`]: Assessment editor, plan tracker, creation modal, sinks
//! - [`display`]: Tones and locale-aware cost/date strings
//! - [`config`]: Display configuration and logging
//! - [`db`]: SQLite record store
//! - [`chart`]: Widgets wired to the store for one patient

pub mod chart;
pub mod config;
pub mod db;
pub mod display;
pub mod models;
pub mod session;
pub mod widgets;

// Re-export commonly used types
pub use chart::Chart;
pub use config::DisplayConfig;
pub use db::Database;
pub use models::{HealthLevel, ListField, OralHealthAssessment, Stage, TreatmentPlan};
pub use session::{DraftSession, EditMode, ListEditor};
pub use widgets::{
    active_plan, AssessmentEditor, AssessmentSink, Commit, CommitLog, CreationModal, PlanSink,
    TreatmentPlanTracker,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Mutex;
use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DentalChartError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for DentalChartError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => DentalChartError::NotFound(what),
            other => DentalChartError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for DentalChartError {
    fn from(e: serde_json::Error) -> Self {
        DentalChartError::SerializationError(e.to_string())
    }
}

impl From<models::ModelError> for DentalChartError {
    fn from(e: models::ModelError) -> Self {
        DentalChartError::InvalidInput(e.to_string())
    }
}

impl From<session::ListEditError> for DentalChartError {
    fn from(e: session::ListEditError) -> Self {
        DentalChartError::InvalidInput(e.to_string())
    }
}

impl From<config::ConfigError> for DentalChartError {
    fn from(e: config::ConfigError) -> Self {
        DentalChartError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DentalChartError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DentalChartError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a chart database at the given path for one patient.
#[uniffi::export]
pub fn open_chart(path: String, patient_id: String) -> Result<Arc<DentalChart>, DentalChartError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(DentalChart {
        chart: Mutex::new(Chart::open(db, patient_id)?),
    }))
}

/// Create an in-memory chart (for testing and previews).
#[uniffi::export]
pub fn open_chart_in_memory(patient_id: String) -> Result<Arc<DentalChart>, DentalChartError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(DentalChart {
        chart: Mutex::new(Chart::open(db, patient_id)?),
    }))
}

/// Install the tracing subscriber. `None` uses the default filter.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) {
    config::init_logging(filter.as_deref().unwrap_or(config::DEFAULT_LOG_FILTER));
}

/// Install the tracing subscriber with the `log_filter` of a display config
/// file, returning the filter that was requested.
#[uniffi::export]
pub fn init_logging_from_config(path: String) -> Result<String, DentalChartError> {
    let config = config::load_config(&path)?;
    config::init_logging_from(&config);
    Ok(config.log_filter)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe chart wrapper for FFI.
#[derive(uniffi::Object)]
pub struct DentalChart {
    chart: Mutex<Chart>,
}

#[uniffi::export]
impl DentalChart {
    // =========================================================================
    // Configuration
    // =========================================================================

    /// Switch to a locale preset (e.g. "en-GB").
    pub fn set_locale(&self, locale: String) -> Result<(), DentalChartError> {
        let mut chart = self.chart.lock()?;
        chart.set_config(DisplayConfig::for_locale(&locale));
        Ok(())
    }

    /// Load display settings from a JSON file.
    pub fn load_display_config(&self, path: String) -> Result<(), DentalChartError> {
        let config = config::load_config(&path)?;
        let mut chart = self.chart.lock()?;
        chart.set_config(config);
        Ok(())
    }

    // =========================================================================
    // Assessment Editor
    // =========================================================================

    /// Get the committed assessment.
    pub fn assessment(&self) -> Result<FfiAssessment, DentalChartError> {
        let chart = self.chart.lock()?;
        Ok(chart.assessment().clone().into())
    }

    /// Render model of the assessment editor as JSON.
    pub fn assessment_view_json(&self) -> Result<String, DentalChartError> {
        let chart = self.chart.lock()?;
        Ok(serde_json::to_string(&chart.editor().view())?)
    }

    /// Toggle edit mode. Returns true when the editor is now editing.
    pub fn toggle_assessment_edit(&self) -> Result<bool, DentalChartError> {
        let mut chart = self.chart.lock()?;
        Ok(chart.editor_mut().toggle_edit() == EditMode::Edit)
    }

    pub fn set_gum_health(&self, level: String) -> Result<bool, DentalChartError> {
        let level: HealthLevel = level.parse()?;
        let mut chart = self.chart.lock()?;
        Ok(chart.editor_mut().set_gum_health(level))
    }

    pub fn set_oral_hygiene(&self, level: String) -> Result<bool, DentalChartError> {
        let level: HealthLevel = level.parse()?;
        let mut chart = self.chart.lock()?;
        Ok(chart.editor_mut().set_oral_hygiene(level))
    }

    /// Append an empty entry to "issues", "riskFactors" or "recommendations".
    pub fn add_list_entry(&self, field: String) -> Result<bool, DentalChartError> {
        let field: ListField = field.parse()?;
        let mut chart = self.chart.lock()?;
        Ok(chart.editor_mut().add_entry(field))
    }

    pub fn update_list_entry(
        &self,
        field: String,
        index: u32,
        value: String,
    ) -> Result<bool, DentalChartError> {
        let field: ListField = field.parse()?;
        let mut chart = self.chart.lock()?;
        Ok(chart.editor_mut().update_entry(field, index as usize, value)?)
    }

    pub fn remove_list_entry(&self, field: String, index: u32) -> Result<bool, DentalChartError> {
        let field: ListField = field.parse()?;
        let mut chart = self.chart.lock()?;
        Ok(chart.editor_mut().remove_entry(field, index as usize)?.is_some())
    }

    /// Save the draft. Returns false when the editor was not editing.
    pub fn save_assessment(&self) -> Result<bool, DentalChartError> {
        let mut chart = self.chart.lock()?;
        Ok(chart.save_assessment()?)
    }

    pub fn cancel_assessment_edit(&self) -> Result<(), DentalChartError> {
        let mut chart = self.chart.lock()?;
        chart.editor_mut().cancel();
        Ok(())
    }

    // =========================================================================
    // Treatment Plan Tracker
    // =========================================================================

    /// All plans for the patient, in insertion order.
    pub fn list_plans(&self) -> Result<Vec<FfiTreatmentPlan>, DentalChartError> {
        let chart = self.chart.lock()?;
        Ok(chart.plans().iter().cloned().map(Into::into).collect())
    }

    pub fn active_plan(&self) -> Result<Option<FfiTreatmentPlan>, DentalChartError> {
        let chart = self.chart.lock()?;
        Ok(chart.active_plan().cloned().map(Into::into))
    }

    /// Render model of the tracker as JSON.
    pub fn tracker_view_json(&self) -> Result<String, DentalChartError> {
        let chart = self.chart.lock()?;
        Ok(serde_json::to_string(&chart.tracker_view())?)
    }

    /// Timeline click: commit a new stage for the plan immediately.
    pub fn set_plan_stage(&self, plan_id: String, stage: String) -> Result<bool, DentalChartError> {
        let stage: Stage = stage.parse()?;
        let mut chart = self.chart.lock()?;
        Ok(chart.change_stage(&plan_id, stage)?)
    }

    // =========================================================================
    // Creation Modal
    // =========================================================================

    pub fn open_new_plan(&self) -> Result<(), DentalChartError> {
        let mut chart = self.chart.lock()?;
        chart.modal_mut().open();
        Ok(())
    }

    pub fn cancel_new_plan(&self) -> Result<(), DentalChartError> {
        let mut chart = self.chart.lock()?;
        chart.modal_mut().cancel();
        Ok(())
    }

    pub fn set_new_plan_title(&self, title: String) -> Result<(), DentalChartError> {
        let mut chart = self.chart.lock()?;
        chart.modal_mut().set_title(title);
        Ok(())
    }

    pub fn set_new_plan_start_date(&self, date: String) -> Result<(), DentalChartError> {
        let mut chart = self.chart.lock()?;
        chart.modal_mut().set_start_date(date);
        Ok(())
    }

    pub fn set_new_plan_completion(&self, date: String) -> Result<(), DentalChartError> {
        let mut chart = self.chart.lock()?;
        chart.modal_mut().set_estimated_completion(date);
        Ok(())
    }

    /// Raw cost input; invalid numbers become 0.
    pub fn set_new_plan_cost(&self, input: String) -> Result<(), DentalChartError> {
        let mut chart = self.chart.lock()?;
        chart.modal_mut().set_cost_input(&input);
        Ok(())
    }

    /// Multi-line procedure text, one procedure per line.
    pub fn set_new_plan_procedures(&self, text: String) -> Result<(), DentalChartError> {
        let mut chart = self.chart.lock()?;
        chart.modal_mut().set_procedures_text(&text);
        Ok(())
    }

    pub fn can_submit_new_plan(&self) -> Result<bool, DentalChartError> {
        let chart = self.chart.lock()?;
        Ok(chart.modal().can_submit())
    }

    /// Render model of the creation modal as JSON.
    pub fn modal_view_json(&self) -> Result<String, DentalChartError> {
        let chart = self.chart.lock()?;
        Ok(serde_json::to_string(&chart.modal().view())?)
    }

    /// Create the plan. Returns `None` when title or start date is missing.
    pub fn submit_new_plan(&self) -> Result<Option<FfiTreatmentPlan>, DentalChartError> {
        let mut chart = self.chart.lock()?;
        Ok(chart.submit_new_plan()?.map(Into::into))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe treatment plan.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTreatmentPlan {
    pub id: String,
    pub title: String,
    pub stage: String,
    pub progress: u8,
    pub procedures: Vec<String>,
    pub estimated_cost: f64,
    pub start_date: String,
    pub estimated_completion: String,
}

impl From<TreatmentPlan> for FfiTreatmentPlan {
    fn from(plan: TreatmentPlan) -> Self {
        Self {
            progress: plan.progress(),
            stage: plan.stage.as_str().to_string(),
            id: plan.id,
            title: plan.title,
            procedures: plan.procedures,
            estimated_cost: plan.estimated_cost,
            start_date: plan.start_date,
            estimated_completion: plan.estimated_completion,
        }
    }
}

/// FFI-safe oral health assessment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssessment {
    pub gum_health: String,
    pub oral_hygiene: String,
    pub issues: Vec<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

impl From<OralHealthAssessment> for FfiAssessment {
    fn from(assessment: OralHealthAssessment) -> Self {
        Self {
            gum_health: assessment.gum_health.as_str().to_string(),
            oral_hygiene: assessment.oral_hygiene.as_str().to_string(),
            issues: assessment.issues,
            risk_factors: assessment.risk_factors,
            recommendations: assessment.recommendations,
        }
    }
}
