//! A patient's chart: both widgets wired to the record store.
//!
//! `Chart` plays the host role. It owns the authoritative records (through
//! [`Database`]), hands them to the widgets, applies whatever the widgets
//! commit and re-syncs them with the stored result.

use crate::config::DisplayConfig;
use crate::db::{Database, DbResult};
use crate::models::{OralHealthAssessment, Stage, TreatmentPlan};
use crate::widgets::{
    active_plan, AssessmentEditor, Commit, CommitLog, CreationModal, TrackerView, TreatmentPlanTracker,
};

pub struct Chart {
    db: Database,
    patient_id: String,
    config: DisplayConfig,
    plans: Vec<TreatmentPlan>,
    editor: AssessmentEditor,
    tracker: TreatmentPlanTracker,
}

impl Chart {
    /// Load a patient's records. A patient without a stored assessment starts
    /// from the default one.
    pub fn open(db: Database, patient_id: impl Into<String>) -> DbResult<Self> {
        let patient_id = patient_id.into();
        let plans = db.list_plans(&patient_id)?;
        let assessment = db.get_assessment(&patient_id)?.unwrap_or_default();
        tracing::debug!(patient_id = %patient_id, plans = plans.len(), "chart opened");

        Ok(Self {
            db,
            patient_id,
            config: DisplayConfig::default(),
            plans,
            editor: AssessmentEditor::new(assessment),
            tracker: TreatmentPlanTracker::new(),
        })
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DisplayConfig) {
        self.config = config;
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn plans(&self) -> &[TreatmentPlan] {
        &self.plans
    }

    pub fn active_plan(&self) -> Option<&TreatmentPlan> {
        active_plan(&self.plans)
    }

    /// The committed assessment.
    pub fn assessment(&self) -> &OralHealthAssessment {
        self.editor.committed()
    }

    pub fn editor(&self) -> &AssessmentEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut AssessmentEditor {
        &mut self.editor
    }

    pub fn modal(&self) -> &CreationModal {
        self.tracker.modal()
    }

    pub fn modal_mut(&mut self) -> &mut CreationModal {
        self.tracker.modal_mut()
    }

    pub fn tracker_view(&self) -> TrackerView {
        self.tracker.view(&self.plans, &self.config)
    }

    /// Save the assessment draft and store it.
    ///
    /// If the store rejects it the editor goes back to edit mode with the
    /// unsaved draft.
    pub fn save_assessment(&mut self) -> DbResult<bool> {
        let mut log = CommitLog::new();
        let saved = self.editor.save(&mut log);
        let pending = log.commits().iter().find_map(|commit| match commit {
            Commit::AssessmentUpdated(assessment) => Some(assessment.clone()),
            _ => None,
        });

        if let Err(e) = self.apply(log) {
            if let Some(draft) = pending {
                self.editor.resume_edit(draft);
            }
            return Err(e);
        }
        Ok(saved)
    }

    /// Move a plan to another stage and store it.
    pub fn change_stage(&mut self, plan_id: &str, stage: Stage) -> DbResult<bool> {
        let mut log = CommitLog::new();
        let changed = self.tracker.change_stage(&self.plans, plan_id, stage, &mut log);
        self.apply(log)?;
        Ok(changed)
    }

    /// Submit the creation modal. Returns the plan as stored, with its final id.
    pub fn submit_new_plan(&mut self) -> DbResult<Option<TreatmentPlan>> {
        let mut log = CommitLog::new();
        self.tracker.modal_mut().submit(&mut log);
        Ok(self.apply(log)?.pop())
    }

    /// Re-read the patient's records and push them into the widgets.
    pub fn reload(&mut self) -> DbResult<()> {
        self.plans = self.db.list_plans(&self.patient_id)?;
        let assessment = self.db.get_assessment(&self.patient_id)?.unwrap_or_default();
        self.editor.sync(assessment);
        Ok(())
    }

    fn apply(&mut self, mut log: CommitLog) -> DbResult<Vec<TreatmentPlan>> {
        if log.is_empty() {
            return Ok(Vec::new());
        }

        let mut stored = Vec::new();
        for commit in log.drain() {
            match self.db.apply_commit(&self.patient_id, &commit) {
                Ok(Some(plan)) => stored.push(plan),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(error = %e, patient_id = %self.patient_id, "failed to store commit");
                    return Err(e);
                }
            }
        }
        self.reload()?;
        Ok(stored)
    }
}
