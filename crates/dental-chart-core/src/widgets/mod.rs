//! Widget state machines and the sinks they commit through.
//!
//! Widgets never own authoritative records. Every change that should outlive
//! the widget is handed to a sink, and the host feeds the accepted record back
//! on its next render.

mod assessment;
mod modal;
mod tracker;

pub use assessment::*;
pub use modal::*;
pub use tracker::*;

use serde::{Deserialize, Serialize};

use crate::models::{OralHealthAssessment, TreatmentPlan};

/// Receives saved assessments.
pub trait AssessmentSink {
    fn on_assessment_update(&mut self, assessment: OralHealthAssessment);
}

/// Receives plan stage changes and newly created plans.
pub trait PlanSink {
    fn on_plan_update(&mut self, plan: TreatmentPlan);
    fn on_plan_add(&mut self, plan: TreatmentPlan);
}

/// A single outbound write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Commit {
    AssessmentUpdated(OralHealthAssessment),
    PlanUpdated(TreatmentPlan),
    PlanAdded(TreatmentPlan),
}

/// Sink that records commits in order for the host to apply later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitLog {
    commits: Vec<Commit>,
}

impl CommitLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Take every recorded commit, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Commit> {
        std::mem::take(&mut self.commits)
    }
}

impl AssessmentSink for CommitLog {
    fn on_assessment_update(&mut self, assessment: OralHealthAssessment) {
        self.commits.push(Commit::AssessmentUpdated(assessment));
    }
}

impl PlanSink for CommitLog {
    fn on_plan_update(&mut self, plan: TreatmentPlan) {
        self.commits.push(Commit::PlanUpdated(plan));
    }

    fn on_plan_add(&mut self, plan: TreatmentPlan) {
        self.commits.push(Commit::PlanAdded(plan));
    }
}
