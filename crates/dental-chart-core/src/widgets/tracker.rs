//! Treatment plan tracker: active plan, stage timeline and stage commits.

use serde::Serialize;

use super::{CreationModal, PlanSink};
use crate::config::DisplayConfig;
use crate::display::{format_cost, format_date, Tone};
use crate::models::{Stage, TreatmentPlan};

/// Pick the plan shown by the tracker.
///
/// The first plan that is not completed wins. When every plan is completed the
/// first plan is shown anyway; an empty collection has no active plan.
pub fn active_plan(plans: &[TreatmentPlan]) -> Option<&TreatmentPlan> {
    plans
        .iter()
        .find(|plan| !plan.stage.is_completed())
        .or_else(|| plans.first())
}

/// Tracker widget. Plans are passed in on every call; the only state the
/// tracker owns is its creation modal.
#[derive(Debug, Clone, Default)]
pub struct TreatmentPlanTracker {
    modal: CreationModal,
}

impl TreatmentPlanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> &CreationModal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut CreationModal {
        &mut self.modal
    }

    /// Commit a stage change for one plan immediately.
    ///
    /// Returns `false` without calling the sink when no plan has `plan_id`.
    pub fn change_stage(
        &self,
        plans: &[TreatmentPlan],
        plan_id: &str,
        stage: Stage,
        sink: &mut impl PlanSink,
    ) -> bool {
        let Some(plan) = plans.iter().find(|plan| plan.id == plan_id) else {
            tracing::debug!(plan_id, "stage change for unknown plan ignored");
            return false;
        };

        tracing::info!(plan_id, from = %plan.stage, to = %stage, "plan stage changed");
        sink.on_plan_update(plan.with_stage(stage));
        true
    }

    pub fn view(&self, plans: &[TreatmentPlan], config: &DisplayConfig) -> TrackerView {
        match active_plan(plans) {
            Some(plan) => TrackerView::Active(ActivePlanView::new(
                plan,
                plans.iter().all(|p| p.stage.is_completed()),
                config,
            )),
            None => TrackerView::Empty {
                message: "No active treatment plan",
                hint: "Click \"New Plan\" to create one",
            },
        }
    }
}

/// Render model of the tracker.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TrackerView {
    Empty {
        message: &'static str,
        hint: &'static str,
    },
    Active(ActivePlanView),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivePlanView {
    pub id: String,
    pub title: String,
    pub stage: Stage,
    pub stage_label: &'static str,
    pub stage_tone: Tone,
    pub progress: u8,
    pub timeline: Vec<TimelineNode>,
    pub start_date: String,
    /// `None` when the plan has no estimated completion date
    pub estimated_completion: Option<String>,
    pub estimated_cost: String,
    pub procedures: Vec<String>,
    /// Set when the shown plan is completed because no plan is in progress
    pub all_plans_completed: bool,
}

impl ActivePlanView {
    fn new(plan: &TreatmentPlan, all_plans_completed: bool, config: &DisplayConfig) -> Self {
        Self {
            id: plan.id.clone(),
            title: plan.title.clone(),
            stage: plan.stage,
            stage_label: plan.stage.label(),
            stage_tone: plan.stage.tone(),
            progress: plan.progress(),
            timeline: timeline(plan.stage),
            start_date: format_date(&plan.start_date, config),
            estimated_completion: plan
                .has_estimated_completion()
                .then(|| format_date(&plan.estimated_completion, config)),
            estimated_cost: format_cost(plan.estimated_cost, config),
            procedures: plan.procedures.clone(),
            all_plans_completed,
        }
    }
}

/// One clickable node of the stage timeline.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimelineNode {
    pub stage: Stage,
    /// 1-based position, shown when the node is not completed
    pub step: usize,
    pub label: &'static str,
    /// Node progress is at or below the current stage's progress
    pub completed: bool,
    /// Node is the current stage
    pub active: bool,
    /// Connector to the next node; `None` for the last node
    pub connector_filled: Option<bool>,
}

/// Build the four timeline nodes for the given current stage.
pub fn timeline(current: Stage) -> Vec<TimelineNode> {
    let current_progress = current.progress();
    let last = Stage::ALL.len() - 1;

    Stage::ALL
        .iter()
        .enumerate()
        .map(|(index, &stage)| TimelineNode {
            stage,
            step: index + 1,
            label: stage.timeline_label(),
            completed: stage.progress() <= current_progress,
            active: stage == current,
            connector_filled: (index < last).then(|| stage.progress() < current_progress),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Commit, CommitLog};

    fn plan(id: &str, stage: Stage) -> TreatmentPlan {
        TreatmentPlan {
            id: id.into(),
            title: format!("Plan {}", id),
            stage,
            procedures: vec!["Cleaning".into()],
            estimated_cost: 1500.0,
            start_date: "2024-01-15".into(),
            estimated_completion: String::new(),
        }
    }

    #[test]
    fn test_timeline_marks_completed_and_active() {
        let nodes = timeline(Stage::Procedure);

        let completed: Vec<bool> = nodes.iter().map(|n| n.completed).collect();
        assert_eq!(completed, vec![true, true, false, false]);

        let active: Vec<bool> = nodes.iter().map(|n| n.active).collect();
        assert_eq!(active, vec![false, true, false, false]);

        let connectors: Vec<Option<bool>> = nodes.iter().map(|n| n.connector_filled).collect();
        assert_eq!(connectors, vec![Some(true), Some(false), Some(false), None]);
        assert_eq!(nodes[3].step, 4);
    }

    #[test]
    fn test_timeline_completed_stage() {
        let nodes = timeline(Stage::Completed);
        assert!(nodes.iter().all(|n| n.completed));
        assert!(nodes[3].active);
    }

    #[test]
    fn test_change_stage_commits_merged_plan() {
        let tracker = TreatmentPlanTracker::new();
        let plans = vec![plan("a", Stage::PreOp), plan("b", Stage::Procedure)];
        let mut log = CommitLog::new();

        assert!(tracker.change_stage(&plans, "b", Stage::FollowUp, &mut log));
        assert_eq!(
            log.commits(),
            &[Commit::PlanUpdated(plan("b", Stage::FollowUp))]
        );
    }

    #[test]
    fn test_change_stage_unknown_plan() {
        let tracker = TreatmentPlanTracker::new();
        let mut log = CommitLog::new();
        assert!(!tracker.change_stage(&[plan("a", Stage::PreOp)], "zzz", Stage::Completed, &mut log));
        assert!(log.is_empty());
    }

    #[test]
    fn test_view_formats_active_plan() {
        let tracker = TreatmentPlanTracker::new();
        let mut current = plan("a", Stage::FollowUp);
        current.estimated_completion = "2024-06-30".into();

        let view = tracker.view(&[current], &DisplayConfig::default());
        let TrackerView::Active(active) = view else {
            panic!("expected an active plan");
        };

        assert_eq!(active.progress, 75);
        assert_eq!(active.stage_label, "Follow up");
        assert_eq!(active.stage_tone, Tone::Purple);
        assert_eq!(active.start_date, "1/15/2024");
        assert_eq!(active.estimated_completion.as_deref(), Some("6/30/2024"));
        assert_eq!(active.estimated_cost, "$1,500");
        assert!(!active.all_plans_completed);
    }

    #[test]
    fn test_view_hides_missing_completion() {
        let tracker = TreatmentPlanTracker::new();
        let view = tracker.view(&[plan("a", Stage::PreOp)], &DisplayConfig::default());
        match view {
            TrackerView::Active(active) => assert_eq!(active.estimated_completion, None),
            TrackerView::Empty { .. } => panic!("expected an active plan"),
        }
    }

    #[test]
    fn test_view_empty() {
        let tracker = TreatmentPlanTracker::new();
        let view = tracker.view(&[], &DisplayConfig::default());
        assert_eq!(
            view,
            TrackerView::Empty {
                message: "No active treatment plan",
                hint: "Click \"New Plan\" to create one",
            }
        );
    }

    #[test]
    fn test_view_flags_completed_fallback() {
        let tracker = TreatmentPlanTracker::new();
        let plans = vec![plan("a", Stage::Completed), plan("b", Stage::Completed)];
        match tracker.view(&plans, &DisplayConfig::default()) {
            TrackerView::Active(active) => {
                assert_eq!(active.id, "a");
                assert!(active.all_plans_completed);
            }
            TrackerView::Empty { .. } => panic!("expected an active plan"),
        }
    }
}
