//! New treatment plan creation flow.

use serde::{Deserialize, Serialize};

use super::PlanSink;
use crate::models::{generate_plan_id, Stage, TreatmentPlan};

/// Draft of a plan that does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPlanDraft {
    pub title: String,
    pub stage: Stage,
    pub procedures: Vec<String>,
    pub estimated_cost: f64,
    pub start_date: String,
    pub estimated_completion: String,
}

impl Default for NewPlanDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            stage: Stage::PreOp,
            procedures: Vec::new(),
            estimated_cost: 0.0,
            start_date: String::new(),
            estimated_completion: String::new(),
        }
    }
}

impl NewPlanDraft {
    /// Title and start date are required.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.start_date.is_empty()
    }

    /// Build the plan record under the given id.
    pub fn to_plan(&self, id: String) -> TreatmentPlan {
        TreatmentPlan {
            id,
            title: self.title.clone(),
            stage: self.stage,
            procedures: self.procedures.clone(),
            estimated_cost: self.estimated_cost,
            start_date: self.start_date.clone(),
            estimated_completion: self.estimated_completion.clone(),
        }
    }
}

/// Split multi-line procedure text into entries, dropping blank lines.
pub fn parse_procedures(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the cost input. Anything that is not a finite, non-negative number
/// becomes zero.
pub fn parse_cost(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(cost) if cost.is_finite() && cost >= 0.0 => cost,
        _ => 0.0,
    }
}

/// Modal state: open flag plus an independent [`NewPlanDraft`].
///
/// Every way of closing the modal resets the draft, so reopening always
/// starts from defaults. Edits and submits are ignored while it is closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreationModal {
    open: bool,
    draft: NewPlanDraft,
}

impl CreationModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &NewPlanDraft {
        &self.draft
    }

    /// Close without creating anything.
    pub fn cancel(&mut self) {
        self.close();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(draft) = self.draft_mut("set_title") {
            draft.title = title.into();
        }
    }

    pub fn set_start_date(&mut self, date: impl Into<String>) {
        if let Some(draft) = self.draft_mut("set_start_date") {
            draft.start_date = date.into();
        }
    }

    pub fn set_estimated_completion(&mut self, date: impl Into<String>) {
        if let Some(draft) = self.draft_mut("set_estimated_completion") {
            draft.estimated_completion = date.into();
        }
    }

    pub fn set_cost_input(&mut self, input: &str) {
        if let Some(draft) = self.draft_mut("set_cost_input") {
            draft.estimated_cost = parse_cost(input);
        }
    }

    pub fn set_procedures_text(&mut self, text: &str) {
        if let Some(draft) = self.draft_mut("set_procedures_text") {
            draft.procedures = parse_procedures(text);
        }
    }

    /// Procedures as the multi-line text shown in the editor.
    pub fn procedures_text(&self) -> String {
        self.draft.procedures.join("\n")
    }

    pub fn can_submit(&self) -> bool {
        self.open && self.draft.is_complete()
    }

    /// Create the plan if the draft is complete.
    ///
    /// On success the sink receives the plan exactly once, the draft is reset
    /// and the modal closes. Otherwise nothing changes.
    pub fn submit(&mut self, sink: &mut impl PlanSink) -> Option<TreatmentPlan> {
        if !self.can_submit() {
            tracing::debug!(open = self.open, "new plan submit ignored");
            return None;
        }

        let plan = self.draft.to_plan(generate_plan_id());
        tracing::info!(plan_id = %plan.id, title = %plan.title, "treatment plan created");
        sink.on_plan_add(plan.clone());
        self.close();
        Some(plan)
    }

    pub fn view(&self) -> ModalView {
        ModalView {
            open: self.open,
            title: self.draft.title.clone(),
            start_date: self.draft.start_date.clone(),
            estimated_completion: self.draft.estimated_completion.clone(),
            estimated_cost: self.draft.estimated_cost,
            procedures_text: self.procedures_text(),
            can_submit: self.can_submit(),
        }
    }

    fn draft_mut(&mut self, op: &'static str) -> Option<&mut NewPlanDraft> {
        if !self.open {
            tracing::debug!(op, "ignored while modal is closed");
            return None;
        }
        Some(&mut self.draft)
    }

    fn close(&mut self) {
        self.open = false;
        self.draft = NewPlanDraft::default();
    }
}

/// Render model of the creation modal.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModalView {
    pub open: bool,
    pub title: String,
    pub start_date: String,
    pub estimated_completion: String,
    pub estimated_cost: f64,
    pub procedures_text: String,
    pub can_submit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::CommitLog;

    #[test]
    fn test_parse_procedures_drops_blank_lines() {
        assert_eq!(
            parse_procedures("Root canal\n\nCrown placement"),
            vec!["Root canal".to_string(), "Crown placement".to_string()]
        );
        assert_eq!(parse_procedures("  \n\t\n"), Vec::<String>::new());
        assert_eq!(parse_procedures(""), Vec::<String>::new());
    }

    #[test]
    fn test_parse_cost_fallbacks() {
        assert_eq!(parse_cost("1250.50"), 1250.5);
        assert_eq!(parse_cost(""), 0.0);
        assert_eq!(parse_cost("abc"), 0.0);
        assert_eq!(parse_cost("-20"), 0.0);
        assert_eq!(parse_cost("inf"), 0.0);
    }

    #[test]
    fn test_whitespace_title_can_submit() {
        let mut modal = CreationModal::new();
        modal.open();
        modal.set_title("   ");
        assert!(!modal.can_submit());

        modal.set_start_date("2024-01-01");
        assert!(modal.can_submit());
    }

    #[test]
    fn test_closed_modal_ignores_edits() {
        let mut modal = CreationModal::new();
        modal.set_title("Stale");
        modal.set_start_date("2024-01-01");
        modal.set_cost_input("500");
        modal.set_procedures_text("Scaling");
        assert!(!modal.can_submit());

        modal.open();
        assert_eq!(modal.draft(), &NewPlanDraft::default());
    }

    #[test]
    fn test_closed_modal_does_not_submit() {
        let mut modal = CreationModal::new();
        let mut log = CommitLog::new();
        modal.open();
        modal.cancel();
        modal.set_title("Ghost");
        modal.set_start_date("2024-01-01");

        assert!(modal.submit(&mut log).is_none());
        assert!(log.is_empty());
        assert!(!modal.view().can_submit);
    }

    #[test]
    fn test_submit_keeps_optional_fields() {
        let mut modal = CreationModal::new();
        let mut log = CommitLog::new();
        modal.open();
        modal.set_title("Implant");
        modal.set_start_date("2024-05-01");
        modal.set_estimated_completion("2024-08-01");
        modal.set_cost_input("3200");
        modal.set_procedures_text("Extraction\nBone graft\n\nImplant placement\n");

        let plan = modal.submit(&mut log).unwrap();
        assert_eq!(plan.estimated_completion, "2024-08-01");
        assert_eq!(plan.estimated_cost, 3200.0);
        assert_eq!(plan.procedures.len(), 3);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_procedures_text_round_trip() {
        let mut modal = CreationModal::new();
        modal.open();
        modal.set_procedures_text("Scaling\n\nPolishing");
        assert_eq!(modal.procedures_text(), "Scaling\nPolishing");
    }

    #[test]
    fn test_cancel_resets_draft() {
        let mut modal = CreationModal::new();
        modal.open();
        modal.set_title("Veneers");
        modal.set_cost_input("900");
        modal.cancel();

        assert!(!modal.is_open());
        assert_eq!(modal.draft(), &NewPlanDraft::default());

        modal.open();
        assert_eq!(modal.view().title, "");
    }
}
