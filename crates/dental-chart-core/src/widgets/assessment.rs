//! Oral health assessment editor.

use serde::Serialize;

use super::AssessmentSink;
use crate::display::Tone;
use crate::models::{HealthLevel, ListField, OralHealthAssessment};
use crate::session::{DraftSession, EditMode, ListEditor, ListResult};

/// Editor state for one assessment: read mode shows the committed record,
/// edit mode shows and mutates a draft.
#[derive(Debug, Clone)]
pub struct AssessmentEditor {
    session: DraftSession<OralHealthAssessment>,
}

impl AssessmentEditor {
    pub fn new(assessment: OralHealthAssessment) -> Self {
        Self {
            session: DraftSession::new(assessment),
        }
    }

    /// Accept the host's current record.
    pub fn sync(&mut self, assessment: OralHealthAssessment) {
        self.session.sync(assessment);
    }

    pub fn begin_edit(&mut self) {
        self.session.begin_edit();
    }

    /// Reopen edit mode with a saved draft the host could not store.
    pub fn resume_edit(&mut self, draft: OralHealthAssessment) {
        self.session.resume(draft);
    }

    /// Header toggle: enter edit mode, or leave it discarding the draft.
    pub fn toggle_edit(&mut self) -> EditMode {
        self.session.toggle()
    }

    pub fn mode(&self) -> EditMode {
        self.session.mode()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    pub fn committed(&self) -> &OralHealthAssessment {
        self.session.committed()
    }

    pub fn draft(&self) -> &OralHealthAssessment {
        self.session.draft()
    }

    pub fn set_gum_health(&mut self, level: HealthLevel) -> bool {
        self.edit("set_gum_health", |draft| draft.gum_health = level)
            .is_some()
    }

    pub fn set_oral_hygiene(&mut self, level: HealthLevel) -> bool {
        self.edit("set_oral_hygiene", |draft| draft.oral_hygiene = level)
            .is_some()
    }

    /// Append an empty entry to a list.
    pub fn add_entry(&mut self, field: ListField) -> bool {
        self.edit("add_entry", |draft| draft.list_mut(field).append_blank())
            .is_some()
    }

    /// Replace an entry. `Ok(false)` means the editor was not in edit mode.
    pub fn update_entry(&mut self, field: ListField, index: usize, value: String) -> ListResult<bool> {
        self.edit("update_entry", |draft| draft.list_mut(field).set_entry(index, value))
            .transpose()
            .map(|applied| applied.is_some())
    }

    /// Remove an entry, returning it. `Ok(None)` means the editor was not in
    /// edit mode.
    pub fn remove_entry(&mut self, field: ListField, index: usize) -> ListResult<Option<String>> {
        self.edit("remove_entry", |draft| draft.list_mut(field).remove_entry(index))
            .transpose()
    }

    /// Hand the draft to the sink and return to read mode.
    pub fn save(&mut self, sink: &mut impl AssessmentSink) -> bool {
        match self.session.commit() {
            Some(draft) => {
                tracing::info!(
                    issues = draft.issues.len(),
                    risk_factors = draft.risk_factors.len(),
                    recommendations = draft.recommendations.len(),
                    "assessment saved"
                );
                sink.on_assessment_update(draft);
                true
            }
            None => false,
        }
    }

    /// Discard the draft and return to read mode.
    pub fn cancel(&mut self) {
        self.session.discard();
    }

    pub fn view(&self) -> AssessmentView {
        let record = self.session.current();
        AssessmentView {
            mode: self.session.mode(),
            gum_health: HealthField::new("Gum Health", record.gum_health),
            oral_hygiene: HealthField::new("Oral Hygiene", record.oral_hygiene),
            health_choices: HealthLevel::CHOICES
                .iter()
                .map(|level| HealthChoice {
                    value: level.as_str(),
                    label: level.label(),
                })
                .collect(),
            sections: ListField::ALL
                .iter()
                .map(|&field| ListSection::new(field, record.list(field)))
                .collect(),
            can_save: self.session.is_editing(),
        }
    }

    fn edit<R>(&mut self, op: &'static str, f: impl FnOnce(&mut OralHealthAssessment) -> R) -> Option<R> {
        let result = self.session.edit(f);
        if result.is_none() {
            tracing::debug!(op, "ignored outside edit mode");
        }
        result
    }
}

/// Render model of the assessment widget.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssessmentView {
    pub mode: EditMode,
    pub gum_health: HealthField,
    pub oral_hygiene: HealthField,
    /// Options for the constrained health selectors
    pub health_choices: Vec<HealthChoice>,
    pub sections: Vec<ListSection>,
    pub can_save: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HealthField {
    pub caption: &'static str,
    pub level: HealthLevel,
    pub label: &'static str,
    pub tone: Tone,
}

impl HealthField {
    fn new(caption: &'static str, level: HealthLevel) -> Self {
        Self {
            caption,
            level,
            label: level.label(),
            tone: level.tone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HealthChoice {
    pub value: &'static str,
    pub label: &'static str,
}

/// One string list as rendered.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListSection {
    pub field: ListField,
    pub title: &'static str,
    pub entries: Vec<String>,
    /// Fixed message shown in place of entries when the list is empty
    pub placeholder: Option<&'static str>,
    pub add_label: &'static str,
    pub input_placeholder: &'static str,
}

impl ListSection {
    fn new(field: ListField, entries: &[String]) -> Self {
        let (title, empty, add_label, input_placeholder) = match field {
            ListField::Issues => (
                "Current Issues",
                "No issues recorded",
                "Add Issue",
                "Enter issue...",
            ),
            ListField::RiskFactors => (
                "Risk Factors",
                "No risk factors identified",
                "Add Factor",
                "Enter risk factor...",
            ),
            ListField::Recommendations => (
                "Recommendations",
                "No recommendations added",
                "Add Recommendation",
                "Enter recommendation...",
            ),
        };
        Self {
            field,
            title,
            entries: entries.to_vec(),
            placeholder: entries.is_empty().then_some(empty),
            add_label,
            input_placeholder,
        }
    }
}
