//! Treatment plan models and the stage/progress model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Lifecycle position of a treatment plan.
///
/// Variants are declared in lifecycle order, so the derived `Ord` gives
/// `PreOp < Procedure < FollowUp < Completed`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    #[default]
    #[serde(rename = "pre-op")]
    PreOp,
    #[serde(rename = "procedure")]
    Procedure,
    #[serde(rename = "follow-up")]
    FollowUp,
    #[serde(rename = "completed")]
    Completed,
}

impl Stage {
    /// All stages in lifecycle order (the timeline nodes).
    pub const ALL: [Stage; 4] = [Stage::PreOp, Stage::Procedure, Stage::FollowUp, Stage::Completed];

    /// Linear progress percentage for this stage.
    pub fn progress(&self) -> u8 {
        match self {
            Stage::PreOp => 25,
            Stage::Procedure => 50,
            Stage::FollowUp => 75,
            Stage::Completed => 100,
        }
    }

    /// Wire value (e.g. "follow-up").
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PreOp => "pre-op",
            Stage::Procedure => "procedure",
            Stage::FollowUp => "follow-up",
            Stage::Completed => "completed",
        }
    }

    /// Badge label: first letter capitalized, hyphen replaced by a space.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::PreOp => "Pre op",
            Stage::Procedure => "Procedure",
            Stage::FollowUp => "Follow up",
            Stage::Completed => "Completed",
        }
    }

    /// Timeline caption: every word capitalized.
    pub fn timeline_label(&self) -> &'static str {
        match self {
            Stage::PreOp => "Pre Op",
            Stage::Procedure => "Procedure",
            Stage::FollowUp => "Follow Up",
            Stage::Completed => "Completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Stage::Completed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pre-op" => Ok(Stage::PreOp),
            "procedure" => Ok(Stage::Procedure),
            "follow-up" => Ok(Stage::FollowUp),
            "completed" => Ok(Stage::Completed),
            _ => Err(ModelError::InvalidChoice {
                kind: "stage",
                value: s.to_string(),
            }),
        }
    }
}

/// A treatment plan record as owned by the host application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    /// Record id (assigned by the store; locally generated ids are placeholders)
    pub id: String,
    /// Plan title, non-empty on creation
    pub title: String,
    /// Current stage
    pub stage: Stage,
    /// Planned procedures, in order
    pub procedures: Vec<String>,
    /// Estimated cost, non-negative
    #[serde(default)]
    pub estimated_cost: f64,
    /// Start date (YYYY-MM-DD)
    pub start_date: String,
    /// Estimated completion date; empty when unknown
    #[serde(default)]
    pub estimated_completion: String,
}

impl TreatmentPlan {
    /// Create a plan in the pre-op stage with no procedures and zero cost.
    pub fn new(id: String, title: String, start_date: String) -> Self {
        Self {
            id,
            title,
            stage: Stage::PreOp,
            procedures: Vec::new(),
            estimated_cost: 0.0,
            start_date,
            estimated_completion: String::new(),
        }
    }

    /// Copy of this plan with a different stage.
    pub fn with_stage(&self, stage: Stage) -> Self {
        Self {
            stage,
            ..self.clone()
        }
    }

    /// Progress percentage of the current stage.
    pub fn progress(&self) -> u8 {
        self.stage.progress()
    }

    pub fn has_estimated_completion(&self) -> bool {
        !self.estimated_completion.is_empty()
    }
}

/// Generate a placeholder plan id from the current time (Unix milliseconds).
pub fn generate_plan_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
