//! Oral health assessment models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Four-level rating used for gum health and oral hygiene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthLevel {
    /// Choices offered by the edit-mode selector, in display order.
    pub const CHOICES: [HealthLevel; 4] = [
        HealthLevel::Excellent,
        HealthLevel::Good,
        HealthLevel::Fair,
        HealthLevel::Poor,
    ];

    /// Wire value (e.g. "excellent").
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLevel::Excellent => "excellent",
            HealthLevel::Good => "good",
            HealthLevel::Fair => "fair",
            HealthLevel::Poor => "poor",
        }
    }

    /// Capitalized label shown on the badge and in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            HealthLevel::Excellent => "Excellent",
            HealthLevel::Good => "Good",
            HealthLevel::Fair => "Fair",
            HealthLevel::Poor => "Poor",
        }
    }
}

impl fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "excellent" => Ok(HealthLevel::Excellent),
            "good" => Ok(HealthLevel::Good),
            "fair" => Ok(HealthLevel::Fair),
            "poor" => Ok(HealthLevel::Poor),
            _ => Err(ModelError::InvalidChoice {
                kind: "health level",
                value: s.to_string(),
            }),
        }
    }
}

/// Identifies one of the three string lists on an assessment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ListField {
    Issues,
    RiskFactors,
    Recommendations,
}

impl ListField {
    pub const ALL: [ListField; 3] = [
        ListField::Issues,
        ListField::RiskFactors,
        ListField::Recommendations,
    ];
}

impl FromStr for ListField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "issues" => Ok(ListField::Issues),
            "riskFactors" | "risk_factors" => Ok(ListField::RiskFactors),
            "recommendations" => Ok(ListField::Recommendations),
            _ => Err(ModelError::InvalidChoice {
                kind: "list field",
                value: s.to_string(),
            }),
        }
    }
}

/// A patient's oral health assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OralHealthAssessment {
    /// Gum health rating
    pub gum_health: HealthLevel,
    /// Oral hygiene rating
    pub oral_hygiene: HealthLevel,
    /// Current issues (order significant, blanks allowed while editing)
    pub issues: Vec<String>,
    /// Identified risk factors
    pub risk_factors: Vec<String>,
    /// Clinician recommendations
    pub recommendations: Vec<String>,
}

impl Default for OralHealthAssessment {
    fn default() -> Self {
        Self {
            gum_health: HealthLevel::Good,
            oral_hygiene: HealthLevel::Good,
            issues: Vec::new(),
            risk_factors: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

impl OralHealthAssessment {
    /// Create an assessment with the given ratings and empty lists.
    pub fn new(gum_health: HealthLevel, oral_hygiene: HealthLevel) -> Self {
        Self {
            gum_health,
            oral_hygiene,
            ..Self::default()
        }
    }

    /// Borrow one of the string lists.
    pub fn list(&self, field: ListField) -> &Vec<String> {
        match field {
            ListField::Issues => &self.issues,
            ListField::RiskFactors => &self.risk_factors,
            ListField::Recommendations => &self.recommendations,
        }
    }

    /// Mutably borrow one of the string lists.
    pub fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Issues => &mut self.issues,
            ListField::RiskFactors => &mut self.risk_factors,
            ListField::Recommendations => &mut self.recommendations,
        }
    }
}
