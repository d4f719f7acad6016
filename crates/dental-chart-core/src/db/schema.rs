//! SQLite schema definition.

/// Complete database schema for the chart store.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Oral Health Assessments (one current assessment per patient)
-- ============================================================================

CREATE TABLE IF NOT EXISTS oral_health_assessments (
    patient_id TEXT PRIMARY KEY,
    gum_health TEXT NOT NULL CHECK (gum_health IN ('excellent', 'good', 'fair', 'poor')),
    oral_hygiene TEXT NOT NULL CHECK (oral_hygiene IN ('excellent', 'good', 'fair', 'poor')),
    issues TEXT NOT NULL DEFAULT '[]',            -- JSON array of strings
    risk_factors TEXT NOT NULL DEFAULT '[]',      -- JSON array of strings
    recommendations TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Treatment Plans
-- ============================================================================

CREATE TABLE IF NOT EXISTS treatment_plans (
    id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL,
    position INTEGER NOT NULL,                    -- insertion order within patient
    title TEXT NOT NULL CHECK (length(title) > 0),
    stage TEXT NOT NULL DEFAULT 'pre-op'
        CHECK (stage IN ('pre-op', 'procedure', 'follow-up', 'completed')),
    procedures TEXT NOT NULL DEFAULT '[]',        -- JSON array of strings
    estimated_cost REAL NOT NULL DEFAULT 0 CHECK (estimated_cost >= 0),
    start_date TEXT NOT NULL,
    estimated_completion TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_plans_patient ON treatment_plans(patient_id, position);
"#;
