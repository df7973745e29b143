use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::diagnosis::{DiagnosisResult, GeneratedResume};

/// Everything one user has produced in the current session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub filename: Option<String>,
    pub resume_text: String,
    pub diagnosis: Option<DiagnosisResult>,
    /// Bumped on every analysis; a rewrite is stored only against the
    /// revision it was built from.
    pub diagnosis_revision: u64,
    pub generated: GeneratedResume,
}

impl SessionState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            filename: None,
            resume_text: String::new(),
            diagnosis: None,
            diagnosis_revision: 0,
            generated: GeneratedResume::default(),
        }
    }

    /// Records a fresh analysis. The previous rewrite no longer matches the
    /// new diagnosis, so it is cleared.
    pub fn record_analysis(&mut self, filename: String, text: String, diagnosis: DiagnosisResult) {
        self.filename = Some(filename);
        self.resume_text = text;
        self.diagnosis = Some(diagnosis);
        self.diagnosis_revision += 1;
        self.generated = GeneratedResume::default();
        self.updated_at = Utc::now();
    }

    /// Stores a rewrite built from diagnosis `revision`. Returns `false` and
    /// leaves the session alone if a newer analysis has landed since.
    pub fn record_generation(&mut self, revision: u64, generated: GeneratedResume) -> bool {
        if revision != self.diagnosis_revision {
            return false;
        }
        self.generated = generated;
        self.updated_at = Utc::now();
        true
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
