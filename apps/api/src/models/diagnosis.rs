use serde::{Deserialize, Serialize};

/// Canonical diagnosis record shown to the user.
///
/// Every producer (LLM, demo generator, degraded path) ends up in this shape
/// via `presentation::normalize`, so `score` is always present and every
/// suggestion is a typed [`Suggestion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// 0 – 100
    pub score: u8,
    pub score_rationale: Option<String>,
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub matched_jobs: Vec<String>,
    /// Set only on degraded results.
    pub error: Option<String>,
}

/// A single piece of advice.
///
/// The LLM is asked for `{advice, evidence}` pairs; older producers and the
/// demo generator emit bare strings. Both are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Suggestion {
    Structured { advice: String, evidence: String },
    Plain(String),
}

impl DiagnosisResult {
    /// A structurally valid result for when the backend could not produce one.
    pub fn degraded(summary: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            score: 0,
            score_rationale: None,
            summary: summary.into(),
            pros: Vec::new(),
            cons: Vec::new(),
            suggestions: Vec::new(),
            matched_jobs: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Markdown résumé produced by the rewrite call. Always trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedResume(String);

impl GeneratedResume {
    pub fn new(markdown: impl AsRef<str>) -> Self {
        Self(markdown.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
