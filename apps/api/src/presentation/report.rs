//! Display schema consumed by the web page.
//!
//! Every list section is either a set of items or an explicit notice, so the
//! page never has to decide what an empty array means.

use serde::Serialize;

use crate::models::diagnosis::{DiagnosisResult, Suggestion};

pub const NO_PROS_NOTICE: &str = "The AI did not list any strengths.";
pub const NO_CONS_NOTICE: &str = "The AI did not list any weaknesses.";
pub const NO_SUGGESTIONS_NOTICE: &str =
    "The AI returned no concrete suggestions (or demo mode is active).";
pub const NO_JOBS_NOTICE: &str = "The AI returned no matched jobs (or demo mode is active).";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section<T> {
    Items { items: Vec<T> },
    NoData { notice: String },
}

impl<T> Section<T> {
    fn from_items(items: Vec<T>, notice: &str) -> Self {
        if items.is_empty() {
            Section::NoData {
                notice: notice.to_string(),
            }
        } else {
            Section::Items { items }
        }
    }
}

/// A numbered suggestion, rendered either as advice with its evidence or as
/// a single line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionView {
    Detailed {
        index: usize,
        advice: String,
        evidence: String,
    },
    Line {
        index: usize,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub score: u8,
    /// Omitted from the page when absent.
    pub score_rationale: Option<String>,
    pub summary: String,
    pub pros: Section<String>,
    pub cons: Section<String>,
    pub suggestions: Section<SuggestionView>,
    pub matched_jobs: Section<String>,
    /// Banner text for degraded results.
    pub degraded: Option<String>,
}

impl From<&DiagnosisResult> for ReportView {
    fn from(result: &DiagnosisResult) -> Self {
        let suggestions = result
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| match s {
                Suggestion::Structured { advice, evidence } => SuggestionView::Detailed {
                    index: i + 1,
                    advice: advice.clone(),
                    evidence: evidence.clone(),
                },
                Suggestion::Plain(text) => SuggestionView::Line {
                    index: i + 1,
                    text: text.clone(),
                },
            })
            .collect();

        ReportView {
            score: result.score,
            score_rationale: result.score_rationale.clone(),
            summary: result.summary.clone(),
            pros: Section::from_items(result.pros.clone(), NO_PROS_NOTICE),
            cons: Section::from_items(result.cons.clone(), NO_CONS_NOTICE),
            suggestions: Section::from_items(suggestions, NO_SUGGESTIONS_NOTICE),
            matched_jobs: Section::from_items(result.matched_jobs.clone(), NO_JOBS_NOTICE),
            degraded: result.error.clone(),
        }
    }
}
