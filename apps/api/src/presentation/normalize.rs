//! Maps any candidate diagnosis shape onto [`DiagnosisResult`].
//!
//! Total over every `serde_json::Value`: missing or mistyped fields fall back
//! to defaults, never to an error.

use serde_json::Value;

use crate::models::diagnosis::{DiagnosisResult, Suggestion};

pub const SUMMARY_PLACEHOLDER: &str = "No summary available.";
pub const ADVICE_PLACEHOLDER: &str = "No advice provided";
pub const EVIDENCE_PLACEHOLDER: &str = "No location given";

pub fn normalize(candidate: &Value) -> DiagnosisResult {
    DiagnosisResult {
        score: score(candidate.get("score")),
        score_rationale: text(candidate.get("score_rationale")),
        summary: text(candidate.get("summary")).unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string()),
        pros: string_list(candidate.get("pros")),
        cons: string_list(candidate.get("cons")),
        suggestions: suggestions(candidate.get("suggestions")),
        matched_jobs: string_list(candidate.get("matched_jobs")),
        error: error(candidate.get("error")),
    }
}

/// Accepts integers, floats (rounded) and numeric strings; clamps to 0–100.
fn score(value: Option<&Value>) -> u8 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(v) if v.is_finite() => v.round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// A lone string where a list is expected becomes a one-element list.
fn items(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(arr)) => arr.iter().collect(),
        Some(v @ Value::String(_)) => vec![v],
        _ => Vec::new(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    items(value).into_iter().filter_map(|v| text(Some(v))).collect()
}

fn suggestions(value: Option<&Value>) -> Vec<Suggestion> {
    items(value)
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(Suggestion::Structured {
                advice: text(map.get("advice")).unwrap_or_else(|| ADVICE_PLACEHOLDER.to_string()),
                evidence: text(map.get("evidence"))
                    .unwrap_or_else(|| EVIDENCE_PLACEHOLDER.to_string()),
            }),
            other => text(Some(other)).map(Suggestion::Plain),
        })
        .collect()
}

fn error(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(other) => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_gets_documented_defaults() {
        let result = normalize(&json!({}));
        assert_eq!(result.score, 0);
        assert_eq!(result.score_rationale, None);
        assert_eq!(result.summary, SUMMARY_PLACEHOLDER);
        assert!(result.pros.is_empty());
        assert!(result.cons.is_empty());
        assert!(result.suggestions.is_empty());
        assert!(result.matched_jobs.is_empty());
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_non_object_inputs_are_accepted() {
        for candidate in [json!(null), json!(42), json!("text"), json!([1, 2, 3])] {
            let result = normalize(&candidate);
            assert_eq!(result.score, 0);
            assert_eq!(result.summary, SUMMARY_PLACEHOLDER);
        }
    }

    #[test]
    fn test_full_llm_payload() {
        let result = normalize(&json!({
            "score": 78,
            "score_rationale": "Solid stack, few metrics.",
            "summary": "Good backend profile.",
            "pros": ["Rust", "Kafka"],
            "cons": ["No numbers"],
            "suggestions": [{"advice": "Quantify latency wins", "evidence": "Improved API speed"}],
            "matched_jobs": ["Backend Engineer"]
        }));
        assert_eq!(result.score, 78);
        assert_eq!(result.score_rationale.as_deref(), Some("Solid stack, few metrics."));
        assert_eq!(result.pros, vec!["Rust", "Kafka"]);
        assert_eq!(
            result.suggestions,
            vec![Suggestion::Structured {
                advice: "Quantify latency wins".to_string(),
                evidence: "Improved API speed".to_string(),
            }]
        );
        assert_eq!(result.matched_jobs, vec!["Backend Engineer"]);
    }

    #[test]
    fn test_mixed_suggestion_shapes() {
        let result = normalize(&json!({
            "suggestions": [
                {"advice": "Add metrics"},
                "Link your GitHub",
                {"evidence": "Responsible for stuff"},
                "   ",
                null
            ]
        }));
        assert_eq!(
            result.suggestions,
            vec![
                Suggestion::Structured {
                    advice: "Add metrics".to_string(),
                    evidence: EVIDENCE_PLACEHOLDER.to_string(),
                },
                Suggestion::Plain("Link your GitHub".to_string()),
                Suggestion::Structured {
                    advice: ADVICE_PLACEHOLDER.to_string(),
                    evidence: "Responsible for stuff".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_score_coercion_and_clamping() {
        assert_eq!(normalize(&json!({"score": "85"})).score, 85);
        assert_eq!(normalize(&json!({"score": 72.6})).score, 73);
        assert_eq!(normalize(&json!({"score": 140})).score, 100);
        assert_eq!(normalize(&json!({"score": -5})).score, 0);
        assert_eq!(normalize(&json!({"score": "great"})).score, 0);
        assert_eq!(normalize(&json!({"score": true})).score, 0);
    }

    #[test]
    fn test_single_string_becomes_list() {
        let result = normalize(&json!({"matched_jobs": "Data Engineer", "pros": "Clear layout"}));
        assert_eq!(result.matched_jobs, vec!["Data Engineer"]);
        assert_eq!(result.pros, vec!["Clear layout"]);
    }

    #[test]
    fn test_blank_summary_uses_placeholder_and_error_is_kept() {
        let result = normalize(&json!({"summary": "  ", "error": "backend refused"}));
        assert_eq!(result.summary, SUMMARY_PLACEHOLDER);
        assert_eq!(result.error.as_deref(), Some("backend refused"));
    }

    #[test]
    fn test_normalize_is_idempotent_over_serialized_result() {
        let first = normalize(&json!({
            "score": 60,
            "summary": "ok",
            "suggestions": ["plain", {"advice": "a", "evidence": "e"}]
        }));
        let second = normalize(&serde_json::to_value(&first).unwrap());
        assert_eq!(first, second);
    }
}
