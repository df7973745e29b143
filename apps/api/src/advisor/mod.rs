//! Advisory Client — résumé diagnosis and rewrite through the LLM backend.
//!
//! Every failure mode (missing credential, network fault, API error, empty or
//! malformed completion) ends in a value: a degraded [`DiagnosisResult`] or a
//! short failure document. Nothing above this module handles LLM errors.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::capability::{Capability, CapabilityStatus};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, MARKDOWN_ONLY_SYSTEM};
use crate::llm_client::{strip_json_fences, ChatBackend, ChatRequest, LlmError};
use crate::models::diagnosis::{DiagnosisResult, GeneratedResume, Suggestion};
use crate::presentation::normalize;

pub mod demo;
pub mod prompts;

use prompts::{
    fill_template, DIAGNOSIS_SYSTEM, DIAGNOSIS_USER_TEMPLATE, REWRITE_PROMPT_TEMPLATE,
    REWRITE_SYSTEM,
};

pub const DIAGNOSIS_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_GENERATION_TEMPERATURE: f32 = 0.6;
/// Characters of the original résumé included in a rewrite prompt.
pub const REWRITE_TEXT_BUDGET: usize = 2000;

#[derive(Clone)]
pub struct Advisor {
    backend: Capability<Arc<dyn ChatBackend>>,
}

impl Advisor {
    pub fn new(backend: Capability<Arc<dyn ChatBackend>>) -> Self {
        Self { backend }
    }

    pub fn status(&self) -> CapabilityStatus {
        self.backend.status()
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// Scores and critiques the résumé text. Never fails; see module docs.
    pub async fn diagnose(&self, text: &str) -> DiagnosisResult {
        let backend = match &self.backend {
            Capability::Available(backend) => backend,
            Capability::Unavailable(reason) => {
                warn!("Diagnosis skipped: AI backend unavailable ({reason})");
                return unconfigured_diagnosis(reason);
            }
        };

        info!("Requesting diagnosis for {} characters of résumé text", text.chars().count());
        let request = ChatRequest {
            system: format!("{DIAGNOSIS_SYSTEM}\n\n{JSON_ONLY_SYSTEM}"),
            user: fill_template(DIAGNOSIS_USER_TEMPLATE, &[("resume_text", text)]),
            temperature: DIAGNOSIS_TEMPERATURE,
            json_mode: true,
        };

        match request_diagnosis(backend.as_ref(), &request).await {
            Ok(result) => {
                info!("Diagnosis complete: score {}/100", result.score);
                result
            }
            Err(e) => {
                warn!("Diagnosis failed: {e}");
                DiagnosisResult::degraded(
                    "The AI diagnosis is currently unavailable (the call failed).",
                    e.to_string(),
                )
            }
        }
    }

    /// Produces a Markdown résumé from a rewrite prompt. Never fails: on error
    /// the returned document explains what went wrong.
    pub async fn generate_resume(&self, prompt: &str, temperature: f32) -> GeneratedResume {
        let backend = match &self.backend {
            Capability::Available(backend) => backend,
            Capability::Unavailable(reason) => {
                warn!("Generation skipped: AI backend unavailable ({reason})");
                return failed_generation(reason);
            }
        };

        info!("Requesting résumé rewrite (temperature {temperature})");
        let request = ChatRequest {
            system: format!("{REWRITE_SYSTEM}\n\n{MARKDOWN_ONLY_SYSTEM}"),
            user: prompt.to_string(),
            temperature,
            json_mode: false,
        };

        match backend.complete(&request).await {
            Ok(markdown) if !markdown.trim().is_empty() => GeneratedResume::new(markdown),
            Ok(_) => {
                warn!("Generation returned empty content");
                failed_generation(&LlmError::EmptyContent.to_string())
            }
            Err(e) => {
                warn!("Generation failed: {e}");
                failed_generation(&e.to_string())
            }
        }
    }
}

async fn request_diagnosis(
    backend: &dyn ChatBackend,
    request: &ChatRequest,
) -> Result<DiagnosisResult, LlmError> {
    let completion = backend.complete(request).await?;
    let value: Value = serde_json::from_str(strip_json_fences(&completion))?;
    if !value.is_object() {
        return Err(LlmError::Malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    Ok(normalize(&value))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn unconfigured_diagnosis(reason: &str) -> DiagnosisResult {
    let mut result = DiagnosisResult::degraded(
        "The AI diagnosis is not configured, so no analysis was performed.",
        reason,
    );
    result.suggestions = vec![
        Suggestion::Structured {
            advice: "Set DEEPSEEK_API_KEY in .env or the process environment".to_string(),
            evidence: "Without a credential every AI call fails".to_string(),
        },
        Suggestion::Structured {
            advice: "Restart the service after changing .env".to_string(),
            evidence: "The credential is read once at startup".to_string(),
        },
    ];
    result
}

fn failed_generation(reason: &str) -> GeneratedResume {
    GeneratedResume::new(format!(
        "# Résumé generation failed\n\n- Reason: {reason}\n\nCheck the AI configuration and try again."
    ))
}

/// Builds the rewrite instruction from the original text (first
/// [`REWRITE_TEXT_BUDGET`] characters) and the diagnosis suggestions as JSON.
pub fn build_rewrite_prompt(resume_text: &str, suggestions: &[Suggestion]) -> String {
    let excerpt: String = resume_text.chars().take(REWRITE_TEXT_BUDGET).collect();
    let suggestions_json =
        serde_json::to_string(suggestions).unwrap_or_else(|_| "[]".to_string());
    fill_template(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("resume_text", excerpt.as_str()),
            ("suggestions", suggestions_json.as_str()),
        ],
    )
}
