//! Analysis pipeline: composes the three stages for one user action.
//!
//! Flow: RawDocument → extract (blocking pool) → diagnose → DiagnosisResult,
//!       and DiagnosisResult + text → rewrite prompt → GeneratedResume.
//!
//! Only extraction failure is reported as an error: there is nothing to
//! analyse. LLM trouble has already become a degraded value in `advisor`.

use std::sync::Arc;

use tracing::{info, warn};

use crate::advisor::demo::{demo_diagnosis, demo_resume};
use crate::advisor::{build_rewrite_prompt, Advisor};
use crate::errors::AppError;
use crate::extraction::TextExtractor;
use crate::models::diagnosis::{DiagnosisResult, GeneratedResume};
use crate::models::document::{ExtractedText, RawDocument};
use crate::presentation::normalize;

/// Outcome of one diagnose action.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub filename: String,
    pub extracted: ExtractedText,
    pub diagnosis: DiagnosisResult,
}

pub async fn analyze_document(
    extractor: Arc<TextExtractor>,
    advisor: &Advisor,
    demo_mode: bool,
    document: RawDocument,
) -> Result<Analysis, AppError> {
    let filename = document.filename.clone();
    info!("Extracting text from '{}' ({} bytes)", filename, document.content.len());

    let extracted = tokio::task::spawn_blocking(move || extractor.extract(&document))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?;

    if let Some(reason) = &extracted.error {
        return Err(AppError::UnprocessableEntity(format!(
            "Failed to read the PDF: {reason}"
        )));
    }
    if extracted.text.is_empty() {
        warn!("'{filename}' contains no extractable text (scanned or image-only PDF?)");
    }
    info!("Extracted {} characters from '{}'", extracted.char_count(), filename);

    let diagnosis = diagnose_text(advisor, demo_mode, &extracted.text).await;
    if diagnosis.is_degraded() {
        warn!("Returning a degraded diagnosis for '{filename}'");
    }

    Ok(Analysis {
        filename,
        extracted,
        diagnosis,
    })
}

/// Diagnoses text, substituting the demo report when demo mode is on and the
/// backend is unavailable.
pub async fn diagnose_text(advisor: &Advisor, demo_mode: bool, text: &str) -> DiagnosisResult {
    if demo_mode && !advisor.is_available() {
        info!("Serving demo diagnosis");
        return normalize(&demo_diagnosis());
    }
    advisor.diagnose(text).await
}

/// Rewrites the résumé using the suggestions from a prior diagnosis.
pub async fn rewrite_resume(
    advisor: &Advisor,
    demo_mode: bool,
    resume_text: &str,
    diagnosis: &DiagnosisResult,
    temperature: f32,
) -> GeneratedResume {
    if demo_mode && !advisor.is_available() {
        info!("Serving demo résumé");
        return demo_resume();
    }
    let prompt = build_rewrite_prompt(resume_text, &diagnosis.suggestions);
    advisor.generate_resume(&prompt, temperature).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability;
    use crate::extraction::decoder::PageDecoder;
    use crate::llm_client::{ChatBackend, LlmError};
    use crate::testing::{FakeDecoder, ScriptedBackend};

    fn extractor(decoder: FakeDecoder) -> Arc<TextExtractor> {
        let decoder: Arc<dyn PageDecoder> = Arc::new(decoder);
        Arc::new(TextExtractor::new(Capability::Available(decoder)))
    }

    fn advisor(backend: Arc<ScriptedBackend>) -> Advisor {
        let backend: Arc<dyn ChatBackend> = backend;
        Advisor::new(Capability::Available(backend))
    }

    fn offline() -> Advisor {
        Advisor::new(Capability::Unavailable("DEEPSEEK_API_KEY is not set".to_string()))
    }

    #[tokio::test]
    async fn test_analyze_document_sends_extracted_text_to_backend() {
        let backend = Arc::new(ScriptedBackend::replying(r#"{"score": 64, "summary": "ok"}"#));
        let doc = RawDocument::new("cv.pdf", "Jane Doe\x0cRust engineer");

        let analysis = analyze_document(
            extractor(FakeDecoder::path_only()),
            &advisor(backend.clone()),
            false,
            doc,
        )
        .await
        .unwrap();

        assert_eq!(analysis.extracted.text, "Jane Doe\nRust engineer");
        assert_eq!(analysis.diagnosis.score, 64);
        assert!(backend.requests()[0].user.contains("Jane Doe\nRust engineer"));
    }

    #[tokio::test]
    async fn test_analyze_document_extraction_failure_is_unprocessable() {
        let backend = Arc::new(ScriptedBackend::replying("{}"));
        let result = analyze_document(
            extractor(FakeDecoder::broken()),
            &advisor(backend.clone()),
            false,
            RawDocument::new("broken.pdf", "garbage"),
        )
        .await;

        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_document_backend_fault_still_ok() {
        let backend = Arc::new(ScriptedBackend::failing(LlmError::EmptyContent));
        let analysis = analyze_document(
            extractor(FakeDecoder::default()),
            &advisor(backend),
            false,
            RawDocument::new("cv.pdf", "text"),
        )
        .await
        .unwrap();

        assert!(analysis.diagnosis.is_degraded());
        assert_eq!(analysis.diagnosis.score, 0);
    }

    #[tokio::test]
    async fn test_demo_mode_only_applies_when_backend_unavailable() {
        let demo = diagnose_text(&offline(), true, "text").await;
        assert_eq!(demo.score, 82);

        let degraded = diagnose_text(&offline(), false, "text").await;
        assert_eq!(degraded.score, 0);

        let backend = Arc::new(ScriptedBackend::replying(r#"{"score": 50}"#));
        let real = diagnose_text(&advisor(backend), true, "text").await;
        assert_eq!(real.score, 50);
    }

    #[tokio::test]
    async fn test_rewrite_resume_builds_prompt_from_diagnosis() {
        let backend = Arc::new(ScriptedBackend::replying("# New CV\n"));
        let diagnosis = normalize(&serde_json::json!({
            "suggestions": [{"advice": "Add metrics", "evidence": "Led team"}]
        }));

        let resume = rewrite_resume(&advisor(backend.clone()), false, "Old CV", &diagnosis, 0.6).await;

        assert_eq!(resume.as_str(), "# New CV");
        let prompt = &backend.requests()[0].user;
        assert!(prompt.contains("Old CV"));
        assert!(prompt.contains("Add metrics"));
    }

    #[tokio::test]
    async fn test_rewrite_resume_demo() {
        let diagnosis = normalize(&demo_diagnosis());
        let resume = rewrite_resume(&offline(), true, "Old CV", &diagnosis, 0.6).await;
        assert!(resume.as_str().contains("(Demo)"));
    }
}
