//! Axum route handlers for the session-scoped diagnose / generate flow.

use std::path::Path as FsPath;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::advisor::DEFAULT_GENERATION_TEMPERATURE;
use crate::analysis::pipeline::{analyze_document, rewrite_resume};
use crate::errors::AppError;
use crate::models::diagnosis::DiagnosisResult;
use crate::models::document::RawDocument;
use crate::models::session::SessionState;
use crate::presentation::ReportView;
use crate::state::AppState;

pub const DOWNLOAD_FILENAME: &str = "optimized_resume.md";
const UPLOAD_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DiagnoseResponse {
    pub session_id: Uuid,
    pub filename: String,
    pub char_count: usize,
    pub report: ReportView,
    /// Canonical result, shown in the page's raw-data panel.
    pub result: DiagnosisResult,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub session_id: Uuid,
    pub markdown: String,
    pub download_url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session.id,
            created_at: session.created_at,
        }),
    )
}

/// GET /api/v1/sessions/:id
///
/// Raw session snapshot for debugging.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionState>, AppError> {
    Ok(Json(state.sessions.get(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/diagnose
///
/// Multipart upload (field `file`, a `.pdf`) → extract → diagnose → report.
/// An unreadable PDF is a 422; AI failures come back as a degraded report.
pub async fn handle_diagnose(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<DiagnoseResponse>, AppError> {
    state.sessions.get(id).await?;
    let document = read_upload(multipart).await?;

    let analysis = analyze_document(
        state.extractor.clone(),
        &state.advisor,
        state.config.demo_mode,
        document,
    )
    .await?;

    let char_count = analysis.extracted.char_count();
    let report = ReportView::from(&analysis.diagnosis);
    let filename = analysis.filename.clone();
    let result = analysis.diagnosis.clone();
    state
        .sessions
        .update(id, move |session| {
            session.record_analysis(analysis.filename, analysis.extracted.text, analysis.diagnosis)
        })
        .await?;

    Ok(Json(DiagnoseResponse {
        session_id: id,
        filename,
        char_count,
        report,
        result,
    }))
}

/// POST /api/v1/sessions/:id/generate
///
/// Rewrites the résumé using the session's latest diagnosis. Body is
/// optional: `{"temperature": 0.6}`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<GenerateRequest>>,
) -> Result<Json<GenerateResponse>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let temperature = request.temperature.unwrap_or(DEFAULT_GENERATION_TEMPERATURE);
    if !(0.0..=2.0).contains(&temperature) {
        return Err(AppError::Validation(
            "temperature must be between 0.0 and 2.0".to_string(),
        ));
    }

    let session = state.sessions.get(id).await?;
    let diagnosis = session.diagnosis.as_ref().ok_or_else(|| {
        AppError::Validation("Run a diagnosis before generating a résumé".to_string())
    })?;

    let revision = session.diagnosis_revision;
    let generated = rewrite_resume(
        &state.advisor,
        state.config.demo_mode,
        &session.resume_text,
        diagnosis,
        temperature,
    )
    .await;

    let markdown = generated.as_str().to_string();
    let stored = state
        .sessions
        .update(id, move |s| s.record_generation(revision, generated))
        .await?;
    if !stored {
        warn!("Dropping rewrite for session {id}: a newer diagnosis replaced the one it was built from");
        return Err(AppError::Conflict(
            "The résumé was re-diagnosed while generating; generate again".to_string(),
        ));
    }

    Ok(Json(GenerateResponse {
        session_id: id,
        markdown,
        download_url: format!("/api/v1/sessions/{id}/resume.md"),
    }))
}

/// GET /api/v1/sessions/:id/resume.md
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    if session.generated.is_empty() {
        return Err(AppError::NotFound(
            "No generated résumé in this session yet".to_string(),
        ));
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        session.generated.as_str().to_string(),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Upload parsing
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload(mut multipart: Multipart) -> Result<RawDocument, AppError> {
    let mut document = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Failed to read form field", e))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            // Drain and ignore unknown fields.
            field
                .bytes()
                .await
                .map_err(|e| upload_error("Failed to read form field", e))?;
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        if !is_pdf_name(&filename) {
            return Err(AppError::Validation(format!(
                "'{filename}' is not a PDF; only .pdf files are accepted"
            )));
        }
        let content = field
            .bytes()
            .await
            .map_err(|e| upload_error("Failed to read file data", e))?;
        if content.is_empty() {
            return Err(AppError::Validation(format!("'{filename}' is empty")));
        }
        document = Some(RawDocument::new(filename, content));
    }

    document.ok_or_else(|| {
        AppError::Validation(format!("Missing '{UPLOAD_FIELD}' field with a PDF upload"))
    })
}

/// Keeps the 413 that axum assigns to body-limit overruns; everything else
/// is a malformed form.
fn upload_error(context: &str, error: MultipartError) -> AppError {
    let message = format!("{context}: {}", error.body_text());
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

fn is_pdf_name(filename: &str) -> bool {
    FsPath::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
