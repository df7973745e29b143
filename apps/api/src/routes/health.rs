use axum::{extract::State, Json};
use serde::Serialize;

use crate::capability::CapabilityStatus;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub demo_mode: bool,
    pub active_sessions: usize,
    pub capabilities: Capabilities,
}

#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub pdf_extraction: CapabilityStatus,
    pub ai_advisor: CapabilityStatus,
}

/// GET /health
/// Service status plus the startup capability self-check.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        service: "resume-doctor",
        demo_mode: state.config.demo_mode,
        active_sessions: state.sessions.len().await,
        capabilities: Capabilities {
            pdf_extraction: state.extractor.status(),
            ai_advisor: state.advisor.status(),
        },
    })
}
