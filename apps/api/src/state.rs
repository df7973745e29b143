use std::sync::Arc;

use crate::advisor::Advisor;
use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Blocking; used from `spawn_blocking`.
    pub extractor: Arc<TextExtractor>,
    pub advisor: Advisor,
    pub config: Config,
}
