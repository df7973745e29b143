mod advisor;
mod analysis;
mod capability;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod presentation;
mod routes;
mod session;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor::Advisor;
use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

const SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Doctor v{}", env!("CARGO_PKG_VERSION"));
    config.report_environment();

    // Probe optional capabilities once; absence degrades, never aborts.
    let extractor = Arc::new(TextExtractor::new(extraction::probe_decoder()));
    let advisor = Advisor::new(llm_client::probe_backend(&config));
    for (name, status) in [
        ("PDF extraction", extractor.status()),
        ("AI advisor", advisor.status()),
    ] {
        match &status {
            capability::CapabilityStatus::Available => info!("{name}: {status}"),
            capability::CapabilityStatus::Unavailable { .. } => warn!("{name}: {status}"),
        }
    }
    if advisor.is_available() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    }

    let sessions = SessionStore::new(config.session_ttl);
    sessions.spawn_sweeper(SWEEP_PERIOD);

    let state = AppState {
        sessions,
        extractor,
        advisor,
        config: config.clone(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
