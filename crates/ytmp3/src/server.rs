//! Router, shared state and the standalone server loop.
//!
//! Managed hosting mounts [`router`] directly; `ytmp3 serve` goes through
//! [`serve`], which binds the configured address.

use std::sync::Arc;
use std::time::Instant;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use ytmp3core::{Config, ExtractionEngine, ScratchDir, YtDlpEngine};

use crate::handlers;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn ExtractionEngine>,
    pub scratch: ScratchDir,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(engine: Arc<dyn ExtractionEngine>, scratch: ScratchDir) -> Self {
        Self {
            engine,
            scratch,
            started_at: Instant::now(),
        }
    }

    /// State backed by yt-dlp, as configured.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(YtDlpEngine::from_config(config)),
            ScratchDir::new(&config.scratch_dir),
        )
    }
}

/// Build the application router.
///
/// - POST /api/download - Video URL to MP3 attachment
/// - GET  /health       - Health check
/// - GET  /metrics      - Prometheus metrics
pub fn router(state: AppState) -> Router {
    // Browsers only let the frontend read Content-Disposition if it is exposed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION]);

    Router::new()
        .route("/api/download", post(handlers::download_audio))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(cors)
        .with_state(state)
}

/// Run the standalone server until Ctrl+C / SIGTERM.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let addr = config.bind_addr;
    let app = router(AppState::from_config(config));

    log::info!("Starting ytmp3 server on http://{}", addr);
    log::info!("  POST /api/download - Download audio as MP3");
    log::info!("  GET  /health       - Health check");
    log::info!("  GET  /metrics      - Prometheus metrics");

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received Ctrl+C, shutting down"),
        _ = terminate => log::info!("Received SIGTERM, shutting down"),
    }
}
