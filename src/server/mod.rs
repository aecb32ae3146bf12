pub mod error;
pub mod handlers;
pub mod models;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::inference::{TesseractRecognizer, TextRecognizer};
use crate::paper::QuestionCount;
use crate::utils::config::AppConfig;
use crate::utils::error::ConfigError;

/// Shared, read-only state for request handlers.
pub struct AppState {
    pub recognizer: Arc<dyn TextRecognizer>,
    pub max_file_size: u64,
    pub default_question_count: QuestionCount,
    pub export_title: String,
}

impl AppState {
    /// Builds state from configuration using the tesseract recognizer.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::new(Arc::new(TesseractRecognizer::from_config(config)), config)
    }

    /// Builds state with an explicit recognizer.
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        config: &AppConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            recognizer,
            max_file_size: config.max_file_size,
            default_question_count: config.default_question_count()?,
            export_title: config.export_title.to_string(),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = models::max_base64_length(state.max_file_size) + 64 * 1024;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/analyze", post(handlers::analyze_document))
        .route("/api/v1/export", post(handlers::export_paper))
        .with_state(Arc::new(state))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server(
    addr: SocketAddr,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting server on {}", addr);

    let app = create_app(AppState::from_config(config)?);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API endpoint: http://{}/api/v1/analyze", addr);
    tracing::info!("Export endpoint: http://{}/api/v1/export", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
