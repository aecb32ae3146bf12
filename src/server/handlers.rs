use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
};

use super::error::AppError;
use super::models::{AnalyzeRequest, AnalyzeResponse, HealthResponse};
use super::AppState;
use crate::document::{AnalysisResult, Document};
use crate::paper::export::render_pdf;

/// Filename suggested for downloaded papers.
pub const EXPORT_FILENAME: &str = "assumed_paper.pdf";

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Extracts, classifies and samples an uploaded question paper.
pub async fn analyze_document(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    tracing::info!(
        "Received analysis request for filename: {}",
        request.filename
    );

    let result = run_analysis(&state, request).await?;

    tracing::info!("Document analysis completed successfully");

    Ok(Json(AnalyzeResponse::success(result)))
}

/// Runs the same analysis and returns the assumed paper as a PDF download.
pub async fn export_paper(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Response, AppError> {
    tracing::info!("Received export request for filename: {}", request.filename);

    let result = run_analysis(&state, request).await?;
    let report = result.paper.ok_or(AppError::EmptyDocument)?;
    let pdf = render_pdf(report.paper(), &state.export_title)?;

    tracing::info!(
        "Exported assumed paper with {} questions ({} bytes, seed {})",
        report.paper().len(),
        pdf.len(),
        report.seed
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        pdf,
    )
        .into_response())
}

async fn run_analysis(
    state: &Arc<AppState>,
    request: AnalyzeRequest,
) -> Result<AnalysisResult, AppError> {
    let document_bytes = request.validate_and_decode(state.max_file_size)?;
    let question_count = request.question_count(state.default_question_count)?;
    let seed = request.seed.unwrap_or_else(rand::random);
    let filename = request.sanitized_filename();
    let recognizer = Arc::clone(&state.recognizer);

    let result = tokio::task::spawn_blocking(move || {
        let mut document = Document::new(&document_bytes, &filename)?;
        tracing::info!("Document loaded with type: {:?}", document.doc_type());
        document.analyze(recognizer.as_ref(), question_count, seed)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(result)
}
