//! PDF export routes

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
    routing::post,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::export::{
    render, ExportRecord, ExportRequest, FlashcardsExportRequest, QuizExportRequest,
    PDF_MEDIA_TYPE,
};
use crate::state::AppState;

/// Create the export router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export_flashcards_pdf", post(export_flashcards))
        .route("/export_quiz_pdf", post(export_quiz))
}

/// Download flashcards as PDF
async fn export_flashcards(Json(request): Json<FlashcardsExportRequest>) -> Result<Response> {
    export_pdf(request.into()).await
}

/// Download a quiz as PDF
async fn export_quiz(Json(request): Json<QuizExportRequest>) -> Result<Response> {
    export_pdf(request.into()).await
}

async fn export_pdf<R>(request: ExportRequest<R>) -> Result<Response>
where
    R: ExportRecord + Send + 'static,
{
    let (file_name, bytes) = tokio::task::spawn_blocking(move || {
        let document = render(&request);
        tracing::debug!(
            "Rendered {} with {} page(s)",
            document.file_name(),
            document.page_count()
        );
        document.to_pdf().map(|bytes| (document.file_name(), bytes))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Export task failed: {}", e)))??;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PDF_MEDIA_TYPE)
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))
}
