//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::analysis::pipeline::AnalysisPipeline;
use crate::analysis::upload::require_upload;
use crate::envelope::ResponseEnvelope;
use crate::errors::AnalysisError;
use crate::models::document::{FileInfo, UploadedDocument};
use crate::models::feedback::Feedback;
use crate::state::AppState;

/// POST /analyze
///
/// Multipart upload with a single `file` part. Always answers with a `ResponseEnvelope`:
/// 200 on success, 400 for client/content problems, 500 for extraction or model failures.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResponseEnvelope>, AnalysisError> {
    let mut multipart = multipart?;
    let document = require_upload(&mut multipart).await?;
    let (file_info, feedback) = analyze_document(&state.pipeline, &document).await?;
    Ok(Json(ResponseEnvelope::success(file_info, feedback)))
}

/// Runs the pipeline for one document inside its own `analyze` span.
pub async fn analyze_document(
    pipeline: &AnalysisPipeline,
    document: &UploadedDocument,
) -> Result<(FileInfo, Feedback), AnalysisError> {
    let span = info_span!(
        "analyze",
        request_id = %Uuid::new_v4(),
        file = %document.name,
        size = document.size_bytes
    );
    let feedback = pipeline.run(document).instrument(span).await?;
    Ok((document.file_info(), feedback))
}
