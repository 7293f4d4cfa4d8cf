use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::envelope::ResponseEnvelope;
use crate::llm_client::LlmError;

/// Coarse classification of analysis failures, used for status codes and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No file, unreadable upload, wrong type, oversize.
    ClientInput,
    /// Extracted text is empty or is not a CV.
    Content,
    /// The model replied with something that is not a valid Feedback document.
    UpstreamParse,
    /// Extraction or a model call failed outright.
    UpstreamCall,
}

/// Every way a single analysis request can fail.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AnalysisError>`;
/// the response is always a failure envelope.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("{message}")]
    InvalidUpload { status: StatusCode, message: String },

    #[error("No text content found in file")]
    EmptyContent,

    #[error("Uploaded document does not appear to be a CV/resume")]
    NotACv,

    /// `raw` is the model output exactly as received.
    #[error("Failed to parse AI response")]
    MalformedResponse { raw: String, reason: String },

    #[error("{0:#}")]
    Extraction(anyhow::Error),

    #[error("{0}")]
    Llm(#[from] LlmError),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::MissingFile | AnalysisError::InvalidUpload { .. } => {
                ErrorKind::ClientInput
            }
            AnalysisError::EmptyContent | AnalysisError::NotACv => ErrorKind::Content,
            AnalysisError::MalformedResponse { .. } => ErrorKind::UpstreamParse,
            AnalysisError::Extraction(_) | AnalysisError::Llm(_) => ErrorKind::UpstreamCall,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::InvalidUpload { status, .. } => *status,
            _ => match self.kind() {
                ErrorKind::ClientInput | ErrorKind::Content => StatusCode::BAD_REQUEST,
                ErrorKind::UpstreamParse | ErrorKind::UpstreamCall => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Raw model output, kept for diagnostics when parsing failed.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AnalysisError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<MultipartRejection> for AnalysisError {
    fn from(rejection: MultipartRejection) -> Self {
        AnalysisError::InvalidUpload {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for AnalysisError {
    fn from(err: MultipartError) -> Self {
        AnalysisError::InvalidUpload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        match &self {
            AnalysisError::MalformedResponse { raw, reason } => {
                tracing::error!("Failed to parse AI response ({reason}): {raw}");
            }
            AnalysisError::Extraction(e) => tracing::error!("Extraction error: {e:?}"),
            AnalysisError::Llm(e) => tracing::error!("LLM error: {e}"),
            other => tracing::info!("Rejected upload: {other}"),
        }

        (self.status_code(), Json(ResponseEnvelope::failure(&self))).into_response()
    }
}
