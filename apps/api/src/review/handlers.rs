//! Axum route handlers for the server-rendered review page.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::Html,
};
use tracing::{error, info};

use crate::analysis::handlers::analyze_document;
use crate::analysis::upload::read_upload;
use crate::envelope::format_outcome;
use crate::errors::AnalysisError;
use crate::review::state::{LocalRejection, ReviewState, SelectedFile};
use crate::review::view::ViewError;
use crate::state::AppState;

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, ViewError> {
    state.views.render(&ReviewState::Idle)
}

/// POST /review
///
/// Drives the page state machine for one upload: local checks first, so a rejected
/// file never reaches the pipeline; accepted files are analyzed and the final state rendered.
pub async fn handle_review_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, ViewError> {
    let upload = match multipart {
        Ok(mut multipart) => read_upload(&mut multipart).await,
        Err(rejection) => Err(AnalysisError::from(rejection)),
    };

    let document = match upload {
        Ok(Some(document)) => document,
        Ok(None) => return state.views.render(&error_state(AnalysisError::MissingFile)),
        Err(err) => return state.views.render(&error_state(err)),
    };

    let selected = ReviewState::Idle.select_file(SelectedFile::from(&document.file_info()));
    if let Some(message) = selected.error() {
        info!("Upload {} refused before analysis: {message}", document.name);
        return state.views.render(&selected);
    }

    let loading = selected.submit()?;
    let pipeline = state.pipeline.clone();
    let analysis =
        tokio::spawn(async move { analyze_document(&pipeline, &document).await }).await;

    let done = match analysis {
        Ok(outcome) => {
            let (_, envelope) = format_outcome(outcome);
            loading.resolve(envelope)?
        }
        Err(join_error) => {
            error!("Review analysis aborted: {join_error}");
            loading.fail(ANALYSIS_ABORTED)?
        }
    };
    state.views.render(&done)
}

const ANALYSIS_ABORTED: &str = "Failed to analyze CV";

/// A body over the transport cap is reported with the same rule the page enforces.
fn error_state(err: AnalysisError) -> ReviewState {
    let message = match err {
        AnalysisError::InvalidUpload { status, .. } if status == StatusCode::PAYLOAD_TOO_LARGE => {
            LocalRejection::TooLarge.to_string()
        }
        other => other.to_string(),
    };
    ReviewState::Error {
        file: None,
        message,
    }
}
