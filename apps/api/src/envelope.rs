//! Response Formatter: packages an analysis outcome into the uniform envelope.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;
use crate::models::document::FileInfo;
use crate::models::feedback::Feedback;

/// The JSON body of every `/analyze` response. Built once, never mutated after sending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_info: Option<FileInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ResponseEnvelope {
    pub fn success(file_info: FileInfo, feedback: Feedback) -> Self {
        Self {
            success: true,
            error: None,
            file_info: Some(file_info),
            feedback: Some(feedback),
            raw_response: None,
        }
    }

    pub fn failure(err: &AnalysisError) -> Self {
        Self::failure_message(err.to_string(), err.raw_response().map(str::to_owned))
    }

    pub fn failure_message(error: impl Into<String>, raw_response: Option<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            file_info: None,
            feedback: None,
            raw_response,
        }
    }
}

/// Maps a pipeline outcome to its status code and envelope. No side effects.
pub fn format_outcome(
    outcome: Result<(FileInfo, Feedback), AnalysisError>,
) -> (StatusCode, ResponseEnvelope) {
    match outcome {
        Ok((file_info, feedback)) => (StatusCode::OK, ResponseEnvelope::success(file_info, feedback)),
        Err(err) => (err.status_code(), ResponseEnvelope::failure(&err)),
    }
}
