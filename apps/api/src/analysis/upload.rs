//! Intake: pulls the `file` part out of a multipart request.

use axum::extract::Multipart;

use crate::errors::AnalysisError;
use crate::models::document::UploadedDocument;

pub const FILE_FIELD: &str = "file";

/// Reads the first part named `file`. Other parts are skipped.
/// Returns `None` when the form has no such part.
pub async fn read_upload(
    multipart: &mut Multipart,
) -> Result<Option<UploadedDocument>, AnalysisError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let mime_type = field.content_type().unwrap_or_default().to_string();
        let raw_content = field.bytes().await?;
        return Ok(Some(UploadedDocument::new(name, mime_type, raw_content)));
    }

    Ok(None)
}

/// Like `read_upload`, but a missing file is an error.
pub async fn require_upload(multipart: &mut Multipart) -> Result<UploadedDocument, AnalysisError> {
    read_upload(multipart).await?.ok_or(AnalysisError::MissingFile)
}
