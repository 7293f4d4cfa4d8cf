//! Review page state machine.
//!
//! Idle → FileSelected → Loading → Success | Error, and any state → FileSelected
//! when a new file is picked. Each variant carries exactly the data it shows, so a
//! Loading page can never display stale feedback.

use thiserror::Error;

use crate::envelope::ResponseEnvelope;
use crate::models::document::{FileInfo, PDF_MIME_TYPE};
use crate::models::feedback::Feedback;

/// 5 MiB, inclusive.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

const FALLBACK_ERROR: &str = "Failed to analyze CV";

/// Metadata of the file the user picked, checked before any upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl From<&FileInfo> for SelectedFile {
    fn from(info: &FileInfo) -> Self {
        Self {
            name: info.name.clone(),
            mime_type: info.mime_type.clone(),
            size_bytes: info.size,
        }
    }
}

/// Why a file was refused before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocalRejection {
    #[error("Please upload a PDF file")]
    NotPdf,

    #[error("File size must be less than 5MB")]
    TooLarge,
}

/// Client-side constraints: PDF only, at most 5 MiB.
pub fn check_local_constraints(file: &SelectedFile) -> Result<(), LocalRejection> {
    if file.mime_type != PDF_MIME_TYPE {
        return Err(LocalRejection::NotPdf);
    }
    if file.size_bytes > MAX_FILE_BYTES {
        return Err(LocalRejection::TooLarge);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewState {
    Idle,
    FileSelected {
        file: SelectedFile,
    },
    Loading {
        file: SelectedFile,
    },
    Success {
        file: SelectedFile,
        feedback: Feedback,
    },
    /// `file` is the file the error relates to, if it got past local checks.
    Error {
        file: Option<SelectedFile>,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} while {state}")]
pub struct TransitionError {
    pub action: &'static str,
    pub state: &'static str,
}

impl ReviewState {
    pub fn name(&self) -> &'static str {
        match self {
            ReviewState::Idle => "idle",
            ReviewState::FileSelected { .. } => "selected",
            ReviewState::Loading { .. } => "loading",
            ReviewState::Success { .. } => "success",
            ReviewState::Error { .. } => "error",
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        match self {
            ReviewState::Idle => None,
            ReviewState::FileSelected { file }
            | ReviewState::Loading { file }
            | ReviewState::Success { file, .. } => Some(file),
            ReviewState::Error { file, .. } => file.as_ref(),
        }
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        match self {
            ReviewState::Success { feedback, .. } => Some(feedback),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ReviewState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Picks a new file from any state, dropping whatever was shown before.
    /// A file that breaks the local constraints goes straight to `Error`.
    pub fn select_file(self, file: SelectedFile) -> ReviewState {
        match check_local_constraints(&file) {
            Ok(()) => ReviewState::FileSelected { file },
            Err(rejection) => ReviewState::Error {
                file: None,
                message: rejection.to_string(),
            },
        }
    }

    /// Removes the file and any result. The page reaches this through the "×" link,
    /// which reloads `/` and so renders `Idle` directly.
    #[allow(dead_code)]
    pub fn clear(self) -> ReviewState {
        ReviewState::Idle
    }

    /// FileSelected → Loading.
    pub fn submit(self) -> Result<ReviewState, TransitionError> {
        match self {
            ReviewState::FileSelected { file } => Ok(ReviewState::Loading { file }),
            other => Err(other.refuse("submit")),
        }
    }

    /// Loading → Success | Error, from the server's envelope.
    pub fn resolve(self, envelope: ResponseEnvelope) -> Result<ReviewState, TransitionError> {
        let file = match self {
            ReviewState::Loading { file } => file,
            other => return Err(other.refuse("resolve")),
        };

        Ok(match (envelope.success, envelope.feedback) {
            (true, Some(feedback)) => ReviewState::Success { file, feedback },
            (_, _) => ReviewState::Error {
                file: Some(file),
                message: envelope.error.unwrap_or_else(|| FALLBACK_ERROR.to_string()),
            },
        })
    }

    /// Loading → Error when the analysis never produced an envelope. The message is shown verbatim.
    pub fn fail(self, message: impl Into<String>) -> Result<ReviewState, TransitionError> {
        match self {
            ReviewState::Loading { file } => Ok(ReviewState::Error {
                file: Some(file),
                message: message.into(),
            }),
            other => Err(other.refuse("fail")),
        }
    }

    fn refuse(&self, action: &'static str) -> TransitionError {
        TransitionError {
            action,
            state: self.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SAMPLE_FEEDBACK_JSON;

    fn pdf(size_bytes: u64) -> SelectedFile {
        SelectedFile {
            name: "resume.pdf".to_string(),
            mime_type: PDF_MIME_TYPE.to_string(),
            size_bytes,
        }
    }

    fn feedback() -> Feedback {
        serde_json::from_str(SAMPLE_FEEDBACK_JSON).unwrap()
    }

    fn loading() -> ReviewState {
        ReviewState::Idle.select_file(pdf(1024)).submit().unwrap()
    }

    #[test]
    fn test_exactly_five_mib_is_accepted() {
        assert_eq!(check_local_constraints(&pdf(5 * 1024 * 1024)), Ok(()));
        let state = ReviewState::Idle.select_file(pdf(MAX_FILE_BYTES));
        assert_eq!(state.name(), "selected");
    }

    #[test]
    fn test_one_byte_over_is_rejected_locally() {
        let state = ReviewState::Idle.select_file(pdf(MAX_FILE_BYTES + 1));
        assert_eq!(state.error(), Some("File size must be less than 5MB"));
        assert!(state.file().is_none());
    }

    #[test]
    fn test_non_pdf_is_rejected_locally() {
        let file = SelectedFile {
            name: "resume.docx".to_string(),
            mime_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                .to_string(),
            size_bytes: 100,
        };
        assert_eq!(check_local_constraints(&file), Err(LocalRejection::NotPdf));
        let state = ReviewState::Idle.select_file(file);
        assert_eq!(state.error(), Some("Please upload a PDF file"));
    }

    #[test]
    fn test_happy_path_transitions() {
        let state = loading();
        assert_eq!(state.name(), "loading");
        assert!(state.feedback().is_none());

        let file_info = FileInfo {
            name: "resume.pdf".to_string(),
            mime_type: PDF_MIME_TYPE.to_string(),
            size: 1024,
        };
        let done = state
            .resolve(ResponseEnvelope::success(file_info, feedback()))
            .unwrap();
        assert_eq!(done.name(), "success");
        assert_eq!(done.feedback(), Some(&feedback()));
        assert_eq!(done.file(), Some(&pdf(1024)));
    }

    #[test]
    fn test_failure_envelope_shows_server_message_verbatim() {
        let envelope = ResponseEnvelope::failure_message(
            "Uploaded document does not appear to be a CV/resume",
            None,
        );
        let state = loading().resolve(envelope).unwrap();
        assert_eq!(
            state.error(),
            Some("Uploaded document does not appear to be a CV/resume")
        );
        assert!(state.feedback().is_none());
    }

    #[test]
    fn test_success_without_feedback_is_an_error() {
        let envelope = ResponseEnvelope {
            success: true,
            error: None,
            file_info: None,
            feedback: None,
            raw_response: None,
        };
        let state = loading().resolve(envelope).unwrap();
        assert_eq!(state.error(), Some("Failed to analyze CV"));
    }

    #[test]
    fn test_network_failure_keeps_message() {
        let state = loading().fail("connection reset by peer").unwrap();
        assert_eq!(state.error(), Some("connection reset by peer"));
    }

    #[test]
    fn test_selecting_a_new_file_discards_feedback() {
        let success = ReviewState::Success {
            file: pdf(10),
            feedback: feedback(),
        };
        let state = success.select_file(pdf(20));
        assert_eq!(state, ReviewState::FileSelected { file: pdf(20) });
        assert!(state.feedback().is_none());
    }

    #[test]
    fn test_clear_returns_to_idle() {
        assert_eq!(loading().clear(), ReviewState::Idle);
    }

    #[test]
    fn test_illegal_transitions_are_refused() {
        let err = ReviewState::Idle.submit().unwrap_err();
        assert_eq!(err.to_string(), "cannot submit while idle");

        let selected = ReviewState::Idle.select_file(pdf(1));
        assert!(selected
            .clone()
            .resolve(ResponseEnvelope::failure_message("x", None))
            .is_err());
        assert!(selected.fail("x").is_err());
    }
}
