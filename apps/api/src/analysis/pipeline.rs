//! Analysis pipeline: extract → validate → analyze, strictly in sequence.
//!
//! Classification must finish (and say yes) before generation starts, so a non-CV
//! upload never costs a generation call. Nothing is retried.

use std::sync::Arc;

use tracing::info;

use crate::analysis::extract::{extract_text, PdfReader};
use crate::analysis::feedback::generate_feedback;
use crate::analysis::validator::is_cv;
use crate::errors::AnalysisError;
use crate::llm_client::TextGenerator;
use crate::models::document::UploadedDocument;
use crate::models::feedback::Feedback;

/// Which model serves each step.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub validation_model: String,
    pub feedback_model: String,
}

/// The request-scoped pipeline. Holds no per-request state, so one instance is shared.
pub struct AnalysisPipeline {
    generator: Arc<dyn TextGenerator>,
    pdf_reader: Arc<dyn PdfReader>,
    models: ModelSettings,
}

impl AnalysisPipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        pdf_reader: Arc<dyn PdfReader>,
        models: ModelSettings,
    ) -> Self {
        Self {
            generator,
            pdf_reader,
            models,
        }
    }

    /// Runs the full pipeline for one document.
    ///
    /// Steps:
    /// 1. extract_text() → plain text (EmptyContent if blank)
    /// 2. is_cv() → NotACv short-circuit
    /// 3. generate_feedback() → validated Feedback
    pub async fn run(&self, document: &UploadedDocument) -> Result<Feedback, AnalysisError> {
        // Step 1: Extract
        let text = extract_text(document, Arc::clone(&self.pdf_reader))
            .await
            .map_err(AnalysisError::Extraction)?;
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyContent);
        }
        info!("Extracted {} chars from {}", text.chars().count(), document.name);

        // Step 2: Validate
        let verdict = is_cv(&text, self.generator.as_ref(), &self.models.validation_model).await?;
        info!("CV classification: {verdict}");
        if !verdict {
            return Err(AnalysisError::NotACv);
        }

        // Step 3: Analyze
        generate_feedback(&text, self.generator.as_ref(), &self.models.feedback_model).await
    }
}
