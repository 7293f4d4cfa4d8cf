//! Feedback Generator: asks the generation model for a structured review and
//! verifies the reply before trusting it.

use tracing::{error, info};

use crate::analysis::prompts::FEEDBACK_PROMPT_TEMPLATE;
use crate::errors::AnalysisError;
use crate::llm_client::prompts::RAW_JSON_INSTRUCTION;
use crate::llm_client::{CompletionRequest, LlmError, TextGenerator};
use crate::models::feedback::Feedback;

pub const FEEDBACK_MAX_TOKENS: u32 = 1000;
pub const FEEDBACK_TEMPERATURE: f32 = 0.2;

/// Generates feedback for text that has already passed CV validation.
pub async fn generate_feedback(
    cv_text: &str,
    llm: &dyn TextGenerator,
    model: &str,
) -> Result<Feedback, AnalysisError> {
    let prompt = FEEDBACK_PROMPT_TEMPLATE
        .replace("{instruction}", RAW_JSON_INSTRUCTION)
        .replace("{cv_text}", cv_text);

    let raw = match llm
        .complete(CompletionRequest {
            model,
            prompt: &prompt,
            max_tokens: FEEDBACK_MAX_TOKENS,
            temperature: FEEDBACK_TEMPERATURE,
        })
        .await
    {
        Ok(raw) => raw,
        // Nothing to parse; reported like any other unusable reply.
        Err(LlmError::EmptyContent) => String::new(),
        Err(e) => return Err(e.into()),
    };

    let feedback = parse_feedback(&raw)?;
    info!(
        "Feedback parsed: score={}, sections={}, actions={}",
        feedback.summary.score.label(),
        feedback.detailed_review.len(),
        feedback.priority_actions.len()
    );
    Ok(feedback)
}

/// Parses the model reply verbatim. No fence stripping or repair: syntax errors,
/// shape mismatches and semantic violations all yield `MalformedResponse` with the raw text.
pub fn parse_feedback(raw: &str) -> Result<Feedback, AnalysisError> {
    let malformed = |reason: String| {
        error!("JSON parse error: {reason}");
        AnalysisError::MalformedResponse {
            raw: raw.to_string(),
            reason,
        }
    };

    let feedback: Feedback = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
    feedback.validate().map_err(|e| malformed(e.to_string()))?;
    Ok(feedback)
}
