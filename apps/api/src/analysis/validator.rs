//! CV Validator: a cheap yes/no classification before the expensive generation call.

use tracing::debug;

use crate::analysis::prompts::CV_CHECK_PROMPT_TEMPLATE;
use crate::llm_client::prompts::BOOLEAN_ONLY_INSTRUCTION;
use crate::llm_client::{CompletionRequest, LlmError, TextGenerator};

pub const CV_CHECK_MAX_TOKENS: u32 = 10;
pub const CV_CHECK_TEMPERATURE: f32 = 0.0;

/// Asks the classification model whether `text` is a CV.
///
/// The full text is sent as-is. Fails closed: an empty or unrecognisable reply is `false`.
/// Transport and API errors are not swallowed.
pub async fn is_cv(text: &str, llm: &dyn TextGenerator, model: &str) -> Result<bool, LlmError> {
    let prompt = CV_CHECK_PROMPT_TEMPLATE
        .replace("{instruction}", BOOLEAN_ONLY_INSTRUCTION)
        .replace("{cv_text}", text);

    let reply = match llm
        .complete(CompletionRequest {
            model,
            prompt: &prompt,
            max_tokens: CV_CHECK_MAX_TOKENS,
            temperature: CV_CHECK_TEMPERATURE,
        })
        .await
    {
        Ok(reply) => reply,
        Err(LlmError::EmptyContent) => String::new(),
        Err(e) => return Err(e),
    };

    debug!("CV classification reply: {reply:?}");
    Ok(verdict_from_reply(&reply))
}

/// True iff the reply mentions "true", case-insensitively.
pub fn verdict_from_reply(reply: &str) -> bool {
    reply.to_lowercase().contains("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedGenerator;

    #[test]
    fn test_verdict_accepts_any_casing() {
        assert!(verdict_from_reply("true"));
        assert!(verdict_from_reply("TRUE"));
        assert!(verdict_from_reply(" True."));
    }

    #[test]
    fn test_verdict_fails_closed() {
        assert!(!verdict_from_reply("false"));
        assert!(!verdict_from_reply(""));
        assert!(!verdict_from_reply("I cannot tell"));
        assert!(!verdict_from_reply("yes"));
    }

    #[tokio::test]
    async fn test_request_is_deterministic_and_short() {
        let llm = ScriptedGenerator::replying(&["true"]);
        let cv_text = "Jane Doe\nSenior Engineer at Acme, 2019-2024";

        assert!(is_cv(cv_text, &llm, "classifier").await.unwrap());

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "classifier");
        assert_eq!(requests[0].max_tokens, 10);
        assert_eq!(requests[0].temperature, 0.0);
        assert!(requests[0].prompt.contains(r#"Reply only with "true" or "false""#));
        assert!(requests[0].prompt.ends_with(cv_text));
    }

    #[tokio::test]
    async fn test_empty_completion_is_not_a_cv() {
        let llm = ScriptedGenerator::new(vec![Err(LlmError::EmptyContent)]);
        assert!(!is_cv("Invoice #42", &llm, "classifier").await.unwrap());
    }

    #[tokio::test]
    async fn test_api_failure_propagates() {
        let llm = ScriptedGenerator::new(vec![Err(LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        })]);
        let err = is_cv("Jane Doe", &llm, "classifier").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 401, .. }));
    }
}
