//! Test doubles and fixtures shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
};

use crate::analysis::extract::PdfReader;
use crate::analysis::pipeline::{AnalysisPipeline, ModelSettings};
use crate::llm_client::{CompletionRequest, LlmError, TextGenerator};
use crate::review::view::ReviewViews;
use crate::state::AppState;

/// A well-formed model reply: one ATS section, one plain section, one example
/// action and one bullet action.
pub const SAMPLE_FEEDBACK_JSON: &str = r#"{
  "summary": {
    "score": "Good",
    "keyStrengths": ["Clear project impact", "Strong Rust background"]
  },
  "detailedReview": {
    "atsOptimization": {
      "title": "ATS Optimization",
      "strengths": ["Standard section headings"],
      "improvements": ["Mirror the job description wording"],
      "keywordScore": "72%",
      "missingKeywords": ["Kubernetes", "Terraform"]
    },
    "formatting": {
      "title": "Formatting",
      "strengths": ["Consistent dates"],
      "improvements": ["Reduce to two pages"]
    }
  },
  "priorityActions": [
    {
      "id": 1,
      "title": "Quantify achievements",
      "example": {
        "before": "Improved API performance",
        "after": "Cut p99 latency by 40%"
      }
    },
    {
      "id": 2,
      "title": "Strengthen the header",
      "bullets": ["Add a GitHub link", "Drop the street address"]
    }
  ]
}"#;

/// Owned copy of a `CompletionRequest`.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// `TextGenerator` double that answers from a script and records every request.
/// Once the script runs out, every call fails with a 503 API error.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            model: request.model.to_string(),
            prompt: request.prompt.to_string(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Api {
                    status: 503,
                    message: "no scripted reply left".to_string(),
                })
            })
    }
}

/// `PdfReader` that returns fixed text regardless of input.
pub struct StaticPdfReader(String);

impl StaticPdfReader {
    pub fn new(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl PdfReader for StaticPdfReader {
    fn read_text(&self, _bytes: &[u8]) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// `PdfReader` that always fails as on a damaged file.
pub struct FailingPdfReader;

impl PdfReader for FailingPdfReader {
    fn read_text(&self, _bytes: &[u8]) -> Result<String> {
        Err(anyhow!("corrupt xref table"))
    }
}

pub fn pipeline_with(
    llm: Arc<ScriptedGenerator>,
    reader: impl PdfReader + 'static,
) -> AnalysisPipeline {
    AnalysisPipeline::new(
        llm,
        Arc::new(reader),
        ModelSettings {
            validation_model: "test-classifier".to_string(),
            feedback_model: "test-writer".to_string(),
        },
    )
}

pub fn test_state(llm: Arc<ScriptedGenerator>, reader: impl PdfReader + 'static) -> AppState {
    AppState {
        pipeline: Arc::new(pipeline_with(llm, reader)),
        views: Arc::new(ReviewViews::new().unwrap()),
        max_body_bytes: 10 * 1024 * 1024,
    }
}

/// Builds a `multipart/form-data` POST with a single file part.
pub fn multipart_request(
    uri: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    content: &[u8],
) -> Request<Body> {
    const BOUNDARY: &str = "cv-reviewer-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
