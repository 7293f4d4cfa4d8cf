// Prompt templates for the analysis pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Classification prompt. Replace `{instruction}` and `{cv_text}` before sending.
pub const CV_CHECK_PROMPT_TEMPLATE: &str = "Determine if this is a CV/resume. {instruction}:

{cv_text}";

/// Feedback prompt. Replace `{instruction}` and `{cv_text}` before sending.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Analyze this CV and provide detailed feedback in JSON format. {instruction}

CV Content:
{cv_text}

Analyze the CV and return a JSON object that strictly matches this structure (extra fields not allowed):

{
  "summary": {
    "score": "one of: Outstanding/Good/Average/Needs Work",
    "keyStrengths": ["strength1", "strength2", ...]
  },
  "detailedReview": {
    "sectionName": {
      "title": "section title",
      "strengths": ["strength1", "strength2", ...],
      "improvements": ["improvement1", "improvement2", ...]
    },
    "atsOptimization": {
      "title": "ATS Optimization",
      "strengths": ["strength1", ...],
      "improvements": ["improvement1", ...],
      "keywordScore": "score as a string, e.g. 7/10",
      "missingKeywords": ["keyword1", "keyword2", ...]
    }
  },
  "priorityActions": [
    {
      "id": 1,
      "title": "action title",
      "example": {
        "before": "example before",
        "after": "example after"
      }
    },
    {
      "id": 2,
      "title": "action title",
      "bullets": ["bullet1", "bullet2", ...]
    }
  ]
}

Rules:
- Only the "atsOptimization" section may contain "keywordScore" and "missingKeywords".
- Every priority action has either an "example" or a non-empty "bullets" list, never both.
- Priority action ids are unique integers starting at 1."#;
