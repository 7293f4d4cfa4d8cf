//! HTML rendering of the review page. Templates are compiled into the binary and
//! auto-escaped, so model output can never inject markup.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment};
use serde::Serialize;
use thiserror::Error;

use crate::models::feedback::{ActionDetail, Feedback, ATS_SECTION_KEY};
use crate::review::state::{ReviewState, SelectedFile};

const PAGE_TEMPLATE: &str = "page.html";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Transition(#[from] crate::review::state::TransitionError),
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        tracing::error!("Review page error: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal server error occurred",
        )
            .into_response()
    }
}

/// Compiled page templates.
pub struct ReviewViews {
    env: Environment<'static>,
}

impl ReviewViews {
    pub fn new() -> Result<Self, ViewError> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE, include_str!("../../templates/page.html"))?;
        env.add_template("feedback.html", include_str!("../../templates/feedback.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, state: &ReviewState) -> Result<Html<String>, ViewError> {
        let page = PageView::from_state(state);
        let html = self
            .env
            .get_template(PAGE_TEMPLATE)?
            .render(context! { page => page })?;
        Ok(Html(html))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// View models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PageView {
    state: &'static str,
    file: Option<FileCard>,
    error: Option<String>,
    feedback: Option<FeedbackView>,
}

#[derive(Debug, Serialize)]
struct FileCard {
    name: String,
    size_label: String,
}

#[derive(Debug, Serialize)]
struct FeedbackView {
    score: &'static str,
    key_strengths: Vec<String>,
    sections: Vec<SectionView>,
    actions: Vec<ActionView>,
}

#[derive(Debug, Serialize)]
struct SectionView {
    key: String,
    title: String,
    strengths: Vec<String>,
    improvements: Vec<String>,
    extras: Vec<ExtraRow>,
}

#[derive(Debug, Serialize)]
struct ExtraRow {
    label: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct ActionView {
    number: u32,
    title: String,
    before: Option<String>,
    after: Option<String>,
    bullets: Vec<String>,
}

impl PageView {
    fn from_state(state: &ReviewState) -> Self {
        Self {
            state: state.name(),
            file: state.file().map(FileCard::from),
            error: state.error().map(str::to_owned),
            feedback: state.feedback().map(FeedbackView::from),
        }
    }
}

impl From<&SelectedFile> for FileCard {
    fn from(file: &SelectedFile) -> Self {
        Self {
            name: file.name.clone(),
            size_label: size_label(file.size_bytes),
        }
    }
}

/// Size in MiB with two decimals, e.g. "1.50 MB".
fn size_label(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / 1024.0 / 1024.0)
}

impl From<&Feedback> for FeedbackView {
    fn from(feedback: &Feedback) -> Self {
        let sections = feedback
            .detailed_review
            .iter()
            .map(|(key, section)| {
                let mut extras = Vec::new();
                if key == ATS_SECTION_KEY {
                    if let Some(score) = &section.keyword_score {
                        extras.push(ExtraRow {
                            label: "Keyword Score",
                            value: score.clone(),
                        });
                    }
                    if let Some(missing) = &section.missing_keywords {
                        extras.push(ExtraRow {
                            label: "Missing Keywords",
                            value: missing.join(", "),
                        });
                    }
                }
                SectionView {
                    key: key.clone(),
                    title: section.title.clone(),
                    strengths: section.strengths.clone(),
                    improvements: section.improvements.clone(),
                    extras,
                }
            })
            .collect();

        let actions = feedback
            .priority_actions
            .iter()
            .map(|action| {
                let (before, after, bullets) = match &action.detail {
                    ActionDetail::Example(example) => (
                        Some(example.before.clone()),
                        Some(example.after.clone()),
                        Vec::new(),
                    ),
                    ActionDetail::Bullets(bullets) => (None, None, bullets.clone()),
                };
                ActionView {
                    number: action.id,
                    title: action.title.clone(),
                    before,
                    after,
                    bullets,
                }
            })
            .collect();

        Self {
            score: feedback.summary.score.label(),
            key_strengths: feedback.summary.key_strengths.clone(),
            sections,
            actions,
        }
    }
}
