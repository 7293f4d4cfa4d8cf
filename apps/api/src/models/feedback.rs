//! Feedback: the structured review the generation model must return.
//!
//! Decoding is strict: unknown fields are rejected, every priority action must carry
//! exactly one of `example` / `bullets`, and `Feedback::validate` closes the remaining
//! gaps serde cannot express. Anything that fails is treated as a malformed model reply.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only detailed-review section allowed to carry keyword data.
pub const ATS_SECTION_KEY: &str = "atsOptimization";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Feedback {
    pub summary: Summary,
    /// Keyed by section id, e.g. "atsOptimization". Rendered in key order.
    pub detailed_review: BTreeMap<String, ReviewSection>,
    pub priority_actions: Vec<PriorityAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Summary {
    pub score: Score,
    pub key_strengths: Vec<String>,
}

/// Overall assessment band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Score {
    Outstanding,
    Good,
    Average,
    #[serde(rename = "Needs Work")]
    NeedsWork,
}

impl Score {
    pub fn label(self) -> &'static str {
        match self {
            Score::Outstanding => "Outstanding",
            Score::Good => "Good",
            Score::Average => "Average",
            Score::NeedsWork => "Needs Work",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReviewSection {
    pub title: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_keywords: Option<Vec<String>>,
}

impl ReviewSection {
    fn carries_keywords(&self) -> bool {
        self.keyword_score.is_some() || self.missing_keywords.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeforeAfter {
    pub before: String,
    pub after: String,
}

/// What a priority action shows: a rewrite example or a checklist, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionDetail {
    Example(BeforeAfter),
    Bullets(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PriorityActionWire", into = "PriorityActionWire")]
pub struct PriorityAction {
    pub id: u32,
    pub title: String,
    pub detail: ActionDetail,
}

/// JSON shape of a priority action: `example` and `bullets` are both optional on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PriorityActionWire {
    id: u32,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    example: Option<BeforeAfter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bullets: Option<Vec<String>>,
}

impl TryFrom<PriorityActionWire> for PriorityAction {
    type Error = FeedbackSchemaError;

    fn try_from(wire: PriorityActionWire) -> Result<Self, Self::Error> {
        // An empty bullet list counts as absent.
        let bullets = wire.bullets.filter(|b| !b.is_empty());
        let detail = match (wire.example, bullets) {
            (Some(_), Some(_)) => {
                return Err(FeedbackSchemaError::ExampleAndBullets { id: wire.id })
            }
            (Some(example), None) => ActionDetail::Example(example),
            (None, Some(bullets)) => ActionDetail::Bullets(bullets),
            (None, None) => return Err(FeedbackSchemaError::MissingActionDetail { id: wire.id }),
        };
        Ok(PriorityAction {
            id: wire.id,
            title: wire.title,
            detail,
        })
    }
}

impl From<PriorityAction> for PriorityActionWire {
    fn from(action: PriorityAction) -> Self {
        let (example, bullets) = match action.detail {
            ActionDetail::Example(example) => (Some(example), None),
            ActionDetail::Bullets(bullets) => (None, Some(bullets)),
        };
        PriorityActionWire {
            id: action.id,
            title: action.title,
            example,
            bullets,
        }
    }
}

/// Structural violations serde alone cannot catch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackSchemaError {
    #[error("priority action {id} has both an example and bullets")]
    ExampleAndBullets { id: u32 },

    #[error("priority action {id} has neither an example nor bullets")]
    MissingActionDetail { id: u32 },

    #[error("priority action {id} has an empty bullet list")]
    EmptyBullets { id: u32 },

    #[error("priority action id {id} appears more than once")]
    DuplicateActionId { id: u32 },

    #[error("{context} has a blank title")]
    BlankTitle { context: String },

    #[error("section '{section}' carries keyword data; only 'atsOptimization' may")]
    KeywordsOutsideAts { section: String },
}

impl Feedback {
    /// Semantic checks run after a successful decode.
    pub fn validate(&self) -> Result<(), FeedbackSchemaError> {
        for (key, section) in &self.detailed_review {
            if section.title.trim().is_empty() {
                return Err(FeedbackSchemaError::BlankTitle {
                    context: format!("section '{key}'"),
                });
            }
            if key != ATS_SECTION_KEY && section.carries_keywords() {
                return Err(FeedbackSchemaError::KeywordsOutsideAts {
                    section: key.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for action in &self.priority_actions {
            if !seen.insert(action.id) {
                return Err(FeedbackSchemaError::DuplicateActionId { id: action.id });
            }
            if action.title.trim().is_empty() {
                return Err(FeedbackSchemaError::BlankTitle {
                    context: format!("priority action {}", action.id),
                });
            }
            // Empty bullets encode as `"bullets": []`, which decodes as no detail at all.
            if matches!(&action.detail, ActionDetail::Bullets(b) if b.is_empty()) {
                return Err(FeedbackSchemaError::EmptyBullets { id: action.id });
            }
        }

        Ok(())
    }
}
