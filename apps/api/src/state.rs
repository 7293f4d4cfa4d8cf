use std::sync::Arc;

use crate::analysis::pipeline::AnalysisPipeline;
use crate::review::view::ReviewViews;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing here changes per request.
#[derive(Clone)]
pub struct AppState {
    /// Extract → validate → analyze, with the model client and PDF reader injected.
    pub pipeline: Arc<AnalysisPipeline>,
    pub views: Arc<ReviewViews>,
    pub max_body_bytes: usize,
}
