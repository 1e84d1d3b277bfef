use std::sync::Arc;

use crate::cache::ResultCache;
use crate::config::Config;
use crate::matching::scorer::ResumeScorer;
use crate::parsing::text::TextExtractor;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Memory or redis, picked once at startup by `cache::build_cache`.
    pub cache: Arc<dyn ResultCache>,
    pub resumes: Arc<ResumeStore>,
    /// Document → text boundary. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
    /// Pluggable match scorer. Default: `KeywordMatchScorer`.
    pub scorer: Arc<dyn ResumeScorer>,
}
