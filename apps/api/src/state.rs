use std::sync::Arc;

use crate::config::Config;
use crate::jobsource::JobSource;
use crate::matching::ranker::RelevanceRanker;
use crate::skills::SkillVocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Single entry point for outbound job-listing API calls.
    pub jobs: Arc<dyn JobSource>,
    /// Pluggable ranking policy. Default: KeywordOverlapRanker.
    pub ranker: Arc<dyn RelevanceRanker>,
    /// Fixed reference vocabulary used for skill extraction.
    pub vocabulary: Arc<SkillVocabulary>,
    pub config: Config,
}
