mod config;
mod errors;
mod extract;
mod jobsource;
mod matching;
mod models;
mod routes;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::jobsource::jsearch::JSearchClient;
use crate::jobsource::serpapi::SerpApiClient;
use crate::jobsource::{ChainedJobSource, JobSource};
use crate::matching::ranker::KeywordOverlapRanker;
use crate::routes::build_router;
use crate::skills::SkillVocabulary;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (a missing API credential degrades at request
    // time; it does not stop startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch API v{}", env!("CARGO_PKG_VERSION"));

    if config.rapidapi_key.is_none() {
        warn!("RAPIDAPI_KEY is not set; job searches will return no results");
    }

    // Skill vocabulary: compiled-in unless a curated file is configured
    let vocabulary = match &config.skill_vocab_path {
        Some(path) => SkillVocabulary::from_file(path)?,
        None => SkillVocabulary::builtin(),
    };
    info!("Skill vocabulary loaded ({} terms)", vocabulary.len());

    // Job sources: JSearch primary, SerpAPI secondary when configured
    let primary = JSearchClient::new(
        config.rapidapi_key.clone(),
        config.jsearch_host.clone(),
        config.page_variation,
    );
    let secondary = config
        .serpapi_key
        .clone()
        .map(|key| Box::new(SerpApiClient::new(key)) as Box<dyn JobSource>);
    let jobs: Arc<dyn JobSource> = Arc::new(ChainedJobSource::new(Box::new(primary), secondary));
    info!("Job source client initialized (host: {})", config.jsearch_host);

    // Build app state (ranker is pluggable — KeywordOverlapRanker by default)
    let state = AppState {
        jobs,
        ranker: Arc::new(KeywordOverlapRanker),
        vocabulary: Arc::new(vocabulary),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
