pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers::{self, MAX_UPLOAD_BYTES};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API: resume upload → skills → ranked postings
        .route("/api/v1/match", post(handlers::handle_match))
        // Unranked browse without a resume
        .route("/api/v1/jobs", get(handlers::handle_search))
        // Multipart bodies carry the resume; allow the cap plus form overhead
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .with_state(state)
}
