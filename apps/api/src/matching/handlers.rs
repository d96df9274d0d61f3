//! Axum route handlers for the Match API — the presentation layer.

use axum::{
    extract::{multipart::Field, Multipart, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{DocumentFormat, ResumeDocument};
use crate::matching::session::{run_match, MatchSession, StageStatus};
use crate::models::posting::RankedPosting;
use crate::state::AppState;

/// Defensive cap on uploaded resume size.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Description length shown to the user before truncation.
const DESCRIPTION_PREVIEW_CHARS: usize = 250;

const NOTICE_NO_SKILLS: &str = "No skills found in resume.";
const NOTICE_NO_JOBS: &str = "No jobs found, try again later.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// One posting as shown to the user.
#[derive(Debug, Serialize)]
pub struct JobView {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: String,
    pub apply_link: String,
    /// "direct" for a provider link, "fallback" for a synthesized search URL.
    pub link_kind: &'static str,
    pub score: u32,
    pub posted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub skills: Vec<String>,
    pub jobs: Vec<JobView>,
    pub notice: Option<String>,
    /// Degraded pipeline stages, for transparency.
    pub stages: Vec<StageStatus>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub jobs: Vec<JobView>,
    pub notice: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Multipart fields: `resume` (PDF or DOCX file, required), `location` and
/// `role` (optional text). Runs the full pipeline and returns extracted
/// skills with ranked postings, truncated to the configured display limit.
pub async fn handle_match(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut resume: Option<ResumeDocument> = None;
    let mut location: Option<String> = None;
    let mut role_hint: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let format = DocumentFormat::infer(field.file_name(), field.content_type())
                    .ok_or_else(|| {
                        AppError::Validation("resume must be a .pdf or .docx file".to_string())
                    })?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                if bytes.len() > MAX_UPLOAD_BYTES {
                    return Err(AppError::UnprocessableEntity(format!(
                        "resume exceeds the {} MiB upload limit",
                        MAX_UPLOAD_BYTES / (1024 * 1024)
                    )));
                }
                resume = Some(ResumeDocument { bytes, format });
            }
            "location" => location = read_text_field(field).await?,
            "role" => role_hint = read_text_field(field).await?,
            _ => {}
        }
    }

    let resume =
        resume.ok_or_else(|| AppError::Validation("missing 'resume' file field".to_string()))?;

    let session = MatchSession {
        resume,
        location: location.unwrap_or_else(|| state.config.default_location.clone()),
        role_hint,
    };

    let outcome = run_match(
        &session,
        &state.vocabulary,
        state.jobs.as_ref(),
        state.ranker.as_ref(),
    )
    .await;

    let jobs = outcome
        .ranked
        .iter()
        .take(state.config.max_results)
        .map(job_view)
        .collect();

    Ok(Json(MatchResponse {
        skills: outcome.skills.iter().cloned().collect(),
        jobs,
        notice: notice_for(&outcome.stages),
        stages: outcome.stages,
    }))
}

/// GET /api/v1/jobs
///
/// Unranked browse: fetches and normalizes postings for a free-text query
/// without a resume.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let location = params
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| state.config.default_location.clone());

    let postings = state.jobs.search(query, &location).await;
    let notice = postings.is_empty().then(|| NOTICE_NO_JOBS.to_string());

    let jobs = postings
        .into_iter()
        .take(state.config.max_results)
        .map(|posting| job_view(&RankedPosting { posting, score: 0 }))
        .collect();

    Ok(Json(SearchResponse { jobs, notice }))
}

// ────────────────────────────────────────────────────────────────────────────
// Presentation helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_text_field(field: Field<'_>) -> Result<Option<String>, AppError> {
    let value = field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Unreadable field: {e}")))?;
    Ok(Some(value.trim().to_string()).filter(|v| !v.is_empty()))
}

fn job_view(ranked: &RankedPosting) -> JobView {
    let posting = &ranked.posting;
    JobView {
        title: posting.title.clone(),
        company: posting.company.clone(),
        location: posting.location.clone(),
        description: truncate_chars(&posting.description, DESCRIPTION_PREVIEW_CHARS),
        apply_link: posting.apply_link.url().to_string(),
        link_kind: if posting.apply_link.is_fallback() {
            "fallback"
        } else {
            "direct"
        },
        score: ranked.score,
        posted_at: posting.posted_at,
    }
}

/// Truncates on a char boundary and appends an ellipsis when text was cut.
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}…", cut.trim_end())
}

/// Maps stage outcomes to the single user-visible notice. An unreadable or
/// skill-less resume explains an empty/zero-scored result better than the
/// job fetch does, so it takes precedence.
fn notice_for(stages: &[StageStatus]) -> Option<String> {
    if stages.contains(&StageStatus::NoSkills) || stages.contains(&StageStatus::EmptyText) {
        Some(NOTICE_NO_SKILLS.to_string())
    } else if stages.contains(&StageStatus::NoJobs) {
        Some(NOTICE_NO_JOBS.to_string())
    } else {
        None
    }
}
