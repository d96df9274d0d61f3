//! The match pipeline: one sequential pass per request.
//!
//! Session state is an explicit context object owned by the request — no
//! ambient globals. Stage failures are tagged outcomes on the result, not
//! exceptions: a bad document or an upstream outage degrades to an empty
//! value and the pass continues.

use serde::Serialize;
use tracing::warn;

use crate::extract::{extract_text, ResumeDocument};
use crate::jobsource::JobSource;
use crate::matching::ranker::RelevanceRanker;
use crate::models::posting::RankedPosting;
use crate::skills::{extract_skills, SkillSet, SkillVocabulary};

/// Query used when neither the resume nor the request yields anything to
/// search for.
const GENERIC_ROLE_QUERY: &str = "Software Engineer";

/// How many extracted skills feed the job-search query.
const QUERY_SKILL_COUNT: usize = 5;

/// Everything one matching pass needs. Built per request, discarded after.
#[derive(Debug)]
pub struct MatchSession {
    pub resume: ResumeDocument,
    pub location: String,
    pub role_hint: Option<String>,
}

/// Tagged per-stage outcome; the presentation layer maps these to
/// user-visible notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Text extraction produced nothing usable.
    EmptyText,
    /// Extraction worked but no vocabulary term matched.
    NoSkills,
    /// The job source returned no postings.
    NoJobs,
}

/// Result of one full pipeline pass.
#[derive(Debug)]
pub struct MatchOutcome {
    pub skills: SkillSet,
    pub ranked: Vec<RankedPosting>,
    pub stages: Vec<StageStatus>,
}

/// Runs extraction → skill detection → job fetch → ranking, sequentially.
/// Every stage degrades to an empty value rather than failing the pass.
pub async fn run_match(
    session: &MatchSession,
    vocabulary: &SkillVocabulary,
    jobs: &dyn JobSource,
    ranker: &dyn RelevanceRanker,
) -> MatchOutcome {
    let mut stages = Vec::new();

    let text = extract_text(&session.resume);
    if text.trim().is_empty() {
        warn!("Resume produced no text");
        stages.push(StageStatus::EmptyText);
    }

    let skills = extract_skills(&text, vocabulary);
    if skills.is_empty() {
        stages.push(StageStatus::NoSkills);
    }

    let query = build_query(session.role_hint.as_deref(), &skills);
    let postings = jobs.search(&query, &session.location).await;
    if postings.is_empty() {
        stages.push(StageStatus::NoJobs);
    }

    let ranked = ranker.rank(&skills, postings);

    MatchOutcome {
        skills,
        ranked,
        stages,
    }
}

/// Builds the job-search query: the caller's role hint when present,
/// otherwise a short phrase from the extracted skills.
fn build_query(role_hint: Option<&str>, skills: &SkillSet) -> String {
    if let Some(role) = role_hint.map(str::trim).filter(|r| !r.is_empty()) {
        return role.to_string();
    }
    if skills.is_empty() {
        return GENERIC_ROLE_QUERY.to_string();
    }
    skills
        .iter()
        .take(QUERY_SKILL_COUNT)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}
