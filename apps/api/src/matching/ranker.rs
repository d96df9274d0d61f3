//! Relevance Ranker — orders postings by overlap with the extracted skills.
//!
//! Policy: keyword overlap. The score of a posting is the number of skills
//! whose normalized form occurs as a substring of the posting's normalized
//! title + description. Pure per-posting function, so ranking is independent
//! of input order; a stable descending sort keeps the provider's order among
//! ties.

use crate::models::posting::{JobPosting, RankedPosting};
use crate::skills::SkillSet;

/// Pluggable ranking policy. Carried in `AppState` as
/// `Arc<dyn RelevanceRanker>` so an alternative scorer can be swapped in
/// without touching handlers or the pipeline.
pub trait RelevanceRanker: Send + Sync {
    /// Scores and sorts the FULL input list; truncation to a display limit
    /// is the presentation layer's job.
    fn rank(&self, skills: &SkillSet, postings: Vec<JobPosting>) -> Vec<RankedPosting>;
}

/// Default keyword-overlap ranker.
pub struct KeywordOverlapRanker;

impl RelevanceRanker for KeywordOverlapRanker {
    fn rank(&self, skills: &SkillSet, postings: Vec<JobPosting>) -> Vec<RankedPosting> {
        let mut ranked: Vec<RankedPosting> = postings
            .into_iter()
            .map(|posting| {
                let score = overlap_score(skills, &posting);
                RankedPosting { posting, score }
            })
            .collect();

        // sort_by is stable: equal scores keep their original relative order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }
}

/// Score of one posting: a pure function of (skills, posting). An empty
/// skill set scores everything 0.
fn overlap_score(skills: &SkillSet, posting: &JobPosting) -> u32 {
    let text = format!("{} {}", posting.title, posting.description).to_lowercase();
    skills
        .iter()
        .filter(|skill| text.contains(skill.as_str()))
        .count() as u32
}
