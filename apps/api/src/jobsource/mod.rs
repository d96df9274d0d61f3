//! Job Source Client — the single point of entry for outbound job-listing
//! API calls.
//!
//! ARCHITECTURAL RULE: no other module talks to a job-search provider
//! directly. Provider records are normalized into `JobPosting` here, exactly
//! once; downstream code never sees provider field names.
//!
//! Sources are infallible by contract: an upstream failure (non-success
//! status, timeout, missing credential, decode error) is logged and mapped to
//! an empty list. The pipeline above this boundary has no provider error
//! handling at all.

pub mod jsearch;
pub mod serpapi;

use async_trait::async_trait;
use tracing::info;

use crate::models::posting::{ApplyLink, JobPosting};

/// Upstream request timeout. The job fetch is the pipeline's only blocking
/// call, so it is bounded to keep a request pass from hanging.
pub const FETCH_TIMEOUT_SECS: u64 = 12;

// Defaults substituted for missing provider fields.
pub const DEFAULT_TITLE: &str = "No Title";
pub const DEFAULT_COMPANY: &str = "Unknown";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// A provider of job postings.
///
/// Carried in `AppState` as `Arc<dyn JobSource>` so handlers and the
/// pipeline stay provider-agnostic.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(&self, query: &str, location: &str) -> Vec<JobPosting>;
}

/// Maps a user-facing location name to the ISO country code providers expect.
pub fn country_code(location: &str) -> &'static str {
    match location {
        "India" => "in",
        "United States" => "us",
        "United Kingdom" => "gb",
        "Canada" => "ca",
        "Remote" => "us",
        _ => "us",
    }
}

/// Bounds a free-text query to its first five whitespace tokens; longer
/// queries degrade provider results.
pub fn clamp_query(query: &str) -> String {
    query
        .split_whitespace()
        .take(5)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves the apply link for a posting: the first well-formed provider
/// link wins, otherwise a search-engine URL is synthesized from title and
/// company so the posting always renders with a navigable link.
pub fn resolve_apply_link<'a, I>(candidates: I, title: &str, company: &str) -> ApplyLink
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    for candidate in candidates {
        if let Some(url) = usable_link(candidate) {
            return ApplyLink::Direct(url.to_string());
        }
    }
    ApplyLink::Fallback(format!(
        "https://www.google.com/search?q={}+{}+job",
        title.replace(' ', "+"),
        company.replace(' ', "+"),
    ))
}

/// Accepts only absolute http(s) URLs as direct apply links.
fn usable_link(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|link| link.starts_with("http://") || link.starts_with("https://"))
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Primary source plus an optional secondary consulted only when the primary
/// returns nothing. At most one request per source per pass; no concurrent
/// fan-out.
pub struct ChainedJobSource {
    primary: Box<dyn JobSource>,
    secondary: Option<Box<dyn JobSource>>,
}

impl ChainedJobSource {
    pub fn new(primary: Box<dyn JobSource>, secondary: Option<Box<dyn JobSource>>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl JobSource for ChainedJobSource {
    async fn search(&self, query: &str, location: &str) -> Vec<JobPosting> {
        let postings = self.primary.search(query, location).await;
        if !postings.is_empty() {
            return postings;
        }
        match &self.secondary {
            Some(secondary) => {
                info!("Primary job source returned nothing, trying secondary");
                secondary.search(query, location).await
            }
            None => postings,
        }
    }
}
