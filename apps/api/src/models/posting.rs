use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the apply link for a posting was obtained.
///
/// Every posting carries a navigable URL: either a usable provider link or a
/// synthesized web-search fallback. Malformed provider links never survive
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum ApplyLink {
    /// Well-formed link supplied by the provider.
    Direct(String),
    /// Synthesized search-engine URL; the provider gave no usable link.
    Fallback(String),
}

impl ApplyLink {
    pub fn url(&self) -> &str {
        match self {
            ApplyLink::Direct(url) | ApplyLink::Fallback(url) => url,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ApplyLink::Fallback(_))
    }
}

/// A job posting normalized from a provider record.
///
/// Defaults for missing fields are substituted once, at the job-source
/// boundary; downstream code can rely on every field being populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: Option<String>,
    pub apply_link: ApplyLink,
    pub posted_at: Option<DateTime<Utc>>,
}

/// A posting plus its relevance score. Computed once per ranking pass,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPosting {
    pub posting: JobPosting,
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_link_url_for_both_variants() {
        let direct = ApplyLink::Direct("https://jobs.example.com/1".to_string());
        let fallback = ApplyLink::Fallback("https://www.google.com/search?q=x".to_string());
        assert_eq!(direct.url(), "https://jobs.example.com/1");
        assert_eq!(fallback.url(), "https://www.google.com/search?q=x");
        assert!(!direct.is_fallback());
        assert!(fallback.is_fallback());
    }

    #[test]
    fn test_apply_link_serializes_with_kind_tag() {
        let link = ApplyLink::Fallback("https://www.google.com/search?q=x".to_string());
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["kind"], "fallback");
        assert_eq!(json["url"], "https://www.google.com/search?q=x");
    }
}
