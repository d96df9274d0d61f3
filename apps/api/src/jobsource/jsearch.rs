//! RapidAPI JSearch client — the primary job source.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use super::{
    clamp_query, country_code, non_empty, resolve_apply_link, JobSource, DEFAULT_COMPANY,
    DEFAULT_DESCRIPTION, DEFAULT_TITLE, FETCH_TIMEOUT_SECS,
};
use crate::models::posting::JobPosting;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Raw provider records. Field names are JSearch's; they do not leak past
// this module.
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<RawJob>,
}

#[derive(Debug, Default, Deserialize)]
struct RawJob {
    job_title: Option<String>,
    employer_name: Option<String>,
    job_description: Option<String>,
    job_city: Option<String>,
    job_country: Option<String>,
    job_apply_link: Option<String>,
    job_google_link: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
}

pub struct JSearchClient {
    client: Client,
    host: String,
    api_key: Option<String>,
    /// Upper bound of the page rotation, >= 1. A bound of 1 disables
    /// variation.
    page_bound: u32,
    page_cursor: AtomicU32,
}

impl JSearchClient {
    pub fn new(api_key: Option<String>, host: String, page_bound: u32) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            host,
            api_key,
            page_bound: page_bound.max(1),
            page_cursor: AtomicU32::new(0),
        }
    }

    /// Cycles result pages 1..=page_bound so repeated searches vary.
    /// A freshness heuristic, not a retry mechanism.
    fn next_page(&self) -> u32 {
        1 + self.page_cursor.fetch_add(1, Ordering::Relaxed) % self.page_bound
    }

    async fn fetch(
        &self,
        query: &str,
        location: &str,
        api_key: &str,
    ) -> Result<Vec<RawJob>, FetchError> {
        let page = self.next_page();
        let url = format!("https://{}/search", self.host);

        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.host)
            .query(&[
                ("query", format!("{query} in {location}")),
                ("page", page.to_string()),
                ("num_pages", "1".to_string()),
                ("country", country_code(location).to_string()),
                ("language", "en".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        info!(
            "Fetched {} jobs (page {page}) for '{query}' in {location}",
            parsed.data.len()
        );
        Ok(parsed.data)
    }
}

#[async_trait]
impl JobSource for JSearchClient {
    async fn search(&self, query: &str, location: &str) -> Vec<JobPosting> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("No RAPIDAPI_KEY configured; returning no jobs");
            return Vec::new();
        };
        let query = clamp_query(query);

        match self.fetch(&query, location, api_key).await {
            Ok(raw) => raw.into_iter().map(normalize).collect(),
            Err(e) => {
                error!("Job fetch failed: {e}");
                Vec::new()
            }
        }
    }
}

/// Folds a raw provider record into the normalized posting shape.
fn normalize(raw: RawJob) -> JobPosting {
    let title = non_empty(raw.job_title).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let company = non_empty(raw.employer_name).unwrap_or_else(|| DEFAULT_COMPANY.to_string());
    let description =
        non_empty(raw.job_description).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    let location = match (non_empty(raw.job_city), non_empty(raw.job_country)) {
        (Some(city), Some(country)) => Some(format!("{city}, {country}")),
        (Some(city), None) => Some(city),
        (None, Some(country)) => Some(country),
        (None, None) => None,
    };

    let apply_link = resolve_apply_link(
        [raw.job_apply_link.as_deref(), raw.job_google_link.as_deref()],
        &title,
        &company,
    );

    let posted_at = raw
        .job_posted_at_datetime_utc
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    JobPosting {
        title,
        company,
        description,
        location,
        apply_link,
        posted_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::posting::ApplyLink;

    #[test]
    fn test_normalize_substitutes_defaults() {
        let posting = normalize(RawJob::default());
        assert_eq!(posting.title, "No Title");
        assert_eq!(posting.company, "Unknown");
        assert_eq!(posting.description, "No description available.");
        assert_eq!(posting.location, None);
        assert!(posting.apply_link.is_fallback());
        assert_eq!(posting.posted_at, None);
    }

    #[test]
    fn test_normalize_prefers_provider_apply_link() {
        let raw = RawJob {
            job_title: Some("Python Engineer".to_string()),
            job_apply_link: Some("https://jobs.example.com/42".to_string()),
            job_google_link: Some("https://google.example.com/42".to_string()),
            ..RawJob::default()
        };
        assert_eq!(
            normalize(raw).apply_link,
            ApplyLink::Direct("https://jobs.example.com/42".to_string())
        );
    }

    #[test]
    fn test_normalize_synthesizes_fallback_from_title_and_company() {
        let raw = RawJob {
            job_title: Some("Python Engineer".to_string()),
            employer_name: Some("Acme Corp".to_string()),
            ..RawJob::default()
        };
        assert_eq!(
            normalize(raw).apply_link,
            ApplyLink::Fallback(
                "https://www.google.com/search?q=Python+Engineer+Acme+Corp+job".to_string()
            )
        );
    }

    #[test]
    fn test_normalize_joins_city_and_country() {
        let raw = RawJob {
            job_city: Some("Pune".to_string()),
            job_country: Some("IN".to_string()),
            ..RawJob::default()
        };
        assert_eq!(normalize(raw).location.as_deref(), Some("Pune, IN"));
    }

    #[test]
    fn test_normalize_parses_rfc3339_posted_at() {
        let raw = RawJob {
            job_posted_at_datetime_utc: Some("2026-07-01T08:30:00.000Z".to_string()),
            ..RawJob::default()
        };
        assert!(normalize(raw).posted_at.is_some());

        let raw = RawJob {
            job_posted_at_datetime_utc: Some("last Tuesday".to_string()),
            ..RawJob::default()
        };
        assert_eq!(normalize(raw).posted_at, None);
    }

    #[test]
    fn test_page_rotation_cycles_within_bound() {
        let client = JSearchClient::new(None, "jsearch.p.rapidapi.com".to_string(), 3);
        let pages: Vec<u32> = (0..6).map(|_| client.next_page()).collect();
        assert_eq!(pages, vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_page_bound_of_zero_is_clamped() {
        let client = JSearchClient::new(None, "jsearch.p.rapidapi.com".to_string(), 0);
        assert_eq!(client.next_page(), 1);
        assert_eq!(client.next_page(), 1);
    }

    #[tokio::test]
    async fn test_search_without_credential_returns_empty() {
        let client = JSearchClient::new(None, "jsearch.p.rapidapi.com".to_string(), 3);
        assert!(client.search("python", "Remote").await.is_empty());
    }

    #[test]
    fn test_response_decodes_with_missing_data_field() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_response_decodes_provider_fields() {
        let body = r#"{"data": [{
            "job_title": "Backend Engineer",
            "employer_name": "Acme",
            "job_description": "Rust services",
            "job_city": "Berlin",
            "job_country": "DE",
            "job_apply_link": "https://jobs.example.com/7",
            "job_posted_at_datetime_utc": "2026-06-15T00:00:00.000Z",
            "job_id": "ignored-extra-field"
        }]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 1);
        let posting = normalize(parsed.data.into_iter().next().unwrap());
        assert_eq!(posting.title, "Backend Engineer");
        assert_eq!(posting.location.as_deref(), Some("Berlin, DE"));
        assert!(!posting.apply_link.is_fallback());
    }
}
