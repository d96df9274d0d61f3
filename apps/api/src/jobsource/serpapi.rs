//! SerpAPI Google Jobs client — optional secondary source, consulted only
//! when the primary returns nothing.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use super::{
    clamp_query, non_empty, resolve_apply_link, JobSource, DEFAULT_COMPANY, DEFAULT_DESCRIPTION,
    DEFAULT_TITLE, FETCH_TIMEOUT_SECS,
};
use crate::models::posting::JobPosting;

const SERPAPI_URL: &str = "https://serpapi.com/search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    jobs_results: Vec<RawJob>,
}

#[derive(Debug, Default, Deserialize)]
struct RawJob {
    title: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    description: Option<String>,
    share_link: Option<String>,
    #[serde(default)]
    apply_options: Vec<ApplyOption>,
}

#[derive(Debug, Deserialize)]
struct ApplyOption {
    link: Option<String>,
}

pub struct SerpApiClient {
    client: Client,
    api_key: String,
}

impl SerpApiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn fetch(&self, query: &str, location: &str) -> Result<Vec<RawJob>, reqwest::Error> {
        let response = self
            .client
            .get(SERPAPI_URL)
            .query(&[
                ("engine", "google_jobs"),
                ("q", query),
                ("location", location),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let parsed: SearchResponse = response.json().await?;
        info!(
            "Fetched {} jobs from secondary source for '{query}' in {location}",
            parsed.jobs_results.len()
        );
        Ok(parsed.jobs_results)
    }
}

#[async_trait]
impl JobSource for SerpApiClient {
    async fn search(&self, query: &str, location: &str) -> Vec<JobPosting> {
        let query = clamp_query(query);
        match self.fetch(&query, location).await {
            Ok(raw) => raw.into_iter().map(normalize).collect(),
            Err(e) => {
                error!("Secondary job fetch failed: {e}");
                Vec::new()
            }
        }
    }
}

fn normalize(raw: RawJob) -> JobPosting {
    let title = non_empty(raw.title).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let company = non_empty(raw.company_name).unwrap_or_else(|| DEFAULT_COMPANY.to_string());
    let description =
        non_empty(raw.description).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
    let location = non_empty(raw.location);

    let first_option = raw.apply_options.first().and_then(|o| o.link.as_deref());
    let apply_link = resolve_apply_link(
        [first_option, raw.share_link.as_deref()],
        &title,
        &company,
    );

    JobPosting {
        title,
        company,
        description,
        location,
        apply_link,
        // Google Jobs reports relative dates ("3 days ago"); not worth parsing
        posted_at: None,
    }
}
