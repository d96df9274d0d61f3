use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The job-source credential is deliberately optional: a missing key is a
/// per-request failure (empty results, logged) rather than a startup abort.
#[derive(Debug, Clone)]
pub struct Config {
    pub rapidapi_key: Option<String>,
    pub jsearch_host: String,
    pub serpapi_key: Option<String>,
    pub default_location: String,
    pub skill_vocab_path: Option<String>,
    pub max_results: usize,
    pub page_variation: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            rapidapi_key: optional_env("RAPIDAPI_KEY"),
            jsearch_host: std::env::var("JSEARCH_HOST")
                .unwrap_or_else(|_| "jsearch.p.rapidapi.com".to_string()),
            serpapi_key: optional_env("SERPAPI_API_KEY"),
            default_location: std::env::var("DEFAULT_LOCATION")
                .unwrap_or_else(|_| "Remote".to_string()),
            skill_vocab_path: optional_env("SKILL_VOCAB_PATH"),
            max_results: parse_env("MAX_RESULTS", 10)?,
            page_variation: parse_env("PAGE_VARIATION", 3)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' must be a valid number")),
        Err(_) => Ok(default),
    }
}
