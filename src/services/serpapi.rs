use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::{AppError, Result};
use crate::models::{NewsArticle, Region};
use crate::services::NewsSearchProvider;

/// Google News vertical
const NEWS_VERTICAL: &str = "nws";
/// Past two months
const TIME_WINDOW: &str = "qdr:m2";

/// Client for Google News results through SerpAPI
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    news_results: Option<Vec<SerpNewsResult>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpNewsResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

impl SerpApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn search_url(&self, query: &str, region: Region) -> String {
        format!(
            "{}/search.json?engine=google&q={}&tbm={}&gl={}&tbs={}&api_key={}",
            self.base_url,
            urlencoding::encode(query),
            NEWS_VERTICAL,
            region.code(),
            urlencoding::encode(TIME_WINDOW),
            urlencoding::encode(&self.api_key),
        )
    }
}

#[async_trait]
impl NewsSearchProvider for SerpApiClient {
    async fn search_news(&self, query: &str, region: Region) -> Result<Vec<NewsArticle>> {
        if query.trim().is_empty() {
            return Err(AppError::BadRequest("Search query cannot be empty".into()));
        }

        info!(query = %query, region = %region.code(), "Searching news");

        let response = self
            .client
            .get(self.search_url(query, region))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch news results");
                AppError::Upstream(format!("News search request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read news response");
            AppError::Upstream(format!("Failed to read news response: {}", e))
        })?;

        let articles = news_results_for_status(status, &body)?;
        info!(count = articles.len(), "News search completed");

        Ok(articles)
    }
}

/// Interpret a SerpAPI reply. On a non-success status the body's own error
/// message is kept when it has one.
pub fn news_results_for_status(status: StatusCode, body: &str) -> Result<Vec<NewsArticle>> {
    let parsed = parse_news_response(body);
    if status.is_success() {
        return parsed;
    }

    warn!(status = %status, "News search returned non-success status");
    match parsed {
        Err(AppError::Upstream(msg)) => Err(AppError::Upstream(msg)),
        _ => Err(AppError::Upstream(format!(
            "News search failed with status: {}",
            status
        ))),
    }
}

/// Parse a SerpAPI response body into articles, in provider order.
///
/// Results without a title or link are skipped. A "no results" error yields an empty list.
pub fn parse_news_response(body: &str) -> Result<Vec<NewsArticle>> {
    let response: SerpResponse = serde_json::from_str(body)
        .map_err(|e| AppError::MalformedResponse(format!("Invalid news search JSON: {}", e)))?;

    if let Some(message) = response.error {
        if response.news_results.is_none() {
            if message.contains("hasn't returned any results") {
                return Ok(Vec::new());
            }
            return Err(AppError::Upstream(format!("News search error: {}", message)));
        }
    }

    let mut articles = Vec::new();
    for result in response.news_results.unwrap_or_default() {
        match (result.title, result.link) {
            (Some(title), Some(link)) if !title.trim().is_empty() && !link.trim().is_empty() => {
                articles.push(NewsArticle::new(title.trim(), link.trim(), result.snippet));
            }
            _ => warn!("Skipping news result without title or link"),
        }
    }

    Ok(articles)
}
