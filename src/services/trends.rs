use async_trait::async_trait;
use reqwest::Client;
use rss::Channel;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::models::Region;
use crate::services::TrendsProvider;

/// Google Trends rejects requests without a browser-like agent
const USER_AGENT: &str = "Mozilla/5.0 (compatible; SmartNews/0.1)";

/// Client for the Google Trends "trending now" RSS feed
#[derive(Clone)]
pub struct GoogleTrendsClient {
    client: Client,
    base_url: String,
}

impl GoogleTrendsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to create trends HTTP client");
                AppError::Internal(format!("Failed to create trends HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn feed_url(&self, region: Region) -> String {
        format!("{}/trending/rss?geo={}", self.base_url, region.code())
    }
}

#[async_trait]
impl TrendsProvider for GoogleTrendsClient {
    async fn trending_searches(&self, region: Region) -> Result<Vec<String>> {
        let url = self.feed_url(region);
        debug!(url = %url, "Fetching trending searches");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = %e, "Failed to fetch trending searches");
            AppError::Upstream(format!("Trends request failed: {}", e))
        })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Trends feed returned non-success status");
            return Err(AppError::Upstream(format!(
                "Trends feed failed with status: {}",
                response.status()
            )));
        }

        let content = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read trends feed");
            AppError::Upstream(format!("Failed to read trends feed: {}", e))
        })?;

        let topics = parse_trending_feed(&content)?;
        info!(region = %region.code(), count = topics.len(), "Trending searches fetched");

        Ok(topics)
    }
}

/// Item titles of a trends RSS feed, in feed order
pub fn parse_trending_feed(content: &[u8]) -> Result<Vec<String>> {
    let channel = Channel::read_from(content)
        .map_err(|e| AppError::MalformedResponse(format!("Failed to parse trends feed: {}", e)))?;

    Ok(channel
        .items()
        .iter()
        .filter_map(|item| item.title())
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect())
}
