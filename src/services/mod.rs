pub mod groq;
pub mod serpapi;
pub mod trends;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewsArticle, Region};

pub use groq::GroqClient;
pub use serpapi::SerpApiClient;
pub use trends::GoogleTrendsClient;

/// Source of currently trending search terms
#[async_trait]
pub trait TrendsProvider: Send + Sync {
    /// Trending searches for the region, most popular first
    async fn trending_searches(&self, region: Region) -> Result<Vec<String>>;
}

/// Source of recent news results for a query
#[async_trait]
pub trait NewsSearchProvider: Send + Sync {
    async fn search_news(&self, query: &str, region: Region) -> Result<Vec<NewsArticle>>;
}

/// A single chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Hosted LLM producing text completions
#[async_trait]
pub trait SummarizationProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
