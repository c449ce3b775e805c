use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{capitalize, join_prompt_blocks, Digest, NewsArticle, Region};
use crate::services::{
    CompletionRequest, NewsSearchProvider, SummarizationProvider, TrendsProvider,
};

pub const MAX_TRENDING_TOPICS: usize = 10;
pub const MAX_ARTICLES: usize = 5;

pub const SUMMARY_INSTRUCTION: &str = "Summarize the given news articles in crisp bullet points.";
pub const SUMMARY_TEMPERATURE: f32 = 0.7;
pub const SUMMARY_MAX_TOKENS: u32 = 500;

/// News retrieval and summarization pipeline.
///
/// Each call is a one-shot chain of provider requests awaited in sequence.
/// Providers are injected so the pipeline holds no global state.
#[derive(Clone)]
pub struct Workflow {
    trends: Arc<dyn TrendsProvider>,
    news: Arc<dyn NewsSearchProvider>,
    summarizer: Arc<dyn SummarizationProvider>,
}

impl Workflow {
    pub fn new(
        trends: Arc<dyn TrendsProvider>,
        news: Arc<dyn NewsSearchProvider>,
        summarizer: Arc<dyn SummarizationProvider>,
    ) -> Self {
        Self {
            trends,
            news,
            summarizer,
        }
    }

    /// Top trending searches for the region, in provider order
    #[instrument(skip(self, region), fields(region = %region.code()))]
    pub async fn fetch_trending_topics(&self, region: Region) -> Result<Vec<String>> {
        let mut topics = self.trends.trending_searches(region).await?;
        topics.truncate(MAX_TRENDING_TOPICS);
        debug!(count = topics.len(), "Trending topics ready");
        Ok(topics)
    }

    /// Recent news for the topic, in provider order
    #[instrument(skip(self, region), fields(region = %region.code()))]
    pub async fn fetch_news(&self, topic: &str, region: Region) -> Result<Vec<NewsArticle>> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::BadRequest("Topic cannot be empty".into()));
        }

        let mut articles = self.news.search_news(topic, region).await?;
        articles.truncate(MAX_ARTICLES);
        Ok(articles)
    }

    /// One summarizer request over all articles. An empty list is rejected without a request.
    #[instrument(skip_all, fields(articles = articles.len()))]
    pub async fn summarize(&self, articles: &[NewsArticle]) -> Result<String> {
        if articles.is_empty() {
            return Err(AppError::NoArticles);
        }

        let request = CompletionRequest {
            system: SUMMARY_INSTRUCTION.to_string(),
            user: join_prompt_blocks(articles),
            temperature: SUMMARY_TEMPERATURE,
            max_tokens: SUMMARY_MAX_TOKENS,
        };

        self.summarizer.complete(request).await
    }

    /// Full pipeline. A blank topic is replaced by the region's top trending search.
    #[instrument(skip(self, region), fields(run_id = %Uuid::new_v4(), region = %region.code()))]
    pub async fn run(&self, topic: Option<&str>, region: Region) -> Result<Digest> {
        let explicit = topic.map(str::trim).filter(|t| !t.is_empty());

        let (topic, from_trending) = match explicit {
            Some(topic) => (topic.to_string(), false),
            None => {
                let trending = self.fetch_trending_topics(region).await?;
                let first = trending.into_iter().next().ok_or_else(|| {
                    warn!("No trending topics to pick from");
                    AppError::NoTrendingTopics(region.to_string())
                })?;
                info!(topic = %first, "Using top trending topic");
                (first, true)
            }
        };

        let articles = self.fetch_news(&topic, region).await?;
        if articles.is_empty() {
            warn!(topic = %topic, "No news articles found");
            return Err(AppError::NoArticles);
        }

        let summary = self.summarize(&articles).await?;
        info!(topic = %topic, articles = articles.len(), "Digest ready");

        Ok(Digest {
            heading: capitalize(&topic),
            topic,
            region: region.code().to_string(),
            from_trending,
            articles,
            summary,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{article, FakeNews, FakeSummarizer, FakeTrends};

    fn workflow(
        trends: &Arc<FakeTrends>,
        news: &Arc<FakeNews>,
        summarizer: &Arc<FakeSummarizer>,
    ) -> Workflow {
        Workflow::new(trends.clone(), news.clone(), summarizer.clone())
    }

    #[tokio::test]
    async fn test_trending_capped_at_ten_in_order() {
        let topics: Vec<String> = (0..15).map(|i| format!("topic {}", i)).collect();
        let trends = Arc::new(FakeTrends::new(topics.clone()));
        let wf = workflow(&trends, &Arc::new(FakeNews::default()), &Arc::new(FakeSummarizer::default()));

        let result = wf.fetch_trending_topics(Region::UnitedStates).await.unwrap();
        assert_eq!(result, topics[..10].to_vec());
        assert_eq!(trends.regions(), vec![Region::UnitedStates]);
    }

    #[tokio::test]
    async fn test_news_capped_at_five() {
        let articles: Vec<NewsArticle> = (0..8).map(|i| article(&format!("A{}", i))).collect();
        let news = Arc::new(FakeNews::new(articles.clone()));
        let wf = workflow(&Arc::new(FakeTrends::default()), &news, &Arc::new(FakeSummarizer::default()));

        let result = wf.fetch_news("rust", Region::India).await.unwrap();
        assert_eq!(result, articles[..5].to_vec());
        assert!(result.iter().all(|a| !a.snippet.is_empty()));
    }

    #[tokio::test]
    async fn test_fetch_news_rejects_blank_topic() {
        let news = Arc::new(FakeNews::default());
        let wf = workflow(&Arc::new(FakeTrends::default()), &news, &Arc::new(FakeSummarizer::default()));

        assert!(matches!(
            wf.fetch_news("  ", Region::India).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(news.queries().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_sends_single_request() {
        let summarizer = Arc::new(FakeSummarizer::new("- a\n- b"));
        let wf = workflow(&Arc::new(FakeTrends::default()), &Arc::new(FakeNews::default()), &summarizer);
        let articles = vec![article("A"), article("B")];

        let summary = wf.summarize(&articles).await.unwrap();

        assert_eq!(summary, "- a\n- b");
        let requests = summarizer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, SUMMARY_INSTRUCTION);
        assert_eq!(
            requests[0].user,
            format!("{}\n\n{}", articles[0].to_prompt_block(), articles[1].to_prompt_block())
        );
        assert_eq!(requests[0].temperature, SUMMARY_TEMPERATURE);
        assert_eq!(requests[0].max_tokens, SUMMARY_MAX_TOKENS);
    }

    #[tokio::test]
    async fn test_summarize_empty_skips_request() {
        let summarizer = Arc::new(FakeSummarizer::default());
        let wf = workflow(&Arc::new(FakeTrends::default()), &Arc::new(FakeNews::default()), &summarizer);

        assert!(matches!(wf.summarize(&[]).await, Err(AppError::NoArticles)));
        assert!(summarizer.requests().is_empty());
    }

    #[tokio::test]
    async fn test_run_blank_topic_uses_top_trending() {
        let trends = Arc::new(FakeTrends::new(vec!["super bowl".into(), "oscars".into()]));
        let news = Arc::new(FakeNews::new(vec![article("A"), article("B")]));
        let summarizer = Arc::new(FakeSummarizer::new("- summary"));
        let wf = workflow(&trends, &news, &summarizer);

        let digest = wf.run(Some("   "), Region::UnitedStates).await.unwrap();

        assert_eq!(trends.regions(), vec![Region::UnitedStates]);
        assert_eq!(news.queries(), vec![("super bowl".to_string(), Region::UnitedStates)]);
        assert_eq!(digest.topic, "super bowl");
        assert_eq!(digest.heading, "Super bowl");
        assert_eq!(digest.region, "US");
        assert!(digest.from_trending);
        assert_eq!(digest.summary, "- summary");
        assert_eq!(summarizer.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_run_explicit_topic_skips_trending() {
        let trends = Arc::new(FakeTrends::new(vec!["cricket".into()]));
        let news = Arc::new(FakeNews::new(vec![article("A")]));
        let summarizer = Arc::new(FakeSummarizer::new("- s"));
        let wf = workflow(&trends, &news, &summarizer);

        let digest = wf.run(Some("elections"), Region::India).await.unwrap();

        assert!(trends.regions().is_empty());
        assert_eq!(news.queries(), vec![("elections".to_string(), Region::India)]);
        assert_eq!(digest.heading, "Elections");
        assert!(!digest.from_trending);
    }

    #[tokio::test]
    async fn test_run_without_trending_topics() {
        let news = Arc::new(FakeNews::new(vec![article("A")]));
        let wf = workflow(&Arc::new(FakeTrends::default()), &news, &Arc::new(FakeSummarizer::default()));

        let err = wf.run(None, Region::Japan).await.unwrap_err();
        assert!(matches!(err, AppError::NoTrendingTopics(_)));
        assert!(news.queries().is_empty());
    }

    #[tokio::test]
    async fn test_run_without_articles_skips_summary() {
        let summarizer = Arc::new(FakeSummarizer::default());
        let wf = workflow(&Arc::new(FakeTrends::default()), &Arc::new(FakeNews::default()), &summarizer);

        let err = wf.run(Some("nothing"), Region::France).await.unwrap_err();
        assert!(matches!(err, AppError::NoArticles));
        assert!(summarizer.requests().is_empty());
    }

    #[tokio::test]
    async fn test_run_propagates_provider_error() {
        let news = Arc::new(FakeNews::failing("connection refused"));
        let summarizer = Arc::new(FakeSummarizer::default());
        let wf = workflow(&Arc::new(FakeTrends::default()), &news, &summarizer);

        let err = wf.run(Some("markets"), Region::Canada).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
        assert!(summarizer.requests().is_empty());
    }
}
