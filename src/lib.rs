pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod workflow;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::api::health))
        .route("/regions", get(handlers::api::list_regions))
        .route("/trending", get(handlers::api::trending))
        .route("/news", get(handlers::api::news))
        .route("/summary", post(handlers::api::summary));

    let web_routes = Router::new()
        .route("/", get(handlers::web::index))
        .route("/trending", post(handlers::web::trending_submit))
        .route("/summary", post(handlers::web::summary_submit));

    Router::new()
        .nest("/api", api_routes)
        .merge(web_routes)
        .nest_service("/static", ServeDir::new("src/static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub mod test_utils {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::error::{AppError, Result};
    use crate::models::{NewsArticle, Region};
    use crate::services::{
        CompletionRequest, NewsSearchProvider, SummarizationProvider, TrendsProvider,
    };
    use crate::state::AppState;
    use crate::workflow::Workflow;

    pub fn article(title: &str) -> NewsArticle {
        NewsArticle::new(
            title,
            format!("https://news.example.com/{}", title.to_lowercase().replace(' ', "-")),
            Some(format!("Snippet about {}", title)),
        )
    }

    /// Trends provider returning a fixed list and recording requested regions
    #[derive(Default)]
    pub struct FakeTrends {
        topics: Vec<String>,
        regions: Mutex<Vec<Region>>,
    }

    impl FakeTrends {
        pub fn new(topics: Vec<String>) -> Self {
            Self {
                topics,
                regions: Mutex::new(Vec::new()),
            }
        }

        pub fn regions(&self) -> Vec<Region> {
            self.regions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TrendsProvider for FakeTrends {
        async fn trending_searches(&self, region: Region) -> Result<Vec<String>> {
            self.regions.lock().unwrap().push(region);
            Ok(self.topics.clone())
        }
    }

    /// News provider returning fixed articles (or a fixed failure) and recording queries
    #[derive(Default)]
    pub struct FakeNews {
        articles: Vec<NewsArticle>,
        failure: Option<String>,
        queries: Mutex<Vec<(String, Region)>>,
    }

    impl FakeNews {
        pub fn new(articles: Vec<NewsArticle>) -> Self {
            Self {
                articles,
                ..Default::default()
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                failure: Some(message.to_string()),
                ..Default::default()
            }
        }

        pub fn queries(&self) -> Vec<(String, Region)> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NewsSearchProvider for FakeNews {
        async fn search_news(&self, query: &str, region: Region) -> Result<Vec<NewsArticle>> {
            self.queries
                .lock()
                .unwrap()
                .push((query.to_string(), region));
            match &self.failure {
                Some(message) => Err(AppError::Upstream(message.clone())),
                None => Ok(self.articles.clone()),
            }
        }
    }

    /// Summarizer answering with a fixed reply and recording requests
    pub struct FakeSummarizer {
        reply: String,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl Default for FakeSummarizer {
        fn default() -> Self {
            Self::new("- Summary point")
        }
    }

    impl FakeSummarizer {
        pub fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SummarizationProvider for FakeSummarizer {
        async fn complete(&self, request: CompletionRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request);
            Ok(self.reply.clone())
        }
    }

    /// Fakes wired into an [`AppState`], returned alongside it for inspection
    pub struct TestProviders {
        pub trends: Arc<FakeTrends>,
        pub news: Arc<FakeNews>,
        pub summarizer: Arc<FakeSummarizer>,
    }

    pub fn create_test_state(
        trends: FakeTrends,
        news: FakeNews,
        summarizer: FakeSummarizer,
    ) -> (AppState, TestProviders) {
        let providers = TestProviders {
            trends: Arc::new(trends),
            news: Arc::new(news),
            summarizer: Arc::new(summarizer),
        };
        let workflow = Workflow::new(
            providers.trends.clone(),
            providers.news.clone(),
            providers.summarizer.clone(),
        );
        (AppState::new(workflow), providers)
    }
}
