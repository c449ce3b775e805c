use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::services::{GoogleTrendsClient, GroqClient, SerpApiClient};
use crate::workflow::Workflow;

#[derive(Clone)]
pub struct AppState {
    pub workflow: Workflow,
}

impl AppState {
    pub fn new(workflow: Workflow) -> Self {
        Self { workflow }
    }

    /// Production state backed by the real provider clients
    pub fn from_config(config: &Config) -> Result<Self> {
        let trends = Arc::new(GoogleTrendsClient::new(config.trends_url.clone())?);
        let news = Arc::new(SerpApiClient::new(
            config.serp_url.clone(),
            config.serp_api_key.clone(),
        ));
        let summarizer = Arc::new(GroqClient::new(
            config.groq_url.clone(),
            config.groq_api_key.clone(),
            config.groq_model.clone(),
        ));

        Ok(Self::new(Workflow::new(trends, news, summarizer)))
    }
}
