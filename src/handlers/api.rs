use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::Result;
use crate::models::{
    parse_region, Digest, DigestRequest, NewsArticle, NewsQuery, Region, RegionResponse,
    TrendingQuery, TrendingResponse,
};
use crate::state::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_regions() -> Json<Vec<RegionResponse>> {
    Json(Region::ALL.into_iter().map(RegionResponse::from).collect())
}

pub async fn trending(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<Json<TrendingResponse>> {
    let region = parse_region(query.region.as_deref())?;
    let topics = state.workflow.fetch_trending_topics(region).await?;

    Ok(Json(TrendingResponse {
        region: region.code().to_string(),
        topics,
    }))
}

pub async fn news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<Vec<NewsArticle>>> {
    let region = parse_region(query.region.as_deref())?;
    let articles = state.workflow.fetch_news(&query.topic, region).await?;
    Ok(Json(articles))
}

pub async fn summary(
    State(state): State<AppState>,
    Json(input): Json<DigestRequest>,
) -> Result<Json<Digest>> {
    let region = parse_region(input.region.as_deref())?;
    let digest = state.workflow.run(input.topic.as_deref(), region).await?;
    Ok(Json(digest))
}
