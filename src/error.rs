use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("No trending topics available for {0}")]
    NoTrendingTopics(String),

    #[error("No news articles found to summarize")]
    NoArticles,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Upstream(_) | AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::NoTrendingTopics(_) | AppError::NoArticles => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Message safe to show to the user. Upstream and internal details only go to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                "A news or summary provider could not be reached".to_string()
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("Malformed upstream response: {}", msg);
                "A news or summary provider returned an unexpected response".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::BadRequest(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::NoTrendingTopics(_) | AppError::NoArticles => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.public_message();

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
