use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NewsArticle;

/// Output of one summary run
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub topic: String,
    pub heading: String,
    pub region: String,
    /// True when the topic was picked from the trending list
    pub from_trending: bool,
    pub articles: Vec<NewsArticle>,
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

/// Request to produce a digest
#[derive(Debug, Deserialize)]
pub struct DigestRequest {
    pub region: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub topic: String,
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub region: String,
    pub topics: Vec<String>,
}

/// First character upper-cased, the rest lower-cased
pub fn capitalize(topic: &str) -> String {
    let mut chars = topic.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("elections"), "Elections");
        assert_eq!(capitalize("NBA finals"), "Nba finals");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }
}
