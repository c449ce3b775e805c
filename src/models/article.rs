use serde::{Deserialize, Serialize};

/// Snippet used when the search provider sends none
pub const MISSING_SNIPPET: &str = "No summary available.";

/// A single news result from the search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl NewsArticle {
    pub fn new(title: impl Into<String>, link: impl Into<String>, snippet: Option<String>) -> Self {
        let snippet = snippet
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| MISSING_SNIPPET.to_string());

        Self {
            title: title.into(),
            link: link.into(),
            snippet,
        }
    }

    /// Markdown block fed to the summarizer
    pub fn to_prompt_block(&self) -> String {
        format!(
            "**{}**\n📌 {}\n🔗 [Read more]({})\n",
            self.title, self.snippet, self.link
        )
    }
}

/// Join article blocks with a blank line between them
pub fn join_prompt_blocks(articles: &[NewsArticle]) -> String {
    articles
        .iter()
        .map(NewsArticle::to_prompt_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}
