use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{parse_region, Digest, NewsArticle, Region};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    regions: Vec<RegionOption>,
    topic: String,
    trending: Option<TrendingView>,
    digest: Option<DigestView>,
    error: Option<String>,
}

// View structs for templates
struct RegionOption {
    code: &'static str,
    label: String,
    selected: bool,
}

struct TrendingView {
    region: String,
    topics: Vec<String>,
}

struct DigestView {
    heading: String,
    region: String,
    from_trending: bool,
    summary_html: String,
    articles: Vec<NewsArticle>,
}

impl IndexTemplate {
    fn new(selected: Region, topic: String) -> Self {
        Self {
            regions: Region::ALL
                .into_iter()
                .map(|r| RegionOption {
                    code: r.code(),
                    label: r.label(),
                    selected: r == selected,
                })
                .collect(),
            topic,
            trending: None,
            digest: None,
            error: None,
        }
    }

    fn into_response_with(self, status: StatusCode) -> Response {
        match self.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => AppError::Internal(format!("Template error: {}", e)).into_response(),
        }
    }
}

impl From<Digest> for DigestView {
    fn from(digest: Digest) -> Self {
        Self {
            heading: digest.heading,
            region: digest.region,
            from_trending: digest.from_trending,
            summary_html: render_markdown(&digest.summary),
            articles: digest.articles,
        }
    }
}

// Form structs
#[derive(Deserialize)]
pub struct DashboardForm {
    region: Option<String>,
    #[serde(default)]
    topic: String,
}

impl DashboardForm {
    /// The parsed region plus a page already carrying the user's selections
    fn into_page(self) -> (Result<Region>, IndexTemplate) {
        let region = parse_region(self.region.as_deref());
        let selected = region.as_ref().copied().unwrap_or_default();
        (region, IndexTemplate::new(selected, self.topic))
    }
}

const ALLOWED_LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Destinations with a scheme outside the allow list become `#`. Relative links pass.
fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    let blocked = dest
        .split_once(':')
        .map(|(scheme, _)| scheme.trim())
        .filter(|scheme| !scheme.contains(['/', '?', '#']))
        .is_some_and(|scheme| {
            !ALLOWED_LINK_SCHEMES
                .iter()
                .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
        });

    if blocked {
        CowStr::Borrowed("#")
    } else {
        dest
    }
}

/// Markdown to HTML. Raw HTML in the input is emitted as escaped text and
/// link or image targets are limited to web and mail schemes.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

fn error_page(mut page: IndexTemplate, err: AppError) -> Response {
    let status = err.status_code();
    page.error = Some(err.public_message());
    page.into_response_with(status)
}

// Handlers
pub async fn index() -> Response {
    IndexTemplate::new(Region::default(), String::new()).into_response_with(StatusCode::OK)
}

pub async fn trending_submit(
    State(state): State<AppState>,
    Form(input): Form<DashboardForm>,
) -> Response {
    let (region, mut page) = input.into_page();
    let region = match region {
        Ok(r) => r,
        Err(e) => return error_page(page, e),
    };

    let result = state.workflow.fetch_trending_topics(region).await;
    match result {
        Ok(topics) => {
            page.trending = Some(TrendingView {
                region: region.label(),
                topics,
            });
            page.into_response_with(StatusCode::OK)
        }
        Err(e) => error_page(page, e),
    }
}

pub async fn summary_submit(
    State(state): State<AppState>,
    Form(input): Form<DashboardForm>,
) -> Response {
    let (region, mut page) = input.into_page();
    let region = match region {
        Ok(r) => r,
        Err(e) => return error_page(page, e),
    };

    let result = state.workflow.run(Some(page.topic.as_str()), region).await;
    match result {
        Ok(digest) => {
            page.digest = Some(digest.into());
            page.into_response_with(StatusCode::OK)
        }
        Err(e) => error_page(page, e),
    }
}
