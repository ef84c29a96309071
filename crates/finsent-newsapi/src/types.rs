//! NewsAPI request and response types.

use chrono::NaiveDateTime;
use finsent_core::Article;
use serde::Deserialize;

/// Timestamp format NewsAPI accepts for `from` / `to`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parameters for one `/v2/everything` search.
#[derive(Debug, Clone)]
pub struct EverythingQuery {
    pub q: String,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub domains: Vec<String>,
    pub language: String,
    pub page_size: u32,
}

impl EverythingQuery {
    /// Query params for `page`, excluding the API key.
    #[must_use]
    pub fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.q.clone()),
            ("from", self.from.format(TIMESTAMP_FORMAT).to_string()),
            ("to", self.to.format(TIMESTAMP_FORMAT).to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("language", self.language.clone()),
            ("pageSize", self.page_size.to_string()),
            ("page", page.to_string()),
        ];
        if !self.domains.is_empty() {
            params.push(("domains", self.domains.join(",")));
        }
        params
    }
}

/// Successful `/v2/everything` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EverythingResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

/// Error envelope: `{"status":"error","code":"...","message":"..."}`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Article as returned by the API. Only the fields we keep are modelled.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Article {
            title: raw.title,
            description: raw.description,
            url: raw.url,
            published_at: raw.published_at,
            source: raw.source.and_then(|s| s.name),
        }
    }
}

/// One page of results.
#[derive(Debug, Clone)]
pub struct EverythingPage {
    pub total_results: u64,
    pub articles: Vec<Article>,
}
