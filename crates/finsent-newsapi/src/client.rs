//! HTTP client for NewsAPI.
//!
//! Wraps `reqwest` with key management, error-envelope handling, retries and
//! pagination. Use [`NewsApiClient::new`] for production or
//! [`NewsApiClient::with_base_url`] to point at a mock server in tests.

use std::time::Duration;

use finsent_core::Article;
use reqwest::{Client, StatusCode, Url};

use crate::error::NewsApiError;
use crate::retry::retry_with_backoff;
use crate::types::{EverythingPage, EverythingQuery, EverythingResponse, ErrorResponse};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/";

/// Client for the NewsAPI REST API.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl NewsApiClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, NewsApiError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Config`] if the key is blank or `base_url` is
    /// not a valid URL, and [`NewsApiError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NewsApiError> {
        if api_key.trim().is_empty() {
            return Err(NewsApiError::Config("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("finsent/0.1 (news-collector)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| NewsApiError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the retry policy (defaults: 3 retries, 1 s base delay).
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches one page (1-based) of `/v2/everything` results.
    ///
    /// # Errors
    ///
    /// - [`NewsApiError::RateLimited`] on HTTP 429.
    /// - [`NewsApiError::Server`] on HTTP 5xx after retries are exhausted.
    /// - [`NewsApiError::Api`] for any other error envelope.
    /// - [`NewsApiError::Http`] on network failure.
    /// - [`NewsApiError::Deserialize`] if the body does not match.
    pub async fn everything(
        &self,
        query: &EverythingQuery,
        page: u32,
    ) -> Result<EverythingPage, NewsApiError> {
        let url = self.build_url("v2/everything", &query.params(page))?;
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_text(&url)
        })
        .await?;

        let response: EverythingResponse =
            serde_json::from_str(&body).map_err(|e| NewsApiError::Deserialize {
                context: format!("everything(q={}, page={page})", query.q),
                source: e,
            })?;

        if response.status != "ok" {
            return Err(NewsApiError::Api {
                status: 200,
                code: "unexpectedStatus".to_string(),
                message: format!("status '{}'", response.status),
            });
        }

        Ok(EverythingPage {
            total_results: response.total_results,
            articles: response.articles.into_iter().map(Article::from).collect(),
        })
    }

    /// Fetches up to `max_pages` pages for `query`, stopping early once
    /// `totalResults` is reached or a page comes back short.
    ///
    /// # Errors
    ///
    /// Propagates the first page error; results from earlier pages are
    /// discarded in that case.
    pub async fn everything_paged(
        &self,
        query: &EverythingQuery,
        max_pages: u32,
    ) -> Result<Vec<Article>, NewsApiError> {
        let mut articles = Vec::new();
        for page in 1..=max_pages.max(1) {
            let result = self.everything(query, page).await?;
            let received = result.articles.len();
            articles.extend(result.articles);

            tracing::debug!(
                q = %query.q,
                page,
                received,
                total = result.total_results,
                "NewsAPI page fetched"
            );

            let page_size = usize::try_from(query.page_size).unwrap_or(usize::MAX);
            let total = usize::try_from(result.total_results).unwrap_or(usize::MAX);
            if received < page_size || articles.len() >= total {
                break;
            }
        }
        Ok(articles)
    }

    /// Builds the request URL with the API key and percent-encoded params.
    fn build_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, NewsApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| NewsApiError::Config(format!("invalid path '{path}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("apiKey", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request and returns the body, mapping non-2xx responses
    /// onto the error taxonomy.
    async fn request_text(&self, url: &Url) -> Result<String, NewsApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }
        Err(Self::classify_error(status, &body))
    }

    fn classify_error(status: StatusCode, body: &str) -> NewsApiError {
        let envelope: Option<ErrorResponse> = serde_json::from_str(body).ok();
        let message = envelope
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| body.chars().take(200).collect());

        if status == StatusCode::TOO_MANY_REQUESTS {
            return NewsApiError::RateLimited(message);
        }
        if status.is_server_error() {
            return NewsApiError::Server {
                status: status.as_u16(),
                message,
            };
        }
        NewsApiError::Api {
            status: status.as_u16(),
            code: envelope
                .and_then(|e| e.code)
                .unwrap_or_else(|| "unknown".to_string()),
            message,
        }
    }
}
