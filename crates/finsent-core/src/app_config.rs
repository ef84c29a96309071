use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub newsapi_key: Option<String>,
    pub newsapi_base_url: String,
    pub newsapi_domains: Vec<String>,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub companies_path: PathBuf,
    pub base_lexicon_path: PathBuf,
    pub base_lexicon_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub max_concurrent_companies: usize,
    pub default_lookback_days: i64,
    pub page_size: u32,
    pub max_pages: u32,
}

impl AppConfig {
    /// Directory holding the per-company raw CSV files.
    #[must_use]
    pub fn news_dir(&self) -> PathBuf {
        self.data_dir.join("newsdata")
    }

    /// Directory holding the cleaned and scored datasets.
    #[must_use]
    pub fn cleaned_dir(&self) -> PathBuf {
        self.data_dir.join("cleaned_data")
    }

    /// File storing the timestamp of the last completed collection run.
    #[must_use]
    pub fn last_run_path(&self) -> PathBuf {
        self.data_dir.join("last_run.txt")
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "newsapi_key",
                &self.newsapi_key.as_ref().map(|_| "[redacted]"),
            )
            .field("newsapi_base_url", &self.newsapi_base_url)
            .field("newsapi_domains", &self.newsapi_domains)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("companies_path", &self.companies_path)
            .field("base_lexicon_path", &self.base_lexicon_path)
            .field("base_lexicon_url", &self.base_lexicon_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("max_concurrent_companies", &self.max_concurrent_companies)
            .field("default_lookback_days", &self.default_lookback_days)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}
