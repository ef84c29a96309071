//! `collect` command: fetch new articles per company into the raw store.
//!
//! Per-company failures are logged and skipped so one bad company does not
//! abort the run. The window boundary advances only if at least one company
//! was fetched successfully.

use chrono::Utc;
use finsent_core::{AppConfig, CompanyConfig};
use finsent_newsapi::{CollectionWindow, EverythingQuery, NewsApiClient};
use futures::stream::{self, StreamExt};

/// Result of fetching and storing one company's articles.
enum CompanyOutcome {
    Stored(usize),
    NoArticles,
    Failed(anyhow::Error),
}

/// Companies selected for this run.
///
/// # Errors
///
/// Returns an error if the companies file is invalid or `filter` matches
/// no configured company.
pub(crate) fn select_companies(
    config: &AppConfig,
    filter: Option<&str>,
) -> anyhow::Result<Vec<CompanyConfig>> {
    let file = finsent_core::load_companies(&config.companies_path)?;
    match filter {
        Some(name) => {
            let company = file
                .find(name)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("company '{name}' is not configured"))?;
            Ok(vec![company])
        }
        None => Ok(file.companies),
    }
}

fn build_query(config: &AppConfig, company: &CompanyConfig, window: CollectionWindow) -> EverythingQuery {
    EverythingQuery {
        q: company.query(),
        from: window.from,
        to: window.to,
        domains: config.newsapi_domains.clone(),
        language: "en".to_string(),
        page_size: config.page_size,
    }
}

async fn collect_company(
    client: &NewsApiClient,
    config: &AppConfig,
    company: &CompanyConfig,
    window: CollectionWindow,
) -> CompanyOutcome {
    let query = build_query(config, company, window);
    let articles = match client.everything_paged(&query, config.max_pages).await {
        Ok(articles) => articles,
        Err(e) => return CompanyOutcome::Failed(e.into()),
    };

    if articles.is_empty() {
        return CompanyOutcome::NoArticles;
    }

    match finsent_store::append_company_articles(&config.news_dir(), company, &articles) {
        Ok(_) => CompanyOutcome::Stored(articles.len()),
        Err(e) => CompanyOutcome::Failed(e.into()),
    }
}

/// Fetch articles for all (or one) configured companies.
///
/// Returns the number of articles stored.
///
/// # Errors
///
/// Returns an error if the API key is missing, the company filter matches
/// nothing, every company fails, or the last-run timestamp cannot be saved.
pub(crate) async fn run_collect(
    config: &AppConfig,
    company_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<usize> {
    let companies = select_companies(config, company_filter)?;
    if companies.is_empty() {
        println!("no companies configured; nothing to collect");
        return Ok(0);
    }

    let now = Utc::now().naive_utc();
    let last_run_path = config.last_run_path();
    let window = CollectionWindow::resolve(&last_run_path, now, config.default_lookback_days);

    if dry_run {
        let names: Vec<String> = companies
            .iter()
            .map(|c| format!("{} ({})", c.name, c.ticker))
            .collect();
        println!(
            "dry-run: would collect {} companies from {} to {}: [{}]",
            companies.len(),
            window.from,
            window.to,
            names.join(", ")
        );
        return Ok(0);
    }

    let api_key = config
        .newsapi_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("NEWSAPI_KEY is not set"))?;
    let client = NewsApiClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.newsapi_base_url,
    )?
    .with_retry(config.max_retries, config.retry_backoff_base_ms);

    tracing::info!(
        companies = companies.len(),
        from = %window.from,
        to = %window.to,
        "starting news collection"
    );

    let max_concurrent = config.max_concurrent_companies.max(1);
    let results: Vec<(&CompanyConfig, CompanyOutcome)> = stream::iter(&companies)
        .map(|c| {
            let fut = collect_company(&client, config, c, window);
            async move { (c, fut.await) }
        })
        .buffer_unordered(max_concurrent)
        .collect()
        .await;

    let mut stored = 0usize;
    let mut failed = 0usize;
    for (company, outcome) in &results {
        match outcome {
            CompanyOutcome::Stored(count) => {
                tracing::info!(company = %company.name, count, "new articles stored");
                stored += count;
            }
            CompanyOutcome::NoArticles => {
                tracing::info!(
                    company = %company.name,
                    ticker = %company.ticker,
                    "no new articles in window"
                );
            }
            CompanyOutcome::Failed(e) => {
                tracing::error!(company = %company.name, error = %e, "collection failed");
                failed += 1;
            }
        }
    }

    if failed == companies.len() {
        anyhow::bail!("all {failed} companies failed news collection");
    }
    if failed > 0 {
        tracing::warn!(
            failed,
            total = companies.len(),
            "some companies failed during collection"
        );
    }

    finsent_newsapi::save_last_run(&last_run_path, Utc::now().naive_utc())?;
    println!(
        "news collection complete: {} companies processed, {stored} articles stored",
        companies.len() - failed
    );
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;

    fn config_with_companies(path: PathBuf) -> AppConfig {
        AppConfig {
            newsapi_key: None,
            newsapi_base_url: "http://localhost".to_string(),
            newsapi_domains: vec!["reuters.com".to_string()],
            log_level: "info".to_string(),
            data_dir: PathBuf::from("/tmp/finsent-test"),
            companies_path: path,
            base_lexicon_path: PathBuf::from("/tmp/finsent-test/vader.txt"),
            base_lexicon_url: "http://localhost/vader.txt".to_string(),
            request_timeout_secs: 5,
            max_retries: 0,
            retry_backoff_base_ms: 0,
            max_concurrent_companies: 2,
            default_lookback_days: 7,
            page_size: 50,
            max_pages: 1,
        }
    }

    fn companies_file() -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "companies:\n  - name: Tesla\n    ticker: TSLA\n  - name: Pfizer\n    ticker: PFE\n",
        )
        .unwrap();
        file
    }

    #[test]
    fn select_companies_without_filter_returns_all() {
        let file = companies_file();
        let config = config_with_companies(file.path().to_path_buf());
        assert_eq!(select_companies(&config, None).unwrap().len(), 2);
    }

    #[test]
    fn select_companies_filters_by_ticker() {
        let file = companies_file();
        let config = config_with_companies(file.path().to_path_buf());
        let selected = select_companies(&config, Some("pfe")).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Pfizer");
    }

    #[test]
    fn select_companies_unknown_filter_is_error() {
        let file = companies_file();
        let config = config_with_companies(file.path().to_path_buf());
        assert!(select_companies(&config, Some("AAPL")).is_err());
    }

    #[test]
    fn build_query_uses_config_and_window() {
        let file = companies_file();
        let config = config_with_companies(file.path().to_path_buf());
        let day = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let window = CollectionWindow {
            from: day.and_hms_opt(0, 0, 0).unwrap(),
            to: day.and_hms_opt(6, 0, 0).unwrap(),
        };
        let company = CompanyConfig {
            name: "Tesla".to_string(),
            ticker: "TSLA".to_string(),
        };
        let query = build_query(&config, &company, window);
        assert_eq!(query.q, "Tesla OR TSLA");
        assert_eq!(query.from, window.from);
        assert_eq!(query.page_size, 50);
        assert_eq!(query.domains, vec!["reuters.com"]);
    }
}
