use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_DOMAINS: &str =
    "cnbc.com,marketwatch.com,yahoo.com,reuters.com,seekingalpha.com,wsj.com";

const DEFAULT_BASE_LEXICON_URL: &str =
    "https://raw.githubusercontent.com/cjhutto/vaderSentiment/master/vaderSentiment/vader_lexicon.txt";

/// Longest look-back NewsAPI's `everything` endpoint serves on the
/// standard plan.
pub const MAX_LOOKBACK_DAYS: i64 = 30;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let newsapi_key = lookup("NEWSAPI_KEY").ok().filter(|k| !k.trim().is_empty());
    let newsapi_base_url = or_default("FINSENT_NEWSAPI_BASE_URL", "https://newsapi.org/");
    let newsapi_domains = parse_domains(&or_default("FINSENT_NEWSAPI_DOMAINS", DEFAULT_DOMAINS));
    let log_level = or_default("FINSENT_LOG_LEVEL", "info");

    let data_dir = PathBuf::from(or_default("FINSENT_DATA_DIR", "./data"));
    let companies_path = PathBuf::from(or_default(
        "FINSENT_COMPANIES_PATH",
        "./config/companies.yaml",
    ));
    let base_lexicon_path = lookup("FINSENT_BASE_LEXICON_PATH").map_or_else(
        |_| data_dir.join("lexicon").join("vader_lexicon.txt"),
        PathBuf::from,
    );
    let base_lexicon_url = or_default("FINSENT_BASE_LEXICON_URL", DEFAULT_BASE_LEXICON_URL);

    let request_timeout_secs = parse_as::<u64>(
        "FINSENT_REQUEST_TIMEOUT_SECS",
        &or_default("FINSENT_REQUEST_TIMEOUT_SECS", "30"),
    )?;
    let max_retries = parse_as::<u32>(
        "FINSENT_MAX_RETRIES",
        &or_default("FINSENT_MAX_RETRIES", "3"),
    )?;
    let retry_backoff_base_ms = parse_as::<u64>(
        "FINSENT_RETRY_BACKOFF_BASE_MS",
        &or_default("FINSENT_RETRY_BACKOFF_BASE_MS", "1000"),
    )?;
    let max_concurrent_companies = parse_as::<usize>(
        "FINSENT_MAX_CONCURRENT_COMPANIES",
        &or_default("FINSENT_MAX_CONCURRENT_COMPANIES", "1"),
    )?;
    let default_lookback_days = parse_as::<i64>(
        "FINSENT_DEFAULT_LOOKBACK_DAYS",
        &or_default("FINSENT_DEFAULT_LOOKBACK_DAYS", "7"),
    )?;
    if !(0..=MAX_LOOKBACK_DAYS).contains(&default_lookback_days) {
        return Err(ConfigError::InvalidEnvVar {
            var: "FINSENT_DEFAULT_LOOKBACK_DAYS".to_string(),
            reason: format!("{default_lookback_days} is outside 0..={MAX_LOOKBACK_DAYS}"),
        });
    }

    let page_size = parse_as::<u32>(
        "FINSENT_PAGE_SIZE",
        &or_default("FINSENT_PAGE_SIZE", "100"),
    )?;
    if !(1..=100).contains(&page_size) {
        return Err(ConfigError::InvalidEnvVar {
            var: "FINSENT_PAGE_SIZE".to_string(),
            reason: format!("{page_size} is outside 1..=100"),
        });
    }
    let max_pages = parse_as::<u32>("FINSENT_MAX_PAGES", &or_default("FINSENT_MAX_PAGES", "1"))?;

    Ok(AppConfig {
        newsapi_key,
        newsapi_base_url,
        newsapi_domains,
        log_level,
        data_dir,
        companies_path,
        base_lexicon_path,
        base_lexicon_url,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        max_concurrent_companies,
        default_lookback_days,
        page_size,
        max_pages,
    })
}

fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Split a comma-separated domain list, dropping blanks.
fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_lowercase)
        .collect()
}
