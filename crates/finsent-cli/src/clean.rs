//! `clean` command: merge every raw CSV into one cleaned dataset.

use std::path::PathBuf;

use finsent_core::{AppConfig, Article};

/// `cleaned_data/all_cleaned_news.csv` under the data directory.
pub(crate) fn cleaned_path(config: &AppConfig) -> PathBuf {
    config.cleaned_dir().join("all_cleaned_news.csv")
}

/// Load, clean and persist the raw dataset. Returns the cleaned articles.
///
/// Nothing is written when no rows survive cleaning.
///
/// # Errors
///
/// Returns an error if the cleaned file cannot be written.
pub(crate) fn run_clean(config: &AppConfig) -> anyhow::Result<Vec<Article>> {
    let raw = finsent_store::load_all_raw(&config.news_dir());
    if raw.is_empty() {
        tracing::warn!(dir = %config.news_dir().display(), "no raw articles to clean");
        return Ok(Vec::new());
    }

    let (cleaned, report) = finsent_store::clean_articles(raw);
    if cleaned.is_empty() {
        tracing::warn!(?report, "every article was removed during cleaning");
        return Ok(cleaned);
    }

    let path = cleaned_path(config);
    finsent_store::write_articles(&path, &cleaned)?;
    println!(
        "cleaning complete: {} of {} articles kept ({} incomplete, {} duplicates, {} bad dates) -> {}",
        report.remaining,
        report.initial,
        report.missing_fields,
        report.duplicates,
        report.invalid_dates,
        path.display()
    );
    Ok(cleaned)
}
