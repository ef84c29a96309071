//! `score` command: attach sentiment scores and write the output file.

use std::path::{Path, PathBuf};

use finsent_core::{AppConfig, Article};
use finsent_sentiment::{BatchOutcome, Lexicon};

/// `cleaned_data/news_with_sentiment.csv` under the data directory.
pub(crate) fn scored_path(config: &AppConfig) -> PathBuf {
    config.cleaned_dir().join("news_with_sentiment.csv")
}

/// Make the base lexicon available, then merge it with the domain table.
///
/// # Errors
///
/// Returns an error if the base lexicon can neither be found nor
/// downloaded, or if it contains invalid values.
pub(crate) async fn load_lexicon(config: &AppConfig) -> anyhow::Result<Lexicon> {
    finsent_sentiment::ensure_base_lexicon(
        &config.base_lexicon_path,
        &config.base_lexicon_url,
        config.request_timeout_secs,
        config.max_retries.saturating_add(1),
        config.retry_backoff_base_ms,
    )
    .await?;
    let base = finsent_sentiment::load_base_lexicon(&config.base_lexicon_path)?;
    let lexicon = Lexicon::with_domain_overrides(base)?;
    tracing::info!(terms = lexicon.len(), "lexicon ready");
    Ok(lexicon)
}

/// Score `articles` and write them to `output`.
///
/// An empty batch is reported and leaves `output` untouched.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub(crate) fn run_score(
    lexicon: &Lexicon,
    articles: Vec<Article>,
    output: &Path,
    parallel: bool,
) -> anyhow::Result<BatchOutcome> {
    let outcome = if parallel {
        finsent_sentiment::score_articles_parallel(lexicon, articles)
    } else {
        finsent_sentiment::score_articles(lexicon, articles)
    };

    let BatchOutcome::Scored(scored) = &outcome else {
        println!("no articles to score; nothing written");
        return Ok(outcome);
    };

    finsent_store::write_scored(output, scored)?;
    let summary = outcome.summary();
    tracing::info!(
        total = summary.total,
        positive = summary.positive,
        negative = summary.negative,
        neutral = summary.neutral,
        mean = summary.mean_score,
        "sentiment scoring complete"
    );
    println!(
        "sentiment analysis complete: {} articles scored (mean {:.3}) -> {}",
        summary.total,
        summary.mean_score,
        output.display()
    );
    Ok(outcome)
}
