//! Acquisition of the base lexicon file.
//!
//! The scorer only reads a local file. When that file is absent it is
//! downloaded once from a configured URL and written next to where it is
//! expected; any failure here is fatal for the run.

use std::path::Path;
use std::time::Duration;

use finsent_core::retry::retry_with_backoff;

use crate::error::SentimentError;
use crate::lexicon::parse_base_lexicon;

/// Make sure the base lexicon exists at `path`, downloading it from `url`
/// if it does not.
///
/// The download is attempted up to `attempts` times (at least once); network
/// failures and 5xx responses are retried with jittered exponential back-off
/// starting at `backoff_base_ms`. The body must parse to at least one
/// lexicon entry before it is written; it is staged in a sibling temp file
/// and renamed into place.
///
/// # Errors
///
/// Returns [`SentimentError::ResourceUnavailable`] if the file is missing
/// and cannot be downloaded, validated, or written.
pub async fn ensure_base_lexicon(
    path: &Path,
    url: &str,
    timeout_secs: u64,
    attempts: u32,
    backoff_base_ms: u64,
) -> Result<(), SentimentError> {
    if path.is_file() {
        tracing::debug!(path = %path.display(), "base lexicon present");
        return Ok(());
    }

    tracing::info!(path = %path.display(), url, "base lexicon missing; downloading");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent("finsent/0.1 (lexicon-fetch)")
        .build()
        .map_err(|e| SentimentError::unavailable(url, e))?;

    let max_retries = attempts.max(1) - 1;
    let body = retry_with_backoff("base-lexicon", max_retries, backoff_base_ms, is_transient, || {
        download(&client, url)
    })
    .await
    .map_err(|e| SentimentError::unavailable(url, e))?;

    let entries = parse_base_lexicon(&body);
    if entries.is_empty() {
        return Err(SentimentError::unavailable(
            url,
            "downloaded file contains no lexicon entries",
        ));
    }

    write_atomically(path, &body)
        .await
        .map_err(|e| SentimentError::unavailable(path.display(), e))?;
    tracing::info!(path = %path.display(), terms = entries.len(), "base lexicon saved");
    Ok(())
}

async fn download(client: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout()
        || err.is_connect()
        || err.is_body()
        || err.status().is_some_and(|s| s.is_server_error())
}

async fn write_atomically(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut staging = path.as_os_str().to_owned();
    staging.push(".partial");
    tokio::fs::write(&staging, contents).await?;
    tokio::fs::rename(&staging, path).await
}
