//! Cleaning of the merged raw dataset.
//!
//! Steps, in order: drop rows without a title or publication time, drop
//! duplicate `(title, description)` pairs keeping the first, drop rows
//! whose publication time does not parse, then sort chronologically.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use finsent_core::Article;

/// Row counts removed at each cleaning step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub initial: usize,
    pub missing_fields: usize,
    pub duplicates: usize,
    pub invalid_dates: usize,
    pub remaining: usize,
}

/// Parse a publication timestamp into UTC.
///
/// Accepts RFC 3339 (`2025-03-01T10:00:00Z`), `YYYY-MM-DD HH:MM:SS±HH:MM`,
/// naive `YYYY-MM-DD[T ]HH:MM:SS[.fff]` (taken as UTC) and bare dates
/// (midnight UTC).
#[must_use]
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(ts) = DateTime::<FixedOffset>::parse_from_str(raw, fmt) {
            return Some(ts.with_timezone(&Utc));
        }
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
    ] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

fn is_blank(field: Option<&String>) -> bool {
    field.is_none_or(|v| v.trim().is_empty())
}

/// Clean a merged raw dataset.
///
/// Surviving rows keep every field, except that `published_at` is rewritten
/// as RFC 3339 UTC.
#[must_use]
pub fn clean_articles(articles: Vec<Article>) -> (Vec<Article>, CleanReport) {
    let mut report = CleanReport {
        initial: articles.len(),
        ..CleanReport::default()
    };

    let complete: Vec<Article> = articles
        .into_iter()
        .filter(|a| !is_blank(a.title.as_ref()) && !is_blank(a.published_at.as_ref()))
        .collect();
    report.missing_fields = report.initial - complete.len();

    let mut seen: HashSet<(Option<String>, Option<String>)> = HashSet::new();
    let unique: Vec<Article> = complete
        .into_iter()
        .filter(|a| seen.insert((a.title.clone(), a.description.clone())))
        .collect();
    report.duplicates = report.initial - report.missing_fields - unique.len();

    let unique_len = unique.len();
    let mut dated: Vec<(DateTime<Utc>, Article)> = unique
        .into_iter()
        .filter_map(|a| {
            let ts = a.published_at.as_deref().and_then(parse_published_at)?;
            Some((ts, a))
        })
        .collect();
    report.invalid_dates = unique_len - dated.len();

    dated.sort_by_key(|(ts, _)| *ts);

    let cleaned: Vec<Article> = dated
        .into_iter()
        .map(|(ts, mut a)| {
            a.published_at = Some(ts.to_rfc3339_opts(SecondsFormat::Secs, true));
            a
        })
        .collect();
    report.remaining = cleaned.len();

    tracing::info!(
        initial = report.initial,
        missing_fields = report.missing_fields,
        duplicates = report.duplicates,
        invalid_dates = report.invalid_dates,
        remaining = report.remaining,
        "articles cleaned"
    );
    (cleaned, report)
}
