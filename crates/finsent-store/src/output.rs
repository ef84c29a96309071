//! Cleaned and scored dataset files.

use std::path::Path;

use finsent_core::Article;
use finsent_sentiment::ScoredArticle;
use serde::Serialize;

use crate::error::StoreError;

/// Column order of the scored output file.
pub const SCORED_HEADERS: [&str; 6] = [
    "title",
    "description",
    "url",
    "publishedAt",
    "source",
    "sentiment_score",
];

#[derive(Serialize)]
struct ScoredRow<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    url: Option<&'a str>,
    #[serde(rename = "publishedAt")]
    published_at: Option<&'a str>,
    source: Option<&'a str>,
    sentiment_score: f64,
}

impl<'a> From<&'a ScoredArticle> for ScoredRow<'a> {
    fn from(scored: &'a ScoredArticle) -> Self {
        let a = &scored.article;
        Self {
            title: a.title.as_deref(),
            description: a.description.as_deref(),
            url: a.url.as_deref(),
            published_at: a.published_at.as_deref(),
            source: a.source.as_deref(),
            sentiment_score: scored.sentiment_score,
        }
    }
}

fn create_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    Ok(())
}

/// Read articles from a CSV file with a header row.
///
/// Empty cells become `None`; unknown columns are ignored.
///
/// # Errors
///
/// Returns [`StoreError::Csv`] if the file cannot be opened or any row fails
/// to parse.
pub fn read_articles(path: &Path) -> Result<Vec<Article>, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    reader
        .deserialize::<Article>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::csv(path, e))
}

/// Overwrite `path` with `articles`, header included.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be written.
pub fn write_articles(path: &Path, articles: &[Article]) -> Result<(), StoreError> {
    create_parent(path)?;
    let mut writer = csv::Writer::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    for article in articles {
        writer
            .serialize(article)
            .map_err(|e| StoreError::csv(path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))?;
    tracing::info!(path = %path.display(), count = articles.len(), "articles written");
    Ok(())
}

/// Overwrite `path` with the scored articles in [`SCORED_HEADERS`] order.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be written.
pub fn write_scored(path: &Path, scored: &[ScoredArticle]) -> Result<(), StoreError> {
    create_parent(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| StoreError::csv(path, e))?;
    // Written explicitly so an empty slice still produces a header row.
    writer
        .write_record(SCORED_HEADERS)
        .map_err(|e| StoreError::csv(path, e))?;
    for row in scored.iter().map(ScoredRow::from) {
        writer.serialize(row).map_err(|e| StoreError::csv(path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))?;
    tracing::info!(path = %path.display(), count = scored.len(), "scored articles written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(title: &str, description: Option<&str>, score: f64) -> ScoredArticle {
        ScoredArticle {
            article: Article {
                title: Some(title.to_string()),
                description: description.map(ToString::to_string),
                url: Some("https://example.com".to_string()),
                published_at: Some("2025-02-03T04:05:06Z".to_string()),
                source: Some("CNBC".to_string()),
            },
            sentiment_score: score,
        }
    }

    #[test]
    fn write_scored_uses_fixed_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("news_with_sentiment.csv");
        write_scored(
            &path,
            &[scored("Up", Some("bullish, strong"), 0.75), scored("Blank", None, 0.0)],
        )
        .unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, SCORED_HEADERS);
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "bullish, strong");
        assert_eq!(&rows[0][5], "0.75");
        assert_eq!(&rows[1][1], "");
        assert_eq!(&rows[1][5], "0.0");
    }

    #[test]
    fn written_articles_read_back_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_cleaned_news.csv");
        let articles = vec![
            scored("A", Some("quote \"inside\""), 0.0).article,
            scored("B", None, 0.0).article,
        ];
        write_articles(&path, &articles).unwrap();
        assert_eq!(read_articles(&path).unwrap(), articles);
    }

    #[test]
    fn read_articles_missing_file_is_error() {
        let result = read_articles(Path::new("/no/such/file.csv"));
        assert!(matches!(result, Err(StoreError::Csv { .. })));
    }
}
