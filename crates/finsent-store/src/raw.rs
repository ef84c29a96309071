//! Per-company raw CSV files.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use finsent_core::{Article, CompanyConfig};

use crate::error::StoreError;

/// `{news_dir}/{Company}/{TICKER}_{Company}.csv`.
#[must_use]
pub fn company_csv_path(news_dir: &Path, company: &CompanyConfig) -> PathBuf {
    news_dir.join(&company.name).join(company.csv_file_name())
}

/// Append `articles` to the company's raw CSV.
///
/// A header row is written only when the file is new or empty. Returns the
/// path written to.
///
/// # Errors
///
/// Returns [`StoreError`] if the directory or file cannot be written.
pub fn append_company_articles(
    news_dir: &Path,
    company: &CompanyConfig,
    articles: &[Article],
) -> Result<PathBuf, StoreError> {
    let path = company_csv_path(news_dir, company);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let has_content = std::fs::metadata(&path).is_ok_and(|m| m.len() > 0);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| StoreError::io(&path, e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(!has_content)
        .from_writer(file);
    for article in articles {
        writer
            .serialize(article)
            .map_err(|e| StoreError::csv(&path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(&path, e))?;

    tracing::info!(
        company = %company.name,
        count = articles.len(),
        path = %path.display(),
        "articles appended"
    );
    Ok(path)
}

/// Load every `*.csv` under `dir`, recursively, in path order.
///
/// Files that cannot be read or parsed are logged and skipped. A missing
/// directory yields an empty list.
#[must_use]
pub fn load_all_raw(dir: &Path) -> Vec<Article> {
    let mut files = Vec::new();
    collect_csv_files(dir, &mut files);
    files.sort();

    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), "no raw CSV files found");
        return Vec::new();
    }

    let mut articles = Vec::new();
    for file in &files {
        match crate::output::read_articles(file) {
            Ok(mut loaded) => {
                tracing::debug!(path = %file.display(), count = loaded.len(), "raw file loaded");
                articles.append(&mut loaded);
            }
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "skipping unreadable raw file");
            }
        }
    }
    tracing::info!(files = files.len(), articles = articles.len(), "raw data loaded");
    articles
}

fn collect_csv_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "cannot read directory");
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_csv_files(&path, out);
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        {
            out.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company() -> CompanyConfig {
        CompanyConfig {
            name: "Exxon Mobil".to_string(),
            ticker: "XOM".to_string(),
        }
    }

    fn article(title: &str) -> Article {
        Article {
            title: Some(title.to_string()),
            description: Some(format!("{title}, with a comma")),
            url: Some(format!("https://example.com/{title}")),
            published_at: Some("2025-01-01T00:00:00Z".to_string()),
            source: None,
        }
    }

    #[test]
    fn company_csv_path_uses_company_folder() {
        let path = company_csv_path(Path::new("/data/newsdata"), &company());
        assert_eq!(
            path,
            PathBuf::from("/data/newsdata/Exxon Mobil/XOM_Exxon_Mobil.csv")
        );
    }

    #[test]
    fn append_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        append_company_articles(dir.path(), &company(), &[article("one")]).unwrap();
        let path =
            append_company_articles(dir.path(), &company(), &[article("two"), article("three")])
                .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("title,description").count(), 1);

        let loaded = load_all_raw(dir.path());
        let titles: Vec<_> = loaded.iter().filter_map(|a| a.title.as_deref()).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
        assert_eq!(loaded[0], article("one"));
    }

    #[test]
    fn load_all_raw_walks_subdirectories_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            nested.join("x.csv"),
            "title,description,url,publishedAt,source\nT,D,U,2025-01-01,S\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.csv"), "title,description\na,b,c\n")
            .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let loaded = load_all_raw(dir.path());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].source.as_deref(), Some("S"));
    }

    #[test]
    fn load_all_raw_missing_dir_is_empty() {
        assert!(load_all_raw(Path::new("/no/such/newsdata")).is_empty());
    }
}
