use serde::{Deserialize, Serialize};

/// One collected news article.
///
/// Field names on the wire follow the NewsAPI / CSV column names
/// (`publishedAt`), so the same type round-trips through the raw CSV files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub source: Option<String>,
}
