//! Scoring a whole batch of articles.
//!
//! Batches are taken by value and returned as new [`ScoredArticle`]s, so the
//! caller never observes a partially annotated collection.

use finsent_core::Article;
use rayon::prelude::*;

use crate::lexicon::Lexicon;
use crate::scorer::compound_score;
use crate::types::ScoredArticle;

/// Result of scoring a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The input held no records. Nothing was scored and nothing should be
    /// persisted.
    Empty,
    /// One scored article per input record, in input order.
    Scored(Vec<ScoredArticle>),
}

impl BatchOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Scored(articles) => articles.len(),
        }
    }

    /// The scored articles; empty for [`BatchOutcome::Empty`].
    #[must_use]
    pub fn into_articles(self) -> Vec<ScoredArticle> {
        match self {
            Self::Empty => Vec::new(),
            Self::Scored(articles) => articles,
        }
    }

    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        match self {
            Self::Empty => BatchSummary::default(),
            Self::Scored(articles) => BatchSummary::from_articles(articles),
        }
    }
}

/// Counts and mean score for a scored batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Mean compound score. `0.0` for an empty batch.
    pub mean_score: f64,
}

impl BatchSummary {
    fn from_articles(articles: &[ScoredArticle]) -> Self {
        let mut summary = Self {
            total: articles.len(),
            ..Self::default()
        };
        if articles.is_empty() {
            return summary;
        }
        let mut sum = 0.0;
        for scored in articles {
            let s = scored.sentiment_score;
            sum += s;
            if s > 0.0 {
                summary.positive += 1;
            } else if s < 0.0 {
                summary.negative += 1;
            } else {
                summary.neutral += 1;
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let denom = articles.len() as f64;
        summary.mean_score = sum / denom;
        summary
    }
}

fn score_one(lexicon: &Lexicon, article: Article) -> ScoredArticle {
    let sentiment_score = compound_score(lexicon, article.description.as_deref());
    ScoredArticle {
        article,
        sentiment_score,
    }
}

/// Score every article's description, preserving order and all other fields.
///
/// Articles without a description score `0.0`. An empty input yields
/// [`BatchOutcome::Empty`].
#[must_use]
pub fn score_articles(lexicon: &Lexicon, articles: Vec<Article>) -> BatchOutcome {
    if articles.is_empty() {
        tracing::info!("no articles to score");
        return BatchOutcome::Empty;
    }
    let scored: Vec<ScoredArticle> = articles
        .into_iter()
        .map(|article| score_one(lexicon, article))
        .collect();
    tracing::debug!(count = scored.len(), "articles scored");
    BatchOutcome::Scored(scored)
}

/// Same contract as [`score_articles`], spread across the rayon thread pool.
///
/// The lexicon is shared read-only between workers; output order still
/// matches input order.
#[must_use]
pub fn score_articles_parallel(lexicon: &Lexicon, articles: Vec<Article>) -> BatchOutcome {
    if articles.is_empty() {
        tracing::info!("no articles to score");
        return BatchOutcome::Empty;
    }
    let scored: Vec<ScoredArticle> = articles
        .into_par_iter()
        .map(|article| score_one(lexicon, article))
        .collect();
    tracing::debug!(count = scored.len(), "articles scored in parallel");
    BatchOutcome::Scored(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: Option<&str>) -> Article {
        Article {
            title: Some(title.to_string()),
            description: description.map(ToString::to_string),
            url: Some(format!("https://example.com/{title}")),
            published_at: Some("2025-01-02T03:04:05Z".to_string()),
            source: Some("Reuters".to_string()),
        }
    }

    fn lexicon() -> Lexicon {
        Lexicon::with_domain_overrides(Vec::new()).unwrap()
    }

    fn sample() -> Vec<Article> {
        vec![
            article("a", Some("Bullish rally lifts shares")),
            article("b", None),
            article("c", Some("Shares plunged amid crisis")),
        ]
    }

    #[test]
    fn empty_batch_is_signalled_distinctly() {
        let outcome = score_articles(&lexicon(), Vec::new());
        assert_eq!(outcome, BatchOutcome::Empty);
        assert!(outcome.is_empty());
        assert_eq!(outcome.len(), 0);
        assert!(outcome.into_articles().is_empty());
    }

    #[test]
    fn batch_preserves_count_order_and_fields() {
        let input = sample();
        let outcome = score_articles(&lexicon(), input.clone());
        let scored = outcome.into_articles();
        assert_eq!(scored.len(), 3);
        for (original, scored) in input.iter().zip(&scored) {
            assert_eq!(&scored.article, original);
        }
    }

    #[test]
    fn missing_description_scores_neutral() {
        let scored = score_articles(&lexicon(), sample()).into_articles();
        assert!(scored[0].sentiment_score > 0.0);
        assert_eq!(scored[1].sentiment_score, 0.0);
        assert!(scored[2].sentiment_score < 0.0);
    }

    #[test]
    fn parallel_matches_sequential() {
        let lex = lexicon();
        let many: Vec<Article> = (0..200)
            .map(|i| {
                let text = if i % 3 == 0 { "bullish growth" } else { "bearish slump" };
                article(&i.to_string(), Some(text))
            })
            .collect();
        let sequential = score_articles(&lex, many.clone());
        let parallel = score_articles_parallel(&lex, many);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn parallel_empty_batch_is_empty() {
        assert!(score_articles_parallel(&lexicon(), Vec::new()).is_empty());
    }

    #[test]
    fn summary_counts_signs_and_mean() {
        let outcome = score_articles(&lexicon(), sample());
        let summary = outcome.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.positive, 1);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 1);
        let scored = outcome.into_articles();
        let expected = scored.iter().map(|s| s.sentiment_score).sum::<f64>() / 3.0;
        assert!((summary.mean_score - expected).abs() < 1e-12);
    }

    #[test]
    fn summary_of_empty_outcome_is_zeroed() {
        assert_eq!(BatchOutcome::Empty.summary(), BatchSummary::default());
    }
}
