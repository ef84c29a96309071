//! Lexicon-based sentiment scoring for financial news.
//!
//! A general-purpose base lexicon (VADER format) is merged with a curated
//! finance vocabulary whose weights always win on collision. The merged
//! [`Lexicon`] is immutable and passed explicitly to every scoring call;
//! each text gets a compound score in `[-1.0, 1.0]`.

pub mod batch;
pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod resource;
pub mod scorer;
pub mod types;

pub use batch::{score_articles, score_articles_parallel, BatchOutcome, BatchSummary};
pub use error::SentimentError;
pub use lexicon::{load_base_lexicon, parse_base_lexicon, Lexicon, DOMAIN_LEXICON};
pub use matcher::tokenize;
pub use resource::ensure_base_lexicon;
pub use scorer::{compound_score, normalize, score_text, score_value, ALPHA};
pub use types::{LexiconEntry, ScoredArticle, ScoredText, TermMatch};
