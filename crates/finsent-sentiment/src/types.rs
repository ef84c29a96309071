use finsent_core::Article;

/// A single `(term, valence)` lexicon row.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    /// Lower-cased token or whitespace-separated phrase.
    pub term: String,
    pub valence: f64,
}

/// A lexicon term found in a text, in order of appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatch {
    pub term: String,
    pub valence: f64,
}

/// Compound score for one input text.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredText {
    /// `None` when the input was missing or not text.
    pub raw_text: Option<String>,
    /// Always in `[-1.0, 1.0]`; `0.0` for missing, empty or unmatched text.
    pub compound_score: f64,
}

/// An [`Article`] with its description's compound score attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredArticle {
    pub article: Article,
    pub sentiment_score: f64,
}
