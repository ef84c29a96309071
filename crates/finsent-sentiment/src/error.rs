use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    /// The base lexicon could not be read or downloaded. Scoring must not start.
    #[error("lexicon resource unavailable ({resource}): {reason}")]
    ResourceUnavailable { resource: String, reason: String },

    /// A lexicon table contains a value outside its allowed range.
    #[error("invalid lexicon entry: {0}")]
    InvalidLexicon(String),
}

impl SentimentError {
    pub(crate) fn unavailable(resource: impl std::fmt::Display, reason: impl ToString) -> Self {
        Self::ResourceUnavailable {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }
}
