//! Base and domain lexicon tables and the merge that combines them.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::SentimentError;
use crate::types::LexiconEntry;

/// Allowed valence range for domain override entries.
pub const DOMAIN_VALENCE_RANGE: (f64, f64) = (-3.0, 3.0);

/// Finance-specific term weights that override the base lexicon.
///
/// Keys are lower-case single tokens or space-separated phrases. `warning`
/// appears twice; the later entry wins and construction logs the duplicate.
pub const DOMAIN_LEXICON: &[(&str, f64)] = &[
    // Strongly positive
    ("bullish", 3.0),
    ("soaring", 3.0),
    ("surging", 3.0),
    ("surged", 3.0),
    ("skyrocketed", 3.0),
    ("explodes", 3.0),
    ("booms", 3.0),
    ("record-high", 3.0),
    ("breakout", 2.5),
    ("rally", 2.5),
    ("outperforming", 2.5),
    ("outperforms", 2.5),
    ("rebound", 2.5),
    ("growing", 2.5),
    ("boosts", 2.5),
    ("upside", 2.5),
    ("momentum", 2.0),
    ("reaffirms", 1.5),
    // Positive
    ("gains", 2.0),
    ("rises", 2.0),
    ("climbs", 2.0),
    ("jumps", 2.0),
    ("growth", 2.0),
    ("profitable", 2.0),
    ("strong", 2.0),
    ("upgraded", 1.5),
    ("positive", 1.5),
    ("stable", 1.0),
    ("solid", 1.0),
    ("investment", 1.5),
    ("invests", 1.5),
    ("deal", 1.5),
    ("equity", 1.0),
    ("acquisition", 2.0),
    ("merger", 2.0),
    ("expands", 1.5),
    ("launches", 1.0),
    ("outlook", 1.5),
    ("target", 1.0),
    ("stake", 1.0),
    ("ups", 1.5),
    ("outmaneuvered", 1.5),
    ("buys", 1.5),
    ("raises", 1.0),
    ("optimistic", 1.5),
    ("up", 1.0),
    // Neutral / mixed
    ("volatile", 0.0),
    ("uncertainty", -0.5),
    ("mixed", -0.5),
    ("speculation", 0.0),
    ("analyst", 0.0),
    ("forecast", 0.0),
    ("expected", 0.0),
    ("hovers", 0.0),
    // Negative
    ("declines", -2.0),
    ("falls", -2.0),
    ("drops", -2.0),
    ("losses", -2.0),
    ("downgraded", -1.5),
    ("weak", -1.5),
    ("negative", -1.5),
    ("struggles", -1.5),
    ("warning", -1.0),
    ("concern", -1.0),
    ("fears", -2.0),
    ("debt", -1.0),
    ("downside", -1.5),
    ("cut", -1.5),
    ("sued", -2.0),
    ("down", -1.5),
    // Strongly negative
    ("bearish", -3.0),
    ("plunges", -3.0),
    ("plunged", -3.0),
    ("crashes", -3.0),
    ("collapses", -3.0),
    ("plummets", -3.0),
    ("sinks", -3.0),
    ("slump", -2.5),
    ("tumbles", -2.5),
    ("crisis", -2.5),
    ("bankrupt", -2.5),
    ("bankruptcy", -3.0),
    ("missed", -2.5),
    ("overcapacity", -2.0),
    ("crackdown", -2.5),
    ("indebted", -2.0),
    ("bloated", -2.0),
    ("warning", -2.5),
    ("steps down", -2.0),
];

/// Merged, immutable term → valence table.
///
/// Single tokens and multi-word phrases are stored apart so the matcher can
/// try phrases first without re-splitting every key.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub(crate) words: HashMap<String, f64>,
    pub(crate) phrases: HashMap<String, f64>,
    /// Token count of the longest phrase; `1` when there are no phrases.
    pub(crate) max_phrase_len: usize,
}

impl Lexicon {
    /// Merge a base table with the built-in [`DOMAIN_LEXICON`].
    ///
    /// # Errors
    ///
    /// See [`Lexicon::merge`].
    pub fn with_domain_overrides<I>(base: I) -> Result<Self, SentimentError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self::merge(base, DOMAIN_LEXICON)
    }

    /// Merge `base` and `domain` into one table.
    ///
    /// A term present in both always takes the domain valence; the base
    /// value is discarded, not combined. Within a single table the last
    /// definition of a term wins. Duplicate domain keys are logged as a
    /// data-quality warning.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidLexicon`] if a base valence is not
    /// finite or a domain valence falls outside [`DOMAIN_VALENCE_RANGE`].
    pub fn merge<I>(base: I, domain: &[(&str, f64)]) -> Result<Self, SentimentError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut table: HashMap<String, f64> = HashMap::new();

        for (term, valence) in base {
            if !valence.is_finite() {
                return Err(SentimentError::InvalidLexicon(format!(
                    "base term '{term}' has non-finite valence {valence}"
                )));
            }
            let key = normalize_term(&term);
            if key.is_empty() {
                continue;
            }
            table.insert(key, valence);
        }
        let base_len = table.len();

        let (min, max) = DOMAIN_VALENCE_RANGE;
        let mut seen = HashSet::new();
        let mut overridden = 0usize;
        for &(term, valence) in domain {
            if !(min..=max).contains(&valence) {
                return Err(SentimentError::InvalidLexicon(format!(
                    "domain term '{term}' has valence {valence} outside [{min}, {max}]"
                )));
            }
            let key = normalize_term(term);
            if !seen.insert(key.clone()) {
                tracing::warn!(
                    term = %key,
                    valence,
                    "duplicate domain lexicon term; the later definition wins"
                );
            }
            if let Some(previous) = table.insert(key, valence) {
                if (previous - valence).abs() > f64::EPSILON {
                    overridden += 1;
                }
            }
        }

        let lexicon = Self::from_table(table);
        tracing::debug!(
            base_terms = base_len,
            domain_terms = seen.len(),
            overridden,
            total = lexicon.len(),
            "lexicon merged"
        );
        Ok(lexicon)
    }

    fn from_table(table: HashMap<String, f64>) -> Self {
        let mut words = HashMap::new();
        let mut phrases = HashMap::new();
        let mut max_phrase_len = 1;
        for (term, valence) in table {
            let tokens = term.split(' ').count();
            if tokens > 1 {
                max_phrase_len = max_phrase_len.max(tokens);
                phrases.insert(term, valence);
            } else {
                words.insert(term, valence);
            }
        }
        Self {
            words,
            phrases,
            max_phrase_len,
        }
    }

    /// Valence of a term, case-insensitive. Phrases are matched on their
    /// whitespace-normalised form.
    #[must_use]
    pub fn get(&self, term: &str) -> Option<f64> {
        let key = normalize_term(term);
        self.words
            .get(&key)
            .or_else(|| self.phrases.get(&key))
            .copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len() + self.phrases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, sorted by term.
    #[must_use]
    pub fn entries(&self) -> Vec<LexiconEntry> {
        let mut entries: Vec<LexiconEntry> = self
            .words
            .iter()
            .chain(&self.phrases)
            .map(|(term, &valence)| LexiconEntry {
                term: term.clone(),
                valence,
            })
            .collect();
        entries.sort_by(|a, b| a.term.cmp(&b.term));
        entries
    }
}

/// Lower-case a term and collapse internal whitespace to single spaces.
pub(crate) fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a VADER-format lexicon: `term<TAB>mean<TAB>stddev<TAB>ratings`.
///
/// Only the first two columns are used. Blank lines are ignored; rows with
/// a missing or unparseable valence are skipped and counted in a warning.
#[must_use]
pub fn parse_base_lexicon(content: &str) -> Vec<(String, f64)> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let mut cols = line.split('\t');
        let term = cols.next().map(str::trim).unwrap_or_default();
        let valence = cols.next().and_then(|v| v.trim().parse::<f64>().ok());
        match valence {
            Some(v) if !term.is_empty() && v.is_finite() => entries.push((term.to_string(), v)),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped malformed base lexicon rows");
    }
    entries
}

/// Read and parse the base lexicon file at `path`.
///
/// # Errors
///
/// Returns [`SentimentError::ResourceUnavailable`] if the file cannot be read
/// or yields no usable entries.
pub fn load_base_lexicon(path: &Path) -> Result<Vec<(String, f64)>, SentimentError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SentimentError::unavailable(path.display(), e))?;
    let entries = parse_base_lexicon(&content);
    if entries.is_empty() {
        return Err(SentimentError::unavailable(
            path.display(),
            "file contains no lexicon entries",
        ));
    }
    tracing::info!(path = %path.display(), terms = entries.len(), "base lexicon loaded");
    Ok(entries)
}
