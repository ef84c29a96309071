//! Tokenization and lexicon lookup.
//!
//! Matching is purely lexical: whitespace split, lower-case, edge
//! punctuation trimmed. Phrase entries are tried longest-first at each
//! position, and the tokens a phrase consumes are not looked up again.

use crate::lexicon::Lexicon;
use crate::types::TermMatch;

/// One whitespace-delimited token in two forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lower-cased with leading and trailing punctuation removed.
    /// Internal hyphens and apostrophes survive (`record-high`, `don't`).
    pub word: String,
    /// Lower-cased original, used for symbol entries such as `:)`.
    pub raw: String,
}

/// Split text into lower-cased tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|piece| {
            let raw = piece.to_lowercase();
            let word = raw
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string();
            Token { word, raw }
        })
        .collect()
}

impl Lexicon {
    /// Every lexicon term found in `text`, in order of appearance.
    ///
    /// Unknown tokens are ignored. Repeated terms are reported each time they
    /// occur.
    #[must_use]
    pub fn find_matches(&self, text: &str) -> Vec<TermMatch> {
        let tokens = tokenize(text);
        let mut matches = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if let Some((term, valence, len)) = self.match_phrase(&tokens[i..]) {
                matches.push(TermMatch { term, valence });
                i += len;
                continue;
            }

            let token = &tokens[i];
            let hit = self
                .words
                .get_key_value(token.word.as_str())
                .filter(|_| !token.word.is_empty())
                .or_else(|| self.words.get_key_value(token.raw.as_str()));
            if let Some((term, &valence)) = hit {
                matches.push(TermMatch {
                    term: term.clone(),
                    valence,
                });
            }
            i += 1;
        }

        matches
    }

    /// Longest phrase starting at the head of `tokens`, if any.
    fn match_phrase(&self, tokens: &[Token]) -> Option<(String, f64, usize)> {
        if self.phrases.is_empty() {
            return None;
        }
        let longest = self.max_phrase_len.min(tokens.len());
        (2..=longest).rev().find_map(|len| {
            let window = &tokens[..len];
            if window.iter().any(|t| t.word.is_empty()) {
                return None;
            }
            let key = window
                .iter()
                .map(|t| t.word.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            self.phrases.get(&key).map(|&v| (key, v, len))
        })
    }
}
