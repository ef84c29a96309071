//! Valence aggregation and compound-score normalization.

use crate::lexicon::Lexicon;
use crate::types::ScoredText;

/// Damping constant of the normalization `s / sqrt(s² + ALPHA)`.
///
/// With `ALPHA = 15` a sum of ±3 (one strong term) maps to about ±0.61.
/// The score measures accumulated valence, not density: long texts saturate
/// even on weak terms (200 matches of valence 1 already score about 0.9998).
pub const ALPHA: f64 = 15.0;

/// Map an unbounded valence sum onto `[-1.0, 1.0]`.
///
/// Odd, monotonic, near-linear around zero and saturating for large
/// magnitudes; `normalize(0.0) == 0.0`. NaN sums map to `0.0`.
#[must_use]
pub fn normalize(sum: f64) -> f64 {
    if sum.is_nan() || sum == 0.0 {
        return 0.0;
    }
    // hypot keeps s² from overflowing for absurdly large sums.
    (sum / sum.hypot(ALPHA.sqrt())).clamp(-1.0, 1.0)
}

/// Compound score of an optional text. `None`, empty and unmatched text
/// all score `0.0`.
#[must_use]
pub fn compound_score(lexicon: &Lexicon, text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 0.0;
    };
    let sum: f64 = lexicon.find_matches(text).iter().map(|m| m.valence).sum();
    normalize(sum)
}

/// Score an optional text, keeping the input alongside the result.
#[must_use]
pub fn score_text(lexicon: &Lexicon, text: Option<&str>) -> ScoredText {
    ScoredText {
        raw_text: text.map(ToString::to_string),
        compound_score: compound_score(lexicon, text),
    }
}

/// Score an untyped value as read from loosely structured input.
///
/// Only JSON strings are scored; `null`, numbers, booleans, arrays and
/// objects are neutral.
#[must_use]
pub fn score_value(lexicon: &Lexicon, value: &serde_json::Value) -> ScoredText {
    let text = value.as_str();
    if text.is_none() {
        tracing::trace!(kind = value_kind(value), "non-text input scored as neutral");
    }
    score_text(lexicon, text)
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn domain_only() -> Lexicon {
        Lexicon::with_domain_overrides(Vec::new()).unwrap()
    }

    #[test]
    fn normalize_zero_is_exactly_zero() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(-0.0), 0.0);
    }

    #[test]
    fn normalize_is_odd_and_monotonic() {
        let samples = [-50.0, -10.0, -3.0, -0.5, 0.0, 0.5, 3.0, 10.0, 50.0];
        for pair in samples.windows(2) {
            assert!(normalize(pair[0]) < normalize(pair[1]), "{pair:?}");
        }
        for s in samples {
            assert!((normalize(s) + normalize(-s)).abs() < 1e-12);
        }
    }

    #[test]
    fn normalize_saturates_without_reaching_one() {
        let big = normalize(40.0);
        let bigger = normalize(80.0);
        assert!(bigger > big);
        assert!(bigger < 1.0);
        assert!(normalize(-80.0) > -1.0);
    }

    #[test]
    fn normalize_matches_closed_form() {
        let expected = 3.0 / (9.0_f64 + ALPHA).sqrt();
        assert!((normalize(3.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn normalize_stays_bounded_for_extreme_sums() {
        assert!(normalize(f64::MAX) <= 1.0);
        assert!(normalize(f64::MIN) >= -1.0);
        assert_eq!(normalize(f64::NAN), 0.0);
    }

    #[test]
    fn missing_and_empty_text_score_zero() {
        let lex = domain_only();
        assert_eq!(compound_score(&lex, None), 0.0);
        assert_eq!(compound_score(&lex, Some("")), 0.0);
        assert_eq!(compound_score(&lex, Some("   ")), 0.0);
    }

    #[test]
    fn non_text_values_score_zero() {
        let lex = domain_only();
        for value in [json!(null), json!(42), json!(true), json!(["bullish"]), json!({"d": "bullish"})] {
            let scored = score_value(&lex, &value);
            assert_eq!(scored.compound_score, 0.0, "{value}");
            assert!(scored.raw_text.is_none());
        }
    }

    #[test]
    fn string_value_is_scored() {
        let lex = domain_only();
        let scored = score_value(&lex, &json!("bullish rally"));
        assert_eq!(scored.raw_text.as_deref(), Some("bullish rally"));
        assert!(scored.compound_score > 0.0);
    }

    #[test]
    fn text_without_lexicon_terms_scores_zero() {
        let lex = domain_only();
        assert_eq!(compound_score(&lex, Some("The weather was mild today")), 0.0);
    }

    #[test]
    fn balanced_matches_score_zero() {
        let lex = domain_only();
        assert_eq!(compound_score(&lex, Some("bullish but bearish")), 0.0);
    }

    #[test]
    fn score_is_case_insensitive() {
        let lex = domain_only();
        assert_eq!(
            compound_score(&lex, Some("BULLISH surge")),
            compound_score(&lex, Some("bullish surge"))
        );
    }

    #[test]
    fn extra_positive_term_never_lowers_score() {
        let lex = domain_only();
        let without = compound_score(&lex, Some("shares drops on weak guidance"));
        let with = compound_score(&lex, Some("shares drops on weak guidance bullish"));
        assert!(with >= without);
    }

    #[test]
    fn positive_headline_scores_above_half() {
        let lex = domain_only();
        let score = compound_score(
            &lex,
            Some("Shares surged after the bullish outlook, analysts say growth is strong"),
        );
        assert!(score > 0.5, "got {score}");
    }

    #[test]
    fn negative_headline_scores_below_minus_half() {
        let lex = domain_only();
        let score = compound_score(
            &lex,
            Some("Company shares plunged amid bankruptcy fears and a bearish outlook"),
        );
        assert!(score < -0.5, "got {score}");
    }

    #[test]
    fn domain_valence_decides_contribution_over_base() {
        // `cut` is mildly positive in this base table but negative in the domain table.
        let base = vec![("cut".to_string(), 2.0)];
        let lex = Lexicon::with_domain_overrides(base).unwrap();
        let score = compound_score(&lex, Some("Company cut"));
        assert!((score - normalize(-1.5)).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn repeated_weak_terms_saturate_toward_one() {
        let lex = domain_only();
        let single = compound_score(&lex, Some("stable"));
        assert!((single - 1.0 / 16.0_f64.sqrt()).abs() < 1e-12, "got {single}");

        let text = "stable ".repeat(200);
        let score = compound_score(&lex, Some(&text));
        assert!(score > 0.999 && score < 1.0, "got {score}");

        let text = "stable ".repeat(10_000);
        let score = compound_score(&lex, Some(&text));
        assert!(score > 0.0 && score <= 1.0, "got {score}");
    }

    #[test]
    fn scores_always_within_bounds() {
        let lex = domain_only();
        let texts = [
            "",
            "bullish",
            "bearish bearish bearish bearish bearish bearish",
            "CEO steps down as shares plunge; crisis deepens",
            "record-high record-high soaring surging rally rally rally",
        ];
        for text in texts {
            let score = compound_score(&lex, Some(text));
            assert!((-1.0..=1.0).contains(&score), "{text}: {score}");
        }
    }
}
