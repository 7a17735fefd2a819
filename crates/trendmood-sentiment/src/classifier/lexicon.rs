//! Offline word-lexicon classifier for video titles.

use trendmood_core::SentimentLabel;

use super::{Classification, SentimentClassifier};
use crate::error::SentimentError;

/// Headline word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The summed score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("amazing", 0.5),
    ("awesome", 0.5),
    ("beautiful", 0.4),
    ("best", 0.5),
    ("celebrate", 0.4),
    ("epic", 0.4),
    ("excellent", 0.5),
    ("fun", 0.3),
    ("funny", 0.3),
    ("good", 0.3),
    ("great", 0.4),
    ("happy", 0.4),
    ("incredible", 0.5),
    ("love", 0.5),
    ("perfect", 0.4),
    ("success", 0.4),
    ("win", 0.4),
    ("wins", 0.4),
    ("won", 0.4),
    ("wonderful", 0.5),
    // Negative signals
    ("angry", -0.4),
    ("attack", -0.5),
    ("awful", -0.6),
    ("bad", -0.4),
    ("broken", -0.4),
    ("crash", -0.5),
    ("dead", -0.6),
    ("disaster", -0.6),
    ("fail", -0.4),
    ("failed", -0.4),
    ("hate", -0.5),
    ("horrible", -0.6),
    ("killed", -0.7),
    ("lost", -0.3),
    ("sad", -0.4),
    ("scary", -0.3),
    ("terrible", -0.6),
    ("tragic", -0.6),
    ("war", -0.5),
    ("worst", -0.6),
];

/// Score a text string using the headline lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f64 {
    let mut score = 0.0_f64;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if let Some(&(_, weight)) = LEXICON.iter().find(|(lex_word, _)| *lex_word == w) {
            score += weight;
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Classifier backed by [`lexicon_score`]; needs no network or model.
///
/// A non-negative score is `POSITIVE`. Confidence maps the magnitude into
/// `[0.5, 1.0]`, so text with no known words is a coin-flip `POSITIVE` at 0.5.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`SentimentClassifier::classify`].
    #[must_use]
    pub fn classify_text(text: &str) -> Classification {
        let score = lexicon_score(text);
        let label = if score >= 0.0 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };
        Classification {
            label,
            confidence: 0.5 + score.abs() / 2.0,
        }
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> Result<Classification, SentimentError> {
        Ok(Self::classify_text(text))
    }
}
