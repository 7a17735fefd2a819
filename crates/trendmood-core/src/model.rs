//! Domain records flowing through the collect → classify → aggregate pipeline.
//!
//! Every record is created once and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures when constructing domain records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("unknown sentiment label: {0:?}")]
    UnknownLabel(String),

    #[error("confidence {0} is outside [0, 1]")]
    InvalidConfidence(f64),
}

/// Binary output of the sentiment classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    /// Wire form used by the classifier (`POSITIVE` / `NEGATIVE`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
        }
    }

    /// `+1` for [`SentimentLabel::Positive`], `-1` for [`SentimentLabel::Negative`].
    #[must_use]
    pub fn binary(self) -> i8 {
        match self {
            SentimentLabel::Positive => 1,
            SentimentLabel::Negative => -1,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => Ok(SentimentLabel::Positive),
            "NEGATIVE" => Ok(SentimentLabel::Negative),
            _ => Err(ModelError::UnknownLabel(s.to_string())),
        }
    }
}

/// One flattened video from the most-popular chart.
///
/// `id` and `title` are always present; the remaining snippet fields are kept
/// for export only and are ignored by scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub channel_id: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    pub category_id: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Classifier output for one video: exactly one label and its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub video_id: String,
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl SentimentResult {
    /// Builds a result, rejecting confidences outside `[0, 1]` (including NaN).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidConfidence`] for an out-of-range confidence.
    pub fn new(
        video_id: impl Into<String>,
        label: SentimentLabel,
        confidence: f64,
    ) -> Result<Self, ModelError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ModelError::InvalidConfidence(confidence));
        }
        Ok(Self {
            video_id: video_id.into(),
            label,
            confidence,
        })
    }
}

/// A [`SentimentResult`] extended with its signed weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub video_id: String,
    pub title: String,
    pub label: SentimentLabel,
    pub confidence: f64,
    /// `+1` or `-1`.
    pub binary_label: i8,
    /// `binary_label * confidence`.
    pub signed_score: f64,
}

/// Directional verdict for a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Positive,
    Negative,
}

impl Verdict {
    /// Classifies a summed signed score. The threshold is inclusive: a total
    /// of exactly zero is positive.
    #[must_use]
    pub fn from_total(total: f64) -> Self {
        if total >= 0.0 {
            Verdict::Positive
        } else {
            Verdict::Negative
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Positive => write!(f, "positive"),
            Verdict::Negative => write!(f, "negative"),
        }
    }
}

/// Aggregate result of one run, tagged with the run date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchVerdict {
    pub date: NaiveDate,
    pub total_signed_score: f64,
    pub verdict: Verdict,
    /// Number of scored videos that contributed to the total.
    pub video_count: usize,
}

impl BatchVerdict {
    /// Human-readable one-line summary printed at the end of a run.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "The overall sentiment for the most popular {} videos on {} is {}.",
            self.video_count,
            self.date.format("%Y-%m-%d"),
            self.verdict
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_parses_case_insensitively() {
        assert_eq!(
            "positive".parse::<SentimentLabel>(),
            Ok(SentimentLabel::Positive)
        );
        assert_eq!(
            " NEGATIVE ".parse::<SentimentLabel>(),
            Ok(SentimentLabel::Negative)
        );
    }

    #[test]
    fn label_rejects_unknown_values() {
        assert_eq!(
            "NEUTRAL".parse::<SentimentLabel>(),
            Err(ModelError::UnknownLabel("NEUTRAL".to_string()))
        );
    }

    #[test]
    fn label_binary_mapping() {
        assert_eq!(SentimentLabel::Positive.binary(), 1);
        assert_eq!(SentimentLabel::Negative.binary(), -1);
    }

    #[test]
    fn label_serializes_uppercase() {
        let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
        assert_eq!(json, "\"NEGATIVE\"");
    }

    #[test]
    fn sentiment_result_accepts_bounds() {
        assert!(SentimentResult::new("a", SentimentLabel::Positive, 0.0).is_ok());
        assert!(SentimentResult::new("a", SentimentLabel::Positive, 1.0).is_ok());
    }

    #[test]
    fn sentiment_result_rejects_out_of_range_confidence() {
        let err = SentimentResult::new("a", SentimentLabel::Positive, 1.2).unwrap_err();
        assert_eq!(err, ModelError::InvalidConfidence(1.2));
        assert!(SentimentResult::new("a", SentimentLabel::Negative, -0.1).is_err());
        assert!(SentimentResult::new("a", SentimentLabel::Negative, f64::NAN).is_err());
    }

    #[test]
    fn verdict_zero_is_positive() {
        assert_eq!(Verdict::from_total(0.0), Verdict::Positive);
        assert_eq!(Verdict::from_total(-0.0), Verdict::Positive);
    }

    #[test]
    fn verdict_negative_total_is_negative() {
        assert_eq!(Verdict::from_total(-0.000_1), Verdict::Negative);
    }

    #[test]
    fn summary_line_matches_report_format() {
        let verdict = BatchVerdict {
            date: NaiveDate::from_ymd_opt(2023, 3, 14).unwrap(),
            total_signed_score: 12.5,
            verdict: Verdict::Positive,
            video_count: 200,
        };
        assert_eq!(
            verdict.summary_line(),
            "The overall sentiment for the most popular 200 videos on 2023-03-14 is positive."
        );
    }

    #[test]
    fn verdict_serializes_lowercase() {
        let json = serde_json::to_string(&Verdict::Negative).unwrap();
        assert_eq!(json, "\"negative\"");
    }
}
