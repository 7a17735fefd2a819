//! Weighted-vote scoring and batch aggregation.

use chrono::NaiveDate;
use trendmood_core::{BatchVerdict, ScoredResult, SentimentResult, Verdict};

/// Turns a classifier result into a signed score: `+confidence` for
/// `POSITIVE`, `-confidence` for `NEGATIVE`.
#[must_use]
pub fn score_result(result: SentimentResult, title: impl Into<String>) -> ScoredResult {
    let binary_label = result.label.binary();
    ScoredResult {
        video_id: result.video_id,
        title: title.into(),
        label: result.label,
        confidence: result.confidence,
        binary_label,
        signed_score: f64::from(binary_label) * result.confidence,
    }
}

/// Sums the signed scores of a batch into one verdict.
///
/// The total is a plain sum, not a mean: one highly confident title can
/// outweigh several weak ones. A total of exactly zero (including an empty
/// batch) is positive.
#[must_use]
pub fn aggregate(date: NaiveDate, scored: &[ScoredResult]) -> BatchVerdict {
    let total_signed_score: f64 = scored.iter().map(|s| s.signed_score).sum();
    BatchVerdict {
        date,
        total_signed_score,
        verdict: Verdict::from_total(total_signed_score),
        video_count: scored.len(),
    }
}
