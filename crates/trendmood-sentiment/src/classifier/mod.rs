//! The classifier seam: one title in, one label and confidence out.

mod huggingface;
mod lexicon;

use std::future::Future;

use trendmood_core::SentimentLabel;

use crate::error::SentimentError;

pub use huggingface::HuggingFaceClassifier;
pub use lexicon::{lexicon_score, LexiconClassifier};

/// A single classification: the winning label and the model's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: SentimentLabel,
    pub confidence: f64,
}

/// A pre-trained binary sentiment model.
///
/// Implementations must return exactly one [`Classification`] per input and
/// accept any UTF-8 text, emoji and non-English scripts included.
pub trait SentimentClassifier: Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Classifies one piece of text.
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Classification, SentimentError>> + Send;
}
