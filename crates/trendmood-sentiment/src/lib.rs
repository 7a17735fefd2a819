//! Title sentiment classification and batch aggregation for trendmood.
//!
//! Sends each video title through a pluggable [`SentimentClassifier`]
//! (a hosted text-classification model or the offline lexicon), turns every
//! label/confidence pair into a signed score, and sums the batch into a
//! single directional [`trendmood_core::BatchVerdict`].

pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod score;

pub use classifier::{
    lexicon_score, Classification, HuggingFaceClassifier, LexiconClassifier, SentimentClassifier,
};
pub use error::SentimentError;
pub use pipeline::{
    analyze, classify_videos, Analysis, BatchOutcome, PipelineOptions, SkippedVideo,
};
pub use score::{aggregate, score_result};
