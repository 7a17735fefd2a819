use thiserror::Error;
use trendmood_core::ModelError;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("classifier returned no labels")]
    EmptyResponse,

    #[error("classifier returned unknown label {0:?}")]
    UnknownLabel(String),

    #[error("classifier returned confidence {0} outside [0, 1]")]
    InvalidConfidence(f64),

    /// A per-title failure, tagged with the video it happened on.
    #[error("classification failed for video {video_id} ({title:?}): {source}")]
    Video {
        video_id: String,
        title: String,
        #[source]
        source: Box<SentimentError>,
    },
}

impl From<ModelError> for SentimentError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownLabel(label) => SentimentError::UnknownLabel(label),
            ModelError::InvalidConfidence(value) => SentimentError::InvalidConfidence(value),
        }
    }
}
