use thiserror::Error;

/// Errors returned by the collector and normalizer.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure. The request URL is stripped so the API key
    /// never reaches logs.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a quota or rate-limit rejection.
    #[error("YouTube API quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other non-2xx answer, including auth failures.
    #[error("YouTube API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("video at position {index} has no id")]
    MissingId { index: usize },

    #[error("video {video_id} has no title")]
    MissingTitle { video_id: String },

    #[error("duplicate video id in batch: {0}")]
    DuplicateId(String),
}
