//! Collector and normalizer for the `YouTube` Data API most-popular chart.
//!
//! [`YoutubeClient`] walks the paginated `videos.list` endpoint and
//! [`normalize_videos`] flattens the returned items into
//! [`trendmood_core::VideoRecord`]s, enforcing one record per video id.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::YoutubeClient;
pub use error::YoutubeError;
pub use normalize::normalize_videos;
pub use types::{Snippet, VideoItem, VideoListResponse};
