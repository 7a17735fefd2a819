//! Batch classification and aggregation over normalized videos.

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use trendmood_core::{
    BatchVerdict, ClassifierErrorPolicy, ScoredResult, SentimentResult, VideoRecord,
};

use crate::classifier::{Classification, SentimentClassifier};
use crate::error::SentimentError;
use crate::score::{aggregate, score_result};

/// Knobs for [`classify_videos`].
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Maximum classifier requests in flight. Values below 1 are treated as 1.
    pub concurrency: usize,
    pub on_error: ClassifierErrorPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            on_error: ClassifierErrorPolicy::Abort,
        }
    }
}

/// A video left out of the aggregate under [`ClassifierErrorPolicy::Skip`].
#[derive(Debug, Clone, Serialize)]
pub struct SkippedVideo {
    pub video_id: String,
    pub title: String,
    pub reason: String,
}

/// Scored videos plus any that were skipped, both in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub scored: Vec<ScoredResult>,
    pub skipped: Vec<SkippedVideo>,
}

/// Output of a complete [`analyze`] run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub scored: Vec<ScoredResult>,
    pub skipped: Vec<SkippedVideo>,
    pub verdict: BatchVerdict,
}

/// Classify every video title and convert each result into a signed score.
///
/// Titles are sent with up to `options.concurrency` requests in flight;
/// results keep the input order either way. With
/// [`ClassifierErrorPolicy::Abort`] the first failure cancels the remaining
/// requests and is returned. With [`ClassifierErrorPolicy::Skip`] failures are
/// logged and listed in [`BatchOutcome::skipped`].
///
/// # Errors
///
/// Returns [`SentimentError::Video`] naming the failed video when the policy
/// is `Abort`.
pub async fn classify_videos<C>(
    classifier: &C,
    videos: &[VideoRecord],
    options: PipelineOptions,
) -> Result<BatchOutcome, SentimentError>
where
    C: SentimentClassifier,
{
    let mut outcome = BatchOutcome {
        scored: Vec::with_capacity(videos.len()),
        skipped: Vec::new(),
    };

    let mut results = stream::iter(videos)
        .map(|video| async move { (video, classifier.classify(&video.title).await) })
        .buffered(options.concurrency.max(1));

    while let Some((video, result)) = results.next().await {
        match result.and_then(|c| to_result(video, c)) {
            Ok(result) => {
                tracing::debug!(
                    video_id = %video.id,
                    label = %result.label,
                    confidence = result.confidence,
                    "classified title"
                );
                outcome.scored.push(score_result(result, video.title.clone()));
            }
            Err(err) => match options.on_error {
                ClassifierErrorPolicy::Abort => {
                    tracing::error!(
                        classifier = classifier.name(),
                        video_id = %video.id,
                        title = %video.title,
                        error = %err,
                        "classification failed, aborting run"
                    );
                    return Err(SentimentError::Video {
                        video_id: video.id.clone(),
                        title: video.title.clone(),
                        source: Box::new(err),
                    });
                }
                ClassifierErrorPolicy::Skip => {
                    tracing::warn!(
                        classifier = classifier.name(),
                        video_id = %video.id,
                        title = %video.title,
                        error = %err,
                        "classification failed, skipping video"
                    );
                    outcome.skipped.push(SkippedVideo {
                        video_id: video.id.clone(),
                        title: video.title.clone(),
                        reason: err.to_string(),
                    });
                }
            },
        }
    }

    tracing::info!(
        classifier = classifier.name(),
        scored = outcome.scored.len(),
        skipped = outcome.skipped.len(),
        "classified batch"
    );

    Ok(outcome)
}

/// Classify, score and aggregate a batch of videos for `date`.
///
/// # Errors
///
/// Propagates any error from [`classify_videos`].
pub async fn analyze<C>(
    classifier: &C,
    videos: &[VideoRecord],
    date: NaiveDate,
    options: PipelineOptions,
) -> Result<Analysis, SentimentError>
where
    C: SentimentClassifier,
{
    let outcome = classify_videos(classifier, videos, options).await?;
    let verdict = aggregate(date, &outcome.scored);

    tracing::info!(
        date = %verdict.date,
        videos = verdict.video_count,
        total_signed_score = verdict.total_signed_score,
        verdict = %verdict.verdict,
        "aggregated batch verdict"
    );

    Ok(Analysis {
        scored: outcome.scored,
        skipped: outcome.skipped,
        verdict,
    })
}

fn to_result(
    video: &VideoRecord,
    classification: Classification,
) -> Result<SentimentResult, SentimentError> {
    SentimentResult::new(
        video.id.clone(),
        classification.label,
        classification.confidence,
    )
    .map_err(SentimentError::from)
}
