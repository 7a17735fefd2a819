//! Flattening of raw `videos.list` items into [`VideoRecord`]s.

use std::collections::HashSet;

use trendmood_core::VideoRecord;

use crate::error::YoutubeError;
use crate::types::VideoItem;

/// Converts raw API items into flat [`VideoRecord`]s, preserving order.
///
/// The `id` sits outside `snippet` on the wire; it is lifted alongside the
/// snippet's scalar fields, and nested snippet objects are dropped.
///
/// Every record must carry a non-blank `id` and a `title`, and ids must be
/// unique across the batch. A duplicate would count one video twice in the
/// aggregate, so it is rejected rather than silently kept.
///
/// # Errors
///
/// - [`YoutubeError::MissingId`] if an item has no id.
/// - [`YoutubeError::MissingTitle`] if an item has no snippet title.
/// - [`YoutubeError::DuplicateId`] if two items share an id.
pub fn normalize_videos(items: Vec<VideoItem>) -> Result<Vec<VideoRecord>, YoutubeError> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let mut records = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let id = item
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(YoutubeError::MissingId { index })?;

        if !seen.insert(id.clone()) {
            tracing::error!(video_id = %id, index, "duplicate video id in most-popular batch");
            return Err(YoutubeError::DuplicateId(id));
        }

        let snippet = item.snippet.unwrap_or_default();
        let Some(title) = snippet.title else {
            return Err(YoutubeError::MissingTitle { video_id: id });
        };

        records.push(VideoRecord {
            id,
            title,
            channel_id: snippet.channel_id,
            channel_title: snippet.channel_title,
            published_at: snippet.published_at,
            category_id: snippet.category_id,
            description: snippet.description,
            tags: snippet.tags,
        });
    }

    tracing::debug!(records = records.len(), "normalized video records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Snippet;

    fn item(id: Option<&str>, title: Option<&str>) -> VideoItem {
        VideoItem {
            id: id.map(str::to_string),
            snippet: Some(Snippet {
                title: title.map(str::to_string),
                channel_title: Some("Channel".to_string()),
                ..Snippet::default()
            }),
        }
    }

    #[test]
    fn flattens_snippet_fields() {
        let records = normalize_videos(vec![item(Some("v1"), Some("Great day"))]).expect("ok");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "v1");
        assert_eq!(records[0].title, "Great day");
        assert_eq!(records[0].channel_title.as_deref(), Some("Channel"));
    }

    #[test]
    fn preserves_input_order() {
        let records = normalize_videos(vec![
            item(Some("b"), Some("second")),
            item(Some("a"), Some("first")),
        ])
        .expect("ok");
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = normalize_videos(vec![
            item(Some("dup"), Some("one")),
            item(Some("other"), Some("two")),
            item(Some("dup"), Some("three")),
        ])
        .unwrap_err();
        assert!(matches!(err, YoutubeError::DuplicateId(ref id) if id == "dup"));
    }

    #[test]
    fn rejects_missing_id() {
        let err = normalize_videos(vec![item(Some("ok"), Some("t")), item(None, Some("t"))])
            .unwrap_err();
        assert!(matches!(err, YoutubeError::MissingId { index: 1 }));
    }

    #[test]
    fn rejects_blank_id() {
        let err = normalize_videos(vec![item(Some("  "), Some("t"))]).unwrap_err();
        assert!(matches!(err, YoutubeError::MissingId { index: 0 }));
    }

    #[test]
    fn rejects_missing_title() {
        let err = normalize_videos(vec![item(Some("v1"), None)]).unwrap_err();
        assert!(matches!(err, YoutubeError::MissingTitle { ref video_id } if video_id == "v1"));
    }

    #[test]
    fn rejects_missing_snippet() {
        let raw = VideoItem {
            id: Some("v1".to_string()),
            snippet: None,
        };
        assert!(matches!(
            normalize_videos(vec![raw]),
            Err(YoutubeError::MissingTitle { .. })
        ));
    }

    #[test]
    fn keeps_unicode_titles_untouched() {
        let title = "🔥 Ça va? 今日は最高 🎉";
        let records = normalize_videos(vec![item(Some("v1"), Some(title))]).expect("ok");
        assert_eq!(records[0].title, title);
    }

    #[test]
    fn empty_batch_is_ok() {
        assert!(normalize_videos(Vec::new()).expect("ok").is_empty());
    }
}
