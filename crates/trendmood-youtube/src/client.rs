//! HTTP client for the `YouTube` Data API v3 `videos.list` endpoint.
//!
//! Wraps `reqwest` with API key handling, typed response deserialization,
//! and the cursor walk over the most-popular chart. Requests are not
//! retried: any failure is returned to the caller.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::YoutubeError;
use crate::types::{ApiErrorEnvelope, VideoItem, VideoListResponse};

/// Maximum number of pages to fetch before returning an error.
/// Prevents infinite loops on cycling cursors.
pub const MAX_PAGES: usize = 50;

/// Error reasons that mean "come back later" rather than "you are wrong".
const QUOTA_REASONS: &[&str] = &["quotaExceeded", "dailyLimitExceeded", "rateLimitExceeded"];

/// Client for the `YouTube` Data API.
///
/// Construct with [`YoutubeClient::with_base_url`]; production callers pass
/// [`trendmood_core::config::DEFAULT_YOUTUBE_BASE_URL`], tests pass a mock server.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`YoutubeError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("trendmood/0.1 (trending-sentiment)")
            .build()?;

        // Exactly one trailing slash, so joining "videos" appends a segment
        // instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches one page of the most-popular chart for `region_code`.
    ///
    /// `page_token` of `None` requests the first page (sent as an empty
    /// `pageToken`).
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::QuotaExceeded`] when the API reports a quota reason.
    /// - [`YoutubeError::Api`] for any other non-2xx status.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_page(
        &self,
        region_code: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<VideoListResponse, YoutubeError> {
        let page_size = page_size.to_string();
        let url = self.build_url(
            "videos",
            &[
                ("part", "snippet"),
                ("chart", "mostPopular"),
                ("maxResults", &page_size),
                ("regionCode", region_code),
                ("pageToken", page_token.unwrap_or("")),
            ],
        )?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: format!(
                "videos.list(regionCode={region_code}, pageToken={:?})",
                page_token.unwrap_or("")
            ),
            source: e,
        })
    }

    /// Fetches the most-popular chart by following `nextPageToken` until the
    /// API stops returning one, or until `max_videos` items are collected.
    ///
    /// Items keep the order the API returned them in. The result is
    /// truncated to `max_videos`. A page with no items and no cursor ends the
    /// walk normally.
    ///
    /// **All-or-nothing semantics**: a failure on any page discards the
    /// pages already fetched and returns the error.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_page`].
    /// Returns [`YoutubeError::PaginationLimit`] if more than [`MAX_PAGES`]
    /// pages would be needed.
    pub async fn fetch_most_popular(
        &self,
        region_code: &str,
        page_size: u32,
        max_videos: usize,
    ) -> Result<Vec<VideoItem>, YoutubeError> {
        let mut all_items: Vec<VideoItem> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(YoutubeError::PaginationLimit {
                    max_pages: MAX_PAGES,
                });
            }

            let page = self
                .fetch_page(region_code, page_size, cursor.as_deref())
                .await?;

            tracing::debug!(
                region = region_code,
                page = page_count,
                items = page.items.len(),
                has_next = page.next_page_token.is_some(),
                "fetched most-popular page"
            );

            all_items.extend(page.items);

            if all_items.len() >= max_videos {
                all_items.truncate(max_videos);
                break;
            }

            cursor = page.next_page_token.filter(|token| !token.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        tracing::info!(
            region = region_code,
            pages = page_count,
            videos = all_items.len(),
            "collected most-popular chart"
        );

        Ok(all_items)
    }

    /// Builds the request URL for `endpoint` with percent-encoded query
    /// parameters. The API key is always appended last.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }
}

/// Maps a non-2xx response to a typed error, reading the Google error
/// envelope when the body carries one.
fn api_error(status: StatusCode, body: &str) -> YoutubeError {
    let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) else {
        return YoutubeError::Api {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
    };

    let message = envelope
        .error
        .message
        .unwrap_or_else(|| "unknown error".to_string());

    let quota_hit = envelope.error.errors.iter().any(|detail| {
        detail
            .reason
            .as_deref()
            .is_some_and(|reason| QUOTA_REASONS.contains(&reason))
    });

    if quota_hit {
        YoutubeError::QuotaExceeded(message)
    } else {
        YoutubeError::Api {
            status: envelope.error.code.unwrap_or(status.as_u16()),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendmood_core::config::DEFAULT_YOUTUBE_BASE_URL;

    fn test_client(base_url: &str) -> YoutubeClient {
        YoutubeClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_targets_videos_endpoint() {
        let client = test_client(DEFAULT_YOUTUBE_BASE_URL);
        let url = client
            .build_url("videos", &[("part", "snippet"), ("pageToken", "")])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/videos?part=snippet&pageToken=&key=test-key"
        );
    }

    #[test]
    fn build_url_handles_base_without_trailing_slash() {
        let client = test_client("http://127.0.0.1:8080/youtube/v3");
        let url = client.build_url("videos", &[]).expect("url");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/youtube/v3/videos?key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_cursor() {
        let client = test_client(DEFAULT_YOUTUBE_BASE_URL);
        let url = client
            .build_url("videos", &[("pageToken", "a+b/c=")])
            .expect("url");
        assert!(
            url.as_str().contains("pageToken=a%2Bb%2Fc%3D"),
            "cursor should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = YoutubeClient::with_base_url("k", 5, "not a url");
        assert!(matches!(result, Err(YoutubeError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn api_error_maps_quota_reason() {
        let body = r#"{"error": {"code": 403, "message": "The request cannot be completed because you have exceeded your quota.", "errors": [{"reason": "quotaExceeded"}]}}"#;
        let err = api_error(StatusCode::FORBIDDEN, body);
        assert!(matches!(err, YoutubeError::QuotaExceeded(_)), "got {err:?}");
    }

    #[test]
    fn api_error_maps_other_reasons_to_api() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "errors": [{"reason": "keyInvalid"}]}}"#;
        let err = api_error(StatusCode::BAD_REQUEST, body);
        assert!(
            matches!(err, YoutubeError::Api { status: 400, ref message } if message == "API key not valid."),
            "got {err:?}"
        );
    }

    #[test]
    fn api_error_without_envelope_uses_status() {
        let err = api_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(
            matches!(err, YoutubeError::Api { status: 502, ref message } if message == "Bad Gateway"),
            "got {err:?}"
        );
    }
}
