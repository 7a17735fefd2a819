//! Hosted text-classification model behind the Hugging Face inference API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use trendmood_core::SentimentLabel;

use super::{Classification, SentimentClassifier};
use crate::error::SentimentError;

/// HTTP client for a text-classification inference endpoint.
///
/// The default endpoint serves `distilbert-base-uncased-finetuned-sst-2-english`,
/// which labels text `POSITIVE` or `NEGATIVE`.
pub struct HuggingFaceClassifier {
    client: Client,
    url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    /// Block until a cold model is loaded instead of returning 503.
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The endpoint answers `[[{label, score}, ...]]` for a single input; some
/// deployments drop the outer list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl HuggingFaceClassifier {
    /// Create a classifier for `url`, sending `token` as a bearer token when set.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(url: &str, token: Option<&str>, timeout_secs: u64) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("trendmood/0.1 (trending-sentiment)")
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            token: token.map(str::to_string),
        })
    }

    async fn request(&self, text: &str) -> Result<Classification, SentimentError> {
        let request = ClassifyRequest {
            inputs: text,
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(SentimentError::Classifier(format!(
                "classifier returned status {status}: {detail}"
            )));
        }

        let parsed: ClassifyResponse = serde_json::from_str(&body).map_err(|e| {
            SentimentError::Classifier(format!("classifier response parse error: {e}"))
        })?;

        pick_top(parsed)
    }
}

impl SentimentClassifier for HuggingFaceClassifier {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn classify(&self, text: &str) -> Result<Classification, SentimentError> {
        self.request(text).await
    }
}

/// Keeps the highest-scoring label of the (single) input.
fn pick_top(response: ClassifyResponse) -> Result<Classification, SentimentError> {
    let scores = match response {
        ClassifyResponse::Nested(mut outer) => {
            if outer.is_empty() {
                return Err(SentimentError::EmptyResponse);
            }
            outer.swap_remove(0)
        }
        ClassifyResponse::Flat(scores) => scores,
    };

    let top = scores
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or(SentimentError::EmptyResponse)?;

    let label: SentimentLabel = top.label.parse()?;
    if !(0.0..=1.0).contains(&top.score) {
        return Err(SentimentError::InvalidConfidence(top.score));
    }

    Ok(Classification {
        label,
        confidence: top.score,
    })
}
