//! Integration tests for `HuggingFaceClassifier` using wiremock HTTP mocks.

use serde_json::json;
use trendmood_core::SentimentLabel;
use trendmood_sentiment::{HuggingFaceClassifier, SentimentClassifier, SentimentError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/distilbert-base-uncased-finetuned-sst-2-english";

fn classifier(server: &MockServer, token: Option<&str>) -> HuggingFaceClassifier {
    HuggingFaceClassifier::new(&format!("{}{MODEL_PATH}", server.uri()), token, 5)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn classify_posts_title_and_returns_top_label() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("authorization", "Bearer hf_test"))
        .and(body_partial_json(json!({"inputs": "Great day"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            {"label": "POSITIVE", "score": 0.95},
            {"label": "NEGATIVE", "score": 0.05}
        ]])))
        .expect(1)
        .mount(&server)
        .await;

    let out = classifier(&server, Some("hf_test"))
        .classify("Great day")
        .await
        .expect("classification should succeed");

    assert_eq!(out.label, SentimentLabel::Positive);
    assert!((out.confidence - 0.95).abs() < 1e-12);
}

#[tokio::test]
async fn classify_sends_emoji_and_non_latin_titles_verbatim() {
    let server = MockServer::start().await;
    let title = "🔥 最高の一日 — Ça marche!";

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({"inputs": title})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([[{"label": "NEGATIVE", "score": 0.61}]])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let out = classifier(&server, None)
        .classify(title)
        .await
        .expect("unicode titles should classify");
    assert_eq!(out.label, SentimentLabel::Negative);
}

#[tokio::test]
async fn model_error_status_maps_to_classifier_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "Model is currently loading",
            "estimated_time": 20.0
        })))
        .mount(&server)
        .await;

    let err = classifier(&server, None).classify("x").await.unwrap_err();
    assert!(
        matches!(err, SentimentError::Classifier(ref msg) if msg.contains("Model is currently loading")),
        "got {err:?}"
    );
}

#[tokio::test]
async fn garbage_body_maps_to_classifier_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let err = classifier(&server, None).classify("x").await.unwrap_err();
    assert!(matches!(err, SentimentError::Classifier(_)), "got {err:?}");
}

#[tokio::test]
async fn unknown_label_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([[{"label": "LABEL_1", "score": 0.9}]])),
        )
        .mount(&server)
        .await;

    let err = classifier(&server, None).classify("x").await.unwrap_err();
    assert!(matches!(err, SentimentError::UnknownLabel(_)), "got {err:?}");
}
