//! Integration tests for `VisionClient` using wiremock HTTP mocks.

use resnap_vision::{VisionClient, VisionError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(endpoint: &str) -> VisionClient {
    VisionClient::new(endpoint, "azure-key", "gpt-4o", "2024-04-01-preview", 5)
        .expect("client construction should not fail")
}

const COMPLETIONS_PATH: &str = "/openai/deployments/gpt-4o/chat/completions";

#[tokio::test]
async fn describe_image_returns_trimmed_caption() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(query_param("api-version", "2024-04-01-preview"))
        .and(header("api-key", "azure-key"))
        .and(body_string_contains("data:image/png;base64,"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "  Ikea Gunde chair\n" } }
            ]
        })))
        .mount(&server)
        .await;

    let caption = test_client(&server.uri())
        .describe_image(b"\x89PNG....", Some("image/png"))
        .await
        .expect("caption");
    assert_eq!(caption, "Ikea Gunde chair");
}

#[tokio::test]
async fn describe_image_passes_through_unknown_item() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "content": "unknown item" } } ]
        })))
        .mount(&server)
        .await;

    let caption = test_client(&server.uri())
        .describe_image(b"jpeg", None)
        .await
        .expect("caption");
    assert_eq!(caption, "unknown item");
}

#[tokio::test]
async fn describe_image_without_choices_is_empty_caption() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .describe_image(b"jpeg", None)
        .await
        .expect_err("should fail");
    assert!(matches!(err, VisionError::EmptyCaption), "got: {err:?}");
}

#[tokio::test]
async fn describe_image_surfaces_quota_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .describe_image(b"jpeg", None)
        .await
        .expect_err("should fail");
    assert!(
        matches!(err, VisionError::UnexpectedStatus { status: 429, ref body } if body == "rate limit"),
        "got: {err:?}"
    );
}
