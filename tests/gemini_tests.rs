//! Generation gateway tests against a mock Gemini endpoint

use serde_json::json;
use tokio_gemini_chat_api::core::gemini::GeminiClient;
use tokio_gemini_chat_api::core::traits::GenerationClient;
use tokio_gemini_chat_api::error::ChatError;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(format!("{}/generate", server.uri()), "test-key".to_owned())
}

#[tokio::test]
async fn test_extracts_first_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Hello from Gemini"}]}},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        })))
        .mount(&server)
        .await;

    let reply = client_for(&server).generate("hi").await.unwrap();
    assert_eq!(reply, "Hello from Gemini");
}

#[tokio::test]
async fn test_sends_prompt_and_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "what is rust"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "a language"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).generate("what is rust").await.unwrap();
    assert_eq!(reply, "a language");
}

#[tokio::test]
async fn test_falls_back_when_no_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let reply = client_for(&server).generate("hi").await.unwrap();
    assert_eq!(reply, "No response");
}

#[tokio::test]
async fn test_falls_back_when_text_field_missing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{}]}}]
        })))
        .mount(&server)
        .await;

    let reply = client_for(&server).generate("hi").await.unwrap();
    assert_eq!(reply, "No response");
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client_for(&server).generate("hi").await;
    assert!(matches!(result, Err(ChatError::Upstream(_))));
}

#[tokio::test]
async fn test_malformed_body_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client_for(&server).generate("hi").await;
    assert!(matches!(result, Err(ChatError::Upstream(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_upstream_error() {
    let client = GeminiClient::new(
        "http://127.0.0.1:1/generate".to_owned(),
        "test-key".to_owned(),
    );

    let result = client.generate("hi").await;
    assert!(matches!(result, Err(ChatError::Upstream(_))));
}
