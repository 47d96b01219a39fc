//! Chat round trip integration tests
//!
//! Tests for `ChatClient::get_chat_response` against a mocked API:
//! - Outbound request shape (model, system + user messages, auth header)
//! - Reply extraction and trimming
//! - Concurrent use of one shared client

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use parley::{DEFAULT_MODEL, SYSTEM_PROMPT};

use crate::common::{constants::TEST_API_KEY, test_client};
use crate::mocks::{ChatTestData, MockChatApi, CHAT_PATH};

#[tokio::test]
async fn test_star_traveler_reply_is_trimmed() {
    let mock_api = MockChatApi::start().await;
    mock_api.mock_reply(" 🌟 Hello there, star traveler! ").await;

    let client = test_client(&mock_api.base_url());
    let reply = client.get_chat_response("Any prompt").await.unwrap();

    assert_eq!(reply, "🌟 Hello there, star traveler!");
}

#[tokio::test]
async fn test_reply_keeps_internal_whitespace() {
    let mock_api = MockChatApi::start().await;
    mock_api.mock_reply("  hello world  ").await;

    let client = test_client(&mock_api.base_url());
    let reply = client.get_chat_response("greet me").await.unwrap();

    assert_eq!(reply, "hello world");
}

#[tokio::test]
async fn test_request_contains_exactly_system_then_user_message() {
    let mock_api = MockChatApi::start().await;
    mock_api.mock_reply("ok").await;

    let client = test_client(&mock_api.base_url());
    client.get_chat_response("What is Rust?").await.unwrap();

    let bodies = mock_api.received_chat_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({
            "model": DEFAULT_MODEL,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": "What is Rust?"}
            ]
        })
    );
}

#[tokio::test]
async fn test_empty_user_message_is_sent_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_json(json!({
            "model": DEFAULT_MODEL,
            "messages": [
                {"role": "system", "content": "You are a helpful assistant."},
                {"role": "user", "content": ""}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ChatTestData::completion(&["Hi!"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    let reply = client.get_chat_response("").await.unwrap();

    assert_eq!(reply, "Hi!");
}

#[tokio::test]
async fn test_bearer_credential_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("Authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(ChatTestData::completion(&["yes"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    assert_eq!(client.get_chat_response("auth?").await.unwrap(), "yes");
}

#[tokio::test]
async fn test_only_first_choice_is_used() {
    let mock_api = MockChatApi::start().await;
    mock_api
        .mock_success_body(ChatTestData::completion(&[" first ", "second", "third"]))
        .await;

    let client = test_client(&mock_api.base_url());
    assert_eq!(client.get_chat_response("pick one").await.unwrap(), "first");
}

#[tokio::test]
async fn test_calls_do_not_accumulate_history() {
    let mock_api = MockChatApi::start().await;
    mock_api.mock_reply("reply").await;

    let client = test_client(&mock_api.base_url());
    client.get_chat_response("first question").await.unwrap();
    client.get_chat_response("second question").await.unwrap();

    let bodies = mock_api.received_chat_bodies().await;
    assert_eq!(bodies.len(), 2);
    for (body, expected) in bodies.iter().zip(["first question", "second question"]) {
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1]["content"], expected);
    }
}

#[tokio::test]
async fn test_shared_client_serves_concurrent_callers() {
    let mock_api = MockChatApi::start().await;
    mock_api.mock_reply(" concurrent ").await;

    let client = Arc::new(test_client(&mock_api.base_url()));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get_chat_response(&format!("prompt {}", i)).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "concurrent");
    }
    assert_eq!(mock_api.received_chat_bodies().await.len(), 8);
}
