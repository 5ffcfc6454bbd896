// The HTTP completion client against a local mock endpoint

mod common;

use common::mock_server::{MockResponse, MockServer};
use folio::config::AiConfig;
use folio::services::ai::{
    AiError, AiQueryResult, ChatMessage, CompletionBackend, CompletionRequest, Confidence,
    OpenAiClient,
};
use std::time::Duration;

fn client_for(server: &MockServer) -> OpenAiClient {
    common::tracing::init_tracing_from_env();
    OpenAiClient::new(
        &server.base_url,
        "test/model",
        Some("sk-test".to_string()),
        Duration::from_secs(5),
    )
}

fn request() -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system("Answer in JSON."),
            ChatMessage::user("What does he do?"),
        ],
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_success_returns_first_choice_content() {
    let content = r#"{"answer":"Leads AI at HighLevel","confidence":"high","sources_used":["experience"]}"#;
    let server = MockServer::start(MockResponse::completion(content));
    let client = client_for(&server);

    let raw = client.complete(request()).await.unwrap();
    assert_eq!(raw, content);

    let parsed = AiQueryResult::parse(&raw);
    assert_eq!(parsed.confidence, Confidence::High);
    assert_eq!(parsed.sources_used, vec!["experience"]);
}

#[test]
fn test_request_shape() {
    let server = MockServer::start(MockResponse::completion("{}"));
    let client = client_for(&server).with_sampling(0.5, 256);

    client.complete_blocking(&request()).unwrap();
    let seen = server.next_request().expect("server saw the request");

    assert_eq!(seen.url, "/v1/chat/completions");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer sk-test"));
    assert_eq!(seen.body["model"], "test/model");
    assert_eq!(seen.body["max_tokens"], 256);
    assert_eq!(seen.body["temperature"], 0.5);
    assert_eq!(seen.body["response_format"]["type"], "json_object");

    let messages = seen.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "What does he do?");
}

#[test]
fn test_status_codes_are_classified() {
    let cases = [
        (401, r#"{"error":{"message":"No auth credentials found"}}"#),
        (429, r#"{"error":{"message":"Rate limit exceeded"}}"#),
        (400, r#"{"error":{"message":"max_tokens too large"}}"#),
        (502, r#"{"error":{"message":"Provider returned error"}}"#),
    ];

    let mut errors = Vec::new();
    for (status, body) in cases {
        let server = MockServer::start(MockResponse::new(status, body));
        errors.push(client_for(&server).complete_blocking(&request()).unwrap_err());
    }

    assert_eq!(errors[0], AiError::Unauthorized);
    assert_eq!(errors[1], AiError::RateLimited);
    assert_eq!(
        errors[2],
        AiError::BadRequest("max_tokens too large".to_string())
    );
    assert_eq!(
        errors[3],
        AiError::Status {
            code: 502,
            message: "Provider returned error".to_string(),
        }
    );
    assert_eq!(
        errors[3].user_message(),
        "Error: Failed to get AI response: Provider returned error"
    );
}

#[test]
fn test_success_without_choices_is_invalid() {
    let server = MockServer::start(MockResponse::new(200, r#"{"choices":[]}"#));
    let err = client_for(&server).complete_blocking(&request()).unwrap_err();
    assert!(matches!(err, AiError::InvalidResponse(_)));
}

#[test]
fn test_unreachable_endpoint_is_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = OpenAiClient::new(
        &format!("http://127.0.0.1:{}/v1", port),
        "m",
        Some("k".to_string()),
        Duration::from_secs(2),
    );

    let err = client.complete_blocking(&request()).unwrap_err();
    assert!(matches!(err, AiError::Transport(_)));
    assert!(err.user_message().starts_with("Error: Failed to get AI response"));
}

#[test]
fn test_missing_key_never_reaches_the_server() {
    let server = MockServer::start(MockResponse::completion("{}"));
    let config = AiConfig {
        base_url: server.base_url.clone(),
        api_key_env: "FOLIO_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        ..AiConfig::default()
    };

    let client = OpenAiClient::from_config(&config);
    assert_eq!(
        client.complete_blocking(&request()),
        Err(AiError::Unauthorized)
    );
    assert!(server
        .next_request_within(Duration::from_millis(300))
        .is_none());
}
