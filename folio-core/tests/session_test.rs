use folio_core::{
    ApiClient, ChatSession, CompletionOutcome, Role, SessionState, CONNECTIVITY_FALLBACK,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn chat_server(template: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(template)
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_conversation_against_backend() {
    let mock_server =
        chat_server(ResponseTemplate::new(200).set_body_json(json!({"response": "hello"}))).await;
    let mut session = ChatSession::new(Arc::new(ApiClient::new(mock_server.uri())));

    assert_eq!(session.submit("hi").await, Some(CompletionOutcome::Replied));
    assert_eq!(session.submit("and again").await, Some(CompletionOutcome::Replied));

    let roles: Vec<_> = session.transcript().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let second: serde_json::Value = requests[1].body_json().unwrap();
    assert_eq!(second["message"], "and again");
    assert_eq!(second["history"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_server_failure_then_retry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"error": "rate limited"})))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "recovered"})))
        .mount(&mock_server)
        .await;

    let mut session = ChatSession::new(Arc::new(ApiClient::new(mock_server.uri())));

    assert_eq!(session.submit("hi").await, Some(CompletionOutcome::Failed));
    assert_eq!(session.error(), Some("rate limited"));
    assert_eq!(session.transcript().len(), 1);

    assert_eq!(session.retry().await, Some(CompletionOutcome::Replied));
    assert!(session.error().is_none());

    let transcript = session.transcript();
    assert_eq!(transcript.last().unwrap().content, "recovered");
    assert_eq!(transcript.last().unwrap().role, Role::Assistant);
}

#[tokio::test]
async fn test_unreachable_backend_sets_connectivity_error() {
    let mut session = ChatSession::new(Arc::new(ApiClient::new("http://127.0.0.1:9")));

    assert_eq!(session.submit("anyone?").await, Some(CompletionOutcome::Failed));
    assert_eq!(session.error(), Some(CONNECTIVITY_FALLBACK));
    assert!(session.transcript()[0].is_user());
}

#[tokio::test]
async fn test_in_flight_request_gates_new_submissions() {
    let mock_server = chat_server(
        ResponseTemplate::new(200)
            .set_body_json(json!({"response": "slow reply"}))
            .set_delay(Duration::from_millis(200)),
    )
    .await;
    let mut session = ChatSession::new(Arc::new(ApiClient::new(mock_server.uri())));

    let pending = session.begin_submit("first").unwrap();
    let transport = session.transport();
    let request = pending.clone();
    let handle = tokio::spawn(async move { request.dispatch(transport.as_ref()).await });

    assert!(session.begin_submit("second").is_none());
    assert!(session.begin_submit("third").is_none());
    assert_eq!(
        session.state(),
        SessionState::Sending {
            request_id: pending.request_id
        }
    );

    let response = handle.await.unwrap();
    assert_eq!(
        session.complete(pending.request_id, response.clone()),
        CompletionOutcome::Replied
    );
    assert_eq!(
        session.complete(pending.request_id, response),
        CompletionOutcome::Stale
    );

    assert_eq!(session.transcript().len(), 2);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}
