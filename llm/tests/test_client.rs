use dialog::Turn;
use httpmock::Method::POST;
use httpmock::MockServer;
use llm::{CompletionOptions, LLMClient, LLMError, OpenAIClient, Usage};

const CHAT_BODY: &str = r#"{
    "id": "chatcmpl-1",
    "object": "chat.completion",
    "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello!"}, "finish_reason": "stop"}],
    "usage": {"prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12}
}"#;

#[tokio::test]
async fn chat_completion_returns_content_and_usage() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .header("authorization", "Bearer sk-test")
            .json_body_partial(
                r#"{"model": "gpt-3.5-turbo", "max_tokens": 512, "messages": [{"role": "system", "content": "SP"}, {"role": "user", "content": "Hi"}]}"#,
            );
        then.status(200)
            .header("content-type", "application/json")
            .body(CHAT_BODY);
    });

    let client = OpenAIClient::new(server.base_url(), "sk-test");
    let out = client
        .chat_completion(
            &[Turn::system("SP"), Turn::user("Hi")],
            &CompletionOptions::default(),
        )
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(out.content, "Hello!");
    assert_eq!(
        out.usage,
        Usage {
            prompt_tokens: 9,
            completion_tokens: 3,
            total_tokens: 12
        }
    );
}

#[tokio::test]
async fn complete_posts_flat_prompt() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/completions")
            .json_body_partial(r#"{"model": "llama-2-7b-chat", "prompt": "<s>[INST] Hi [/INST]"}"#);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"choices": [{"text": " Hello", "index": 0}], "usage": {"prompt_tokens": 5, "completion_tokens": 1, "total_tokens": 6}}"#);
    });

    let client = OpenAIClient::new(format!("{}/", server.base_url()), "sk-test");
    let out = client
        .complete("<s>[INST] Hi [/INST]", &CompletionOptions::new("llama-2-7b-chat"))
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(out.content, " Hello");
    assert_eq!(out.usage.total_tokens, 6);
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#);
    });

    let client = OpenAIClient::new(server.base_url(), "bad");
    let err = client
        .chat_completion(&[Turn::user("Hi")], &CompletionOptions::default())
        .await
        .unwrap_err();
    match err {
        LLMError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_invalid_response() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"choices": []}"#);
    });

    let client = OpenAIClient::new(server.base_url(), "sk-test");
    let err = client
        .chat_completion(&[Turn::user("Hi")], &CompletionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::InvalidResponse));
}

#[tokio::test]
async fn missing_usage_defaults_to_zero() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"choices": [{"message": {"role": "assistant", "content": "ok"}}]}"#);
    });

    let client = OpenAIClient::new(server.base_url(), "sk-test");
    let out = client
        .chat_completion(&[Turn::user("Hi")], &CompletionOptions::default())
        .await
        .unwrap();
    assert_eq!(out.content, "ok");
    assert_eq!(out.usage, Usage::default());
}
