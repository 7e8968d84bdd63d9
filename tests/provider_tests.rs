// tests for provider adapters against a mock endpoint

use mockito::Matcher;
use serde_json::json;

use solace::Error;
use solace::Turn;
use solace::core::ProviderRequest;
use solace::core::ai::{self, Provider, ProviderSettings};

fn settings(provider: Provider, base_url: String) -> ProviderSettings {
    ProviderSettings {
        api_key: Some("test-key".into()),
        base_url: Some(base_url),
        ..ProviderSettings::new(provider)
    }
}

fn request() -> ProviderRequest {
    ProviderRequest {
        system_prompt: "be gentle".into(),
        turns: vec![Turn::user("A"), Turn::assistant("B"), Turn::user("C")],
        temperature: 0.5,
        max_output_tokens: 300,
    }
}

#[tokio::test]
async fn test_openai_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 300,
            "messages": [
                { "role": "system", "content": "be gentle" },
                { "role": "user", "content": "A" },
                { "role": "assistant", "content": "B" },
                { "role": "user", "content": "C" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"I'm listening."}}]}"#)
        .create_async()
        .await;

    let adapter = ai::connect(&settings(Provider::OpenAI, server.url())).unwrap();
    let reply = adapter.generate(&request()).await.unwrap();

    assert_eq!(reply, "I'm listening.");
    assert_eq!(adapter.name(), "openai");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_claude_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test-key")
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::PartialJson(json!({
            "system": "be gentle",
            "max_tokens": 300,
            "messages": [
                { "role": "user", "content": "A" },
                { "role": "assistant", "content": "B" },
                { "role": "user", "content": "C" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content":[{"type":"text","text":"Take your time."}]}"#)
        .create_async()
        .await;

    let adapter = ai::connect(&settings(Provider::Claude, server.url())).unwrap();
    let reply = adapter.generate(&request()).await.unwrap();

    assert_eq!(reply, "Take your time.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "systemInstruction": { "parts": [{ "text": "be gentle" }] },
            "contents": [
                { "role": "user", "parts": [{ "text": "A" }] },
                { "role": "model", "parts": [{ "text": "B" }] },
                { "role": "user", "parts": [{ "text": "C" }] }
            ],
            "generationConfig": { "maxOutputTokens": 300 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"I hear "},{"text":"you."}]}}]}"#)
        .create_async()
        .await;

    let adapter = ai::connect(&settings(Provider::Gemini, server.url())).unwrap();
    let reply = adapter.generate(&request()).await.unwrap();

    assert_eq!(reply, "I hear you.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_model_override_is_used() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({ "model": "local-llama" })))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"hi"}}]}"#)
        .create_async()
        .await;

    let mut settings = settings(Provider::OpenAI, format!("{}/", server.url()));
    settings.model = Some("local-llama".into());

    let adapter = ai::connect(&settings).unwrap();
    assert_eq!(adapter.model(), "local-llama");
    assert_eq!(adapter.generate(&request()).await.unwrap(), "hi");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_provider_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"bad key"}}"#)
        .create_async()
        .await;

    let adapter = ai::connect(&settings(Provider::OpenAI, server.url())).unwrap();
    let err = adapter.generate(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Provider(ref msg) if msg.contains("401")));
    assert!(err.is_provider());
}

#[tokio::test]
async fn test_malformed_body_is_provider_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/messages")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let adapter = ai::connect(&settings(Provider::Claude, server.url())).unwrap();
    let err = adapter.generate(&request()).await.unwrap_err();

    assert!(err.is_provider());
}

#[tokio::test]
async fn test_empty_choices_is_provider_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let adapter = ai::connect(&settings(Provider::OpenAI, server.url())).unwrap();
    let err = adapter.generate(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Provider(_)));
}

#[tokio::test]
async fn test_blocked_gemini_candidate_is_provider_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_body(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
        .create_async()
        .await;

    let adapter = ai::connect(&settings(Provider::Gemini, server.url())).unwrap();
    let err = adapter.generate(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Provider(_)));
}

#[test]
fn test_missing_key_is_config_error() {
    // only meaningful when the machine has no gemini key around
    if Provider::Gemini.api_key_from_env().is_some() {
        return;
    }

    let settings = ProviderSettings {
        api_key: Some("   ".into()),
        ..ProviderSettings::new(Provider::Gemini)
    };

    let err = match ai::connect(&settings) {
        Ok(_) => panic!("connect should fail without a key"),
        Err(e) => e,
    };
    assert!(matches!(err, Error::MissingApiKey { provider: "gemini", .. }));
    assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_provider_defaults() {
    assert_eq!(Provider::OpenAI.default_model(), "gpt-4o-mini");
    assert_eq!(Provider::Claude.key_vars()[0], "ANTHROPIC_API_KEY");
    assert_eq!(ProviderSettings::new(Provider::Gemini).model(), "gemini-2.0-flash");
}
