use super::*;

#[test]
fn body_carries_parts_and_generation_config() {
    let req = GenerateRequest {
        parts: vec![
            Part::Text("hi".into()),
            Part::InlineImage {
                mime: "image/jpeg".into(),
                data: "QUJD".into(),
            },
        ],
        temperature: Some(1.2),
        max_output_tokens: Some(60),
        response_schema: None,
    };
    let body = request_body(&req);
    assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
    assert_eq!(
        body["contents"][0]["parts"][1]["inlineData"]["mimeType"],
        "image/jpeg"
    );
    assert_eq!(body["contents"][0]["parts"][1]["inlineData"]["data"], "QUJD");
    assert_eq!(body["generationConfig"]["temperature"], 1.2);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 60);
    assert!(body["generationConfig"].get("responseMimeType").is_none());
}

#[test]
fn schema_switches_to_json_output() {
    let req = GenerateRequest {
        response_schema: Some(json!({"type": "OBJECT"})),
        ..GenerateRequest::text("classify")
    };
    let body = request_body(&req);
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
}

#[test]
fn plain_text_request_has_no_generation_config() {
    let body = request_body(&GenerateRequest::text("x"));
    assert!(body.get("generationConfig").is_none());
}

#[test]
fn response_text_joins_parts() {
    let v = json!({
        "candidates": [{ "content": { "parts": [{ "text": "Sniff " }, { "text": "sniff." }] } }]
    });
    assert_eq!(response_text(&v).unwrap(), "Sniff sniff.");
}

#[test]
fn response_errors_are_remote() {
    for v in [
        json!({ "error": { "message": "quota" } }),
        json!({ "candidates": [] }),
        json!({ "candidates": [{ "content": { "parts": [{ "inlineData": {} }] } }] }),
        json!({}),
    ] {
        assert!(matches!(response_text(&v), Err(DogViewError::Remote(_))), "{v}");
    }
}

#[test]
fn gemini_client_needs_a_key() {
    let err = GeminiClient::new(GeminiConfig::default()).err().unwrap();
    assert!(matches!(err, DogViewError::Validation(_)));

    let client = GeminiClient::new(GeminiConfig {
        api_key: Some("k".into()),
        ..GeminiConfig::default()
    })
    .unwrap();
    assert_eq!(client.name(), "gemini");
}

#[tokio::test]
async fn offline_always_fails() {
    let r = OfflineBackend.generate(&GenerateRequest::text("x")).await;
    assert!(matches!(r, Err(DogViewError::Remote(_))));
}

#[tokio::test]
async fn scripted_replays_then_runs_dry() {
    let backend = ScriptedBackend::new([Ok("one".to_owned())]);
    backend.push(Err(DogViewError::remote("boom")));

    assert_eq!(backend.generate(&GenerateRequest::text("a")).await.unwrap(), "one");
    assert!(backend.generate(&GenerateRequest::text("b")).await.is_err());
    assert!(backend.generate(&GenerateRequest::text("c")).await.is_err());

    let seen = backend.requests();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[1].prompt_text(), "b");
}

#[tokio::test]
async fn unreachable_server_is_a_remote_error() {
    let client = GeminiClient::new(GeminiConfig {
        api_key: Some("k".into()),
        base_url: "http://127.0.0.1:1".into(),
        timeout: std::time::Duration::from_secs(2),
        ..GeminiConfig::default()
    })
    .unwrap();
    let r = client.generate(&GenerateRequest::text("x")).await;
    assert!(matches!(r, Err(DogViewError::Remote(_))));
}
