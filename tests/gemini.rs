use travelbot::ai::gemini::GeminiClient;
use travelbot::ai::image::ImageData;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

#[tokio::test]
async fn generate_content_returns_first_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "k"))
        .and(|req: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            body["contents"][0]["parts"][0]["text"] == "Tell me about Leith"
                && body["contents"][0]["parts"].as_array().map(Vec::len) == Some(1)
        })
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"**Leith** is a port."}]}}]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new("k", "gemini-test", &server.uri());
    let text = client
        .generate_content("Tell me about Leith", None)
        .await
        .unwrap();
    assert_eq!(text.as_deref(), Some("**Leith** is a port."));
}

#[tokio::test]
async fn generate_content_sends_inline_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(|req: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            let image = &body["contents"][0]["parts"][1]["inlineData"];
            image["mimeType"] == "image/png" && image["data"] == "iVBORw0KGgo="
        })
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"candidates":[{"content":{"parts":[{"text":"A bridge"}]}}]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new("k", "gemini-test", &server.uri());
    let image = ImageData::new(b"\x89PNG\r\n\x1a\n".to_vec());
    let text = client
        .generate_content("What is this?", Some(&image))
        .await
        .unwrap();
    assert_eq!(text.as_deref(), Some("A bridge"));
}

#[tokio::test]
async fn generate_content_without_candidates_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let client = GeminiClient::new("k", "gemini-test", &server.uri());
    assert_eq!(client.generate_content("hi", None).await.unwrap(), None);
}

#[tokio::test]
async fn generate_content_reports_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_raw(
            r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let client = GeminiClient::new("bad", "gemini-test", &server.uri());
    let err = client.generate_content("hi", None).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("400"), "{message}");
    assert!(message.contains("API key not valid."), "{message}");
}
