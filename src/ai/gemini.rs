use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::ai::image::ImageData;
use crate::orchestrator::GenerativeBackend;

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send `prompt` (and `image`, if any) and return the first candidate's text.
    ///
    /// `Ok(None)` means the model answered without any usable text.
    #[instrument(level = "trace", skip(self, image), fields(model = %self.model))]
    pub async fn generate_content(
        &self,
        prompt: &str,
        image: Option<&ImageData>,
    ) -> Result<Option<String>> {
        let mut parts = vec![Part::Text { text: prompt }];
        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type(),
                    data: image.to_base64(),
                },
            });
        }
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
        };

        let url = self.endpoint();
        debug!(url, with_image = image.is_some(), "sending generateContent request");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err_text = resp.text().await.unwrap_or_default();
            warn!(%status, "Gemini API error");
            let message = serde_json::from_str::<ErrorEnvelope>(&err_text)
                .map(|e| e.error.message)
                .unwrap_or(err_text);
            return Err(anyhow!("Gemini API error {status}: {message}"));
        }

        let raw = resp.text().await?;
        trace!(raw = %raw, "generateContent response");
        let parsed: GenerateContentResponse = serde_json::from_str(&raw)?;
        Ok(first_candidate_text(parsed))
    }
}

/// Text of the first part of the first candidate.
fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text = content.parts.into_iter().next()?.text?;
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, prompt: &str, image: Option<&ImageData>) -> Result<Option<String>> {
        self.generate_content(prompt, image).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Option<String> {
        first_candidate_text(serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn reads_first_part_of_first_candidate() {
        let raw = r#"{"candidates":[
            {"content":{"parts":[{"text":"Hello Rome"},{"text":" and more"}]}},
            {"content":{"parts":[{"text":"ignored"}]}}
        ]}"#;
        assert_eq!(parse(raw).as_deref(), Some("Hello Rome"));
    }

    #[test]
    fn blocked_or_blank_answers_are_absent() {
        assert_eq!(parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#), None);
        assert_eq!(parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#), None);
        assert_eq!(
            parse(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#),
            None
        );
    }

    #[test]
    fn request_body_uses_inline_data() {
        let image = ImageData::new(b"img".to_vec());
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text { text: "hi" },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type(),
                            data: image.to_base64(),
                        },
                    },
                ],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/jpeg"
        );
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["data"], "aW1n");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = GeminiClient::new("k", "m", "http://localhost:1234/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/m:generateContent"
        );
    }
}
