//! HTTP client for the hosted `generateContent` endpoint.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LlmError;
use crate::llm::provider::{GenerationRequest, Part, Role, TextGenerator};

/// Client for the hosted generation endpoint.
///
/// One instance is created at startup and shared process-wide. The
/// underlying `reqwest::Client` pools connections internally.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: SecretString, base_url: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }
}

// ── Wire format ─────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ApiContent>,
    generation_config: ApiGenerationConfig,
    contents: Vec<ApiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ApiTool>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct ApiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<ApiPart>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<ApiInlineData>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiTool {
    google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
}

#[derive(Deserialize)]
struct ApiCandidate {
    content: Option<ApiResponseContent>,
}

#[derive(Deserialize)]
struct ApiResponseContent {
    #[serde(default)]
    parts: Vec<ApiResponsePart>,
}

#[derive(Deserialize)]
struct ApiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

fn role_str(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

fn text_part(text: String) -> ApiPart {
    ApiPart {
        text: Some(text),
        inline_data: None,
    }
}

fn build_body(request: GenerationRequest) -> ApiRequest {
    let mut contents: Vec<ApiContent> = request
        .history
        .into_iter()
        .map(|turn| ApiContent {
            role: Some(role_str(turn.role)),
            parts: vec![text_part(turn.text)],
        })
        .collect();

    let final_parts: Vec<ApiPart> = request
        .parts
        .into_iter()
        .map(|part| match part {
            Part::Text(text) => text_part(text),
            Part::Inline(inline) => ApiPart {
                text: None,
                inline_data: Some(ApiInlineData {
                    mime_type: inline.mime_type,
                    data: inline.data,
                }),
            },
        })
        .collect();
    contents.push(ApiContent {
        role: Some("user"),
        parts: final_parts,
    });

    ApiRequest {
        system_instruction: request.system_instruction.map(|text| ApiContent {
            role: None,
            parts: vec![text_part(text)],
        }),
        generation_config: ApiGenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
        },
        contents,
        tools: request.enable_search.then(|| {
            vec![ApiTool {
                google_search: serde_json::Map::new(),
            }]
        }),
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = build_body(request);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        debug!(chars = text.len(), "Generation response received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::{InlineData, Turn};

    fn body_json(request: GenerationRequest) -> serde_json::Value {
        serde_json::to_value(build_body(request)).unwrap()
    }

    #[test]
    fn body_carries_system_instruction_and_config() {
        let json = body_json(
            GenerationRequest::from_text("audit example.com")
                .with_system_instruction("You are the Scout.")
                .with_temperature(0.7)
                .with_max_output_tokens(1500),
        );
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "You are the Scout."
        );
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1500);
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn history_precedes_final_user_message() {
        let json = body_json(
            GenerationRequest::from_text("and then?")
                .with_history(vec![Turn::user("hello"), Turn::model("hi there")]),
        );
        let contents = json["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "and then?");
    }

    #[test]
    fn search_tool_serializes_as_empty_object() {
        let json = body_json(GenerationRequest::from_text("find plumbers").with_search());
        assert_eq!(json["tools"][0]["googleSearch"], serde_json::json!({}));
    }

    #[test]
    fn inline_data_uses_camel_case_keys() {
        let json = body_json(GenerationRequest::from_text("analyze site").with_inline_data(
            InlineData {
                mime_type: "image/jpeg".into(),
                data: "Zm9v".into(),
            },
        ));
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["text"], "analyze site");
    }
}
