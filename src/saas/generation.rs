//! SaaS generation wrapper — `(tool_id, inputs)` in, display text out.

use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::error;

use crate::content;
use crate::llm::{GenerationRequest, InlineData, TextGenerator};

use super::tools::tool_prompt;

/// Shown when no generation API key is configured.
pub const MISSING_CONFIG_FALLBACK: &str =
    "SYSTEM ERROR: API Configuration Missing. Please check your environment variables.";
/// Shown when the endpoint answers with nothing.
pub const EMPTY_FALLBACK: &str = "Analysis complete. Review data.";
/// Shown when the call fails.
pub const ERROR_FALLBACK: &str = "Error generating content. Please check inputs and try again.";

/// Operator inputs for one generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationInputs {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: String,
    /// Base64 data URL of an uploaded site image.
    #[serde(default)]
    pub image: Option<String>,
}

static DATA_URL_MIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:(.*?);base64,").expect("static regex compiles"));

/// Split a base64 data URL into its mime type and raw payload.
/// Unknown headers default to `image/png`.
pub fn parse_data_url(data_url: &str) -> InlineData {
    let mime_type = DATA_URL_MIME
        .captures(data_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "image/png".to_string());
    let data = data_url
        .split_once(',')
        .map(|(_, payload)| payload.to_string())
        .unwrap_or_else(|| data_url.to_string());
    InlineData { mime_type, data }
}

/// The per-tool generation wrapper. Every failure path collapses to a
/// fixed sentence.
pub struct SaasGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl SaasGenerator {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub async fn generate(&self, tool_id: &str, inputs: &GenerationInputs) -> String {
        let Some(generator) = &self.generator else {
            return MISSING_CONFIG_FALLBACK.to_string();
        };

        let tool = tool_prompt(tool_id, &inputs.title, &inputs.details);
        let mut request = GenerationRequest::from_text(tool.prompt)
            .with_temperature(0.7)
            .with_max_output_tokens(2000);
        if !tool.instruction.is_empty() {
            request = request.with_system_instruction(tool.instruction);
        }

        let accepts_image = content::find_tool(tool_id).is_some_and(|t| t.accepts_image);
        if accepts_image {
            if let Some(image) = &inputs.image {
                request = request.with_inline_data(parse_data_url(image));
            }
        }

        match generator.generate(request).await {
            Ok(text) if text.trim().is_empty() => EMPTY_FALLBACK.to_string(),
            Ok(text) => text,
            Err(e) => {
                error!(tool_id, error = %e, "SaaS generation failed");
                ERROR_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_configuration_short_circuits() {
        let generator = SaasGenerator::new(None);
        let inputs = GenerationInputs {
            title: "Smith v. State".into(),
            details: "self-defense".into(),
            image: None,
        };
        assert_eq!(
            generator.generate("legal", &inputs).await,
            MISSING_CONFIG_FALLBACK
        );
    }

    #[test]
    fn data_url_mime_is_sniffed() {
        let inline = parse_data_url("data:image/jpeg;base64,Zm9vYmFy");
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(inline.data, "Zm9vYmFy");
    }

    #[test]
    fn headerless_payload_defaults_to_png() {
        let inline = parse_data_url("Zm9vYmFy");
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "Zm9vYmFy");
    }
}
