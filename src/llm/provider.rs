//! Generation provider abstraction.
//!
//! The hosted endpoint consumes `{model, systemInstruction, temperature,
//! maxOutputTokens, contents, tools?}` and the service only ever reads the
//! response back as a single block of text, so the trait surface is exactly
//! that: a request in, a `String` out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Conversation role as the generation endpoint understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One conversation turn. Held only in transient widget state; never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Base64 image payload attached to a generation request.
#[derive(Debug, Clone)]
pub struct InlineData {
    pub mime_type: String,
    /// Raw base64 (data-URL header already stripped).
    pub data: String,
}

/// One part of the final user message.
#[derive(Debug, Clone)]
pub enum Part {
    Text(String),
    Inline(InlineData),
}

/// A single combined request to the generation endpoint.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Prior conversation turns, forwarded ahead of the final message.
    pub history: Vec<Turn>,
    /// Parts of the final user message.
    pub parts: Vec<Part>,
    /// Attach the endpoint's search tool.
    pub enable_search: bool,
}

impl GenerationRequest {
    /// A plain text request with the endpoint defaults the site uses.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            temperature: 0.7,
            max_output_tokens: 1024,
            history: Vec::new(),
            parts: vec![Part::Text(text.into())],
            enable_search: false,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_inline_data(mut self, inline: InlineData) -> Self {
        // Image parts go ahead of the prompt text, matching what the
        // endpoint expects for vision prompts.
        self.parts.insert(0, Part::Inline(inline));
        self
    }

    pub fn with_search(mut self) -> Self {
        self.enable_search = true;
        self
    }
}

/// Backend-agnostic text generation interface.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Forward the request and return the response text verbatim.
    /// An empty string is a valid (if useless) response — callers map it
    /// to their own fallback sentence.
    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let req = GenerationRequest::from_text("hello");
        assert!(req.system_instruction.is_none());
        assert!(req.history.is_empty());
        assert!(!req.enable_search);
        assert!(matches!(&req.parts[0], Part::Text(t) if t == "hello"));
    }

    #[test]
    fn inline_data_precedes_text() {
        let req = GenerationRequest::from_text("describe this").with_inline_data(InlineData {
            mime_type: "image/png".into(),
            data: "aGVsbG8=".into(),
        });
        assert_eq!(req.parts.len(), 2);
        assert!(matches!(&req.parts[0], Part::Inline(_)));
        assert!(matches!(&req.parts[1], Part::Text(_)));
    }
}
