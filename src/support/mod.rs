//! The floating sales chat widget backend — the "Nexus" growth architect.

pub mod ws;

pub use ws::support_routes;

use std::sync::Arc;

use tracing::error;

use crate::llm::{GenerationRequest, TextGenerator, Turn};

/// Opening message pushed when the widget connects.
pub const GREETING: &str = "Greetings. I am Nexus, Boraine Tech's automated architect. \
How can I assist you with your revenue infrastructure today?";

/// Shown when no generation API key is configured.
pub const MISSING_KEY_FALLBACK: &str = "Connection Error: Neural Link Offline (API Key Missing).";
/// Shown when the endpoint answers with nothing.
pub const EMPTY_FALLBACK: &str = "I am currently recalibrating. Please ask again.";
/// Shown when the call fails.
pub const ERROR_FALLBACK: &str = "Network interference detected. Please try again shortly.";

/// Persona instruction for the support agent. The `[ACTION:*]` tags it
/// emits are passed through verbatim — the widget renders them as UI
/// tools (calendar, email capture).
pub const NEXUS_INSTRUCTION: &str = r#"
You are "Nexus", the AI Growth Architect for Boraine Tech.
Your ONE goal is to qualify leads and secure a "Strategic Audit" (Meeting).

### CORE PROTOCOL
1. **Qualify**: Ask 2-3 high-value questions (Revenue, Goals, Tech Stack).
2. **Value**: Pivot every answer back to "Profit Engineering" or "Cost Reduction".
3. **Close**: When the user seems interested or qualified, trigger the calendar.

### TOOL USE (CRITICAL)
You have access to UI tools. Trigger them by acting out the specific tag:

- **[ACTION:CALENDAR]**: Use this EXACT tag when the user agrees to a meeting or asks to book.
- **[ACTION:EMAIL]**: Use this EXACT tag if you need to capture their email for a report.

### CONVERSATION FLOW (EXAMPLE)
User: "How much is an agent?"
Nexus: "We don't sell hourly tools; we engineer profit centers. Typically, our Revenue Agents replace three full-time SDRs. What is your current monthly lead volume?"
User: "About 500 leads."
Nexus: "Excellent volume. A manual team misses 40% of those. We can automate 100% of reach-outs. Shall I pull up the calendar to discuss a demo?"
User: "Yes please."
Nexus: "Perfect. Select a time below. [ACTION:CALENDAR]"
"#;

/// The support chat's generation wrapper.
pub struct SupportAgent {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl SupportAgent {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Forward the conversation plus `user_message`; return the reply
    /// verbatim (tags included) or a fallback sentence.
    pub async fn reply(&self, history: &[Turn], user_message: &str) -> String {
        let Some(generator) = &self.generator else {
            return MISSING_KEY_FALLBACK.to_string();
        };

        let request = GenerationRequest::from_text(user_message)
            .with_system_instruction(NEXUS_INSTRUCTION)
            .with_temperature(0.6)
            .with_max_output_tokens(300)
            .with_history(history.to_vec());

        match generator.generate(request).await {
            Ok(text) if text.trim().is_empty() => EMPTY_FALLBACK.to_string(),
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Support generation failed");
                ERROR_FALLBACK.to_string()
            }
        }
    }
}
