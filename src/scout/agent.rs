//! Audit generation wrapper — forwards the terminal conversation to the
//! hosted endpoint with the Scout persona.

use std::sync::Arc;

use tracing::error;

use crate::llm::{GenerationRequest, TextGenerator, Turn};

use super::{EntryKind, SCOUT_INSTRUCTION, TranscriptEntry};

/// Shown when no generation API key is configured.
pub const MISSING_KEY_FALLBACK: &str =
    "SYSTEM ERROR: API_KEY_MISSING. Please configure your environment variables.";
/// Shown when the endpoint answers with nothing.
pub const EMPTY_FALLBACK: &str = "CONNECTION INTERRUPTED. RETRY.";
/// Shown when the call fails.
pub const ERROR_FALLBACK: &str = "CRITICAL FAILURE: Neural link unstable. Please try again.";

/// Only the last N non-system turns are forwarded, to keep context tight.
const HISTORY_WINDOW: usize = 10;

/// The terminal's generation wrapper. Every failure path collapses to a
/// fixed sentence — the widget renders whatever comes back.
pub struct ScoutAgent {
    generator: Option<Arc<dyn TextGenerator>>,
}

/// Map the transcript to endpoint turns: drop simulated scan logs, keep
/// the most recent window.
pub fn trimmed_history(transcript: &[TranscriptEntry]) -> Vec<Turn> {
    let turns: Vec<Turn> = transcript
        .iter()
        .filter(|entry| entry.kind != EntryKind::System)
        .map(|entry| match entry.kind {
            EntryKind::User => Turn::user(&entry.text),
            _ => Turn::model(&entry.text),
        })
        .collect();
    let skip = turns.len().saturating_sub(HISTORY_WINDOW);
    turns.into_iter().skip(skip).collect()
}

impl ScoutAgent {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Forward the conversation plus `user_message` and return the
    /// response text verbatim, or a fallback sentence.
    pub async fn audit(&self, transcript: &[TranscriptEntry], user_message: &str) -> String {
        let Some(generator) = &self.generator else {
            return MISSING_KEY_FALLBACK.to_string();
        };

        let request = GenerationRequest::from_text(user_message)
            .with_system_instruction(SCOUT_INSTRUCTION)
            .with_temperature(0.7)
            .with_max_output_tokens(1500)
            .with_history(trimmed_history(transcript))
            .with_search();

        match generator.generate(request).await {
            Ok(text) if text.trim().is_empty() => EMPTY_FALLBACK.to_string(),
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Audit generation failed");
                ERROR_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[tokio::test]
    async fn missing_configuration_short_circuits() {
        let agent = ScoutAgent::new(None);
        let reply = agent.audit(&[], "audit example.com").await;
        assert_eq!(reply, MISSING_KEY_FALLBACK);
    }

    #[test]
    fn system_entries_are_dropped() {
        let transcript = vec![
            TranscriptEntry::ai("node online"),
            TranscriptEntry::system("> Resolving DNS..."),
            TranscriptEntry::user("example.com"),
        ];
        let turns = trimmed_history(&transcript);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::Model);
        assert_eq!(turns[1].role, Role::User);
    }

    #[test]
    fn history_is_trimmed_to_window() {
        let transcript: Vec<TranscriptEntry> = (0..25)
            .map(|i| {
                if i % 2 == 0 {
                    TranscriptEntry::user(format!("question {i}"))
                } else {
                    TranscriptEntry::ai(format!("answer {i}"))
                }
            })
            .collect();
        let turns = trimmed_history(&transcript);
        assert_eq!(turns.len(), 10);
        // Most recent entries survive.
        assert_eq!(turns.last().unwrap().text, "question 24");
    }
}
