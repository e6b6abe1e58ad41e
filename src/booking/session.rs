//! Booking dialogue session — a single integer cursor over the intake
//! script plus the accumulating answer record.
//!
//! The record lives only in this in-memory session; it is never sent
//! anywhere, matching the shipped widget.

use std::collections::HashMap;

use serde::Serialize;

use crate::content::CALENDAR_SLOTS;

use super::script::{INTAKE_SCRIPT, IntakeStep, StepKind, substitute};

/// Answer kind, as the widget renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Input,
    Options,
    Calendar,
    Text,
}

/// One agent message. The dialogue emits exactly one per advance.
#[derive(Debug, Clone, Serialize)]
pub struct AgentPrompt {
    pub step_id: &'static str,
    pub text: String,
    pub kind: PromptKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<&'static str>>,
}

/// Dialogue-level rejections.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DialogueError {
    #[error("Please type a response.")]
    EmptyAnswer,

    #[error("This consultation request is already complete.")]
    Completed,
}

/// Result of recording one answer.
#[derive(Debug, Clone, Serialize)]
pub struct Advance {
    pub message: AgentPrompt,
    /// The emitted message was the closing step — the dialogue is over
    /// and the widget closes after the fixed delay.
    pub done: bool,
}

/// One visitor's progress through the intake script.
#[derive(Debug, Default)]
pub struct BookingSession {
    cursor: usize,
    answers: HashMap<String, String>,
    done: bool,
}

fn prompt_for(step: &IntakeStep, answers: &HashMap<String, String>) -> AgentPrompt {
    let (kind, options) = match step.kind {
        StepKind::Input => (PromptKind::Input, None),
        StepKind::Options(opts) => (PromptKind::Options, Some(opts.to_vec())),
        StepKind::Calendar => (PromptKind::Calendar, Some(CALENDAR_SLOTS.to_vec())),
        StepKind::Closing => (PromptKind::Text, None),
    };
    AgentPrompt {
        step_id: step.id,
        text: substitute(step.prompt, answers),
        kind,
        options,
    }
}

impl BookingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The opening prompt, shown when the widget opens.
    pub fn opening(&self) -> AgentPrompt {
        prompt_for(&INTAKE_SCRIPT[0], &self.answers)
    }

    /// Record an answer to the current step and advance the cursor.
    ///
    /// Emits exactly one agent message; once the closing step has been
    /// emitted, further answers are rejected.
    pub fn answer(&mut self, text: &str) -> Result<Advance, DialogueError> {
        if self.done {
            return Err(DialogueError::Completed);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(DialogueError::EmptyAnswer);
        }

        let step = &INTAKE_SCRIPT[self.cursor];
        self.answers.insert(step.field.to_string(), text.to_string());
        self.cursor += 1;

        debug_assert!(self.cursor < INTAKE_SCRIPT.len(), "script ends with a closing step");
        let next = &INTAKE_SCRIPT[self.cursor];
        self.done = matches!(next.kind, StepKind::Closing);

        Ok(Advance {
            message: prompt_for(next, &self.answers),
            done: self.done,
        })
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Zero-based index of the step currently awaiting an answer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }
}
