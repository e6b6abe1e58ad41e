//! The fixed intake script — an ordered, non-branching list of prompts.

use std::collections::HashMap;
use std::time::Duration;

/// Delay before the agent's next prompt is shown.
pub const MESSAGE_DELAY: Duration = Duration::from_millis(600);

/// Delay before a completed dialogue closes.
pub const CLOSE_DELAY: Duration = Duration::from_secs(3);

/// What kind of answer a step expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Free text.
    Input,
    /// Single choice from a fixed list.
    Options(&'static [&'static str]),
    /// Calendar-slot choice (slots come from `content::CALENDAR_SLOTS`).
    Calendar,
    /// Closing text — displayed, never answered.
    Closing,
}

/// One step of the intake script.
#[derive(Debug, Clone, Copy)]
pub struct IntakeStep {
    pub id: &'static str,
    /// Prompt text with `{field}` placeholders substituted from the
    /// accumulated answer record.
    pub prompt: &'static str,
    pub kind: StepKind,
    /// Field name the answer is recorded under.
    pub field: &'static str,
}

pub const INTAKE_SCRIPT: &[IntakeStep] = &[
    IntakeStep {
        id: "welcome",
        prompt: "Greetings. I am Nexus, the intake coordinator for Boraine Tech. \
                 I'll help you secure a consultation with our senior architects. \
                 First, what is your name?",
        kind: StepKind::Input,
        field: "name",
    },
    IntakeStep {
        id: "company",
        prompt: "Pleasure to meet you, {name}. Which organization do you represent?",
        kind: StepKind::Input,
        field: "company",
    },
    IntakeStep {
        id: "revenue",
        prompt: "To ensure we are the right fit, what is your organization's \
                 estimated annual revenue bracket?",
        kind: StepKind::Options(&["< R5M", "R5M - R50M", "R50M - R250M", "R250M+"]),
        field: "revenue",
    },
    IntakeStep {
        id: "goal",
        prompt: "Understood. What is your primary objective for deploying AI?",
        kind: StepKind::Options(&[
            "Profit Automation",
            "Workflow Efficiency",
            "Customer Experience",
            "New Product Dev",
        ]),
        field: "goal",
    },
    IntakeStep {
        id: "calendar",
        prompt: "Excellent. Our team specializes in {goal}. Please select a \
                 preferred time for a 30-minute strategic audit.",
        kind: StepKind::Calendar,
        field: "slot",
    },
    IntakeStep {
        id: "email",
        prompt: "Final step: Please provide your business email address for the \
                 calendar invite.",
        kind: StepKind::Input,
        field: "email",
    },
    IntakeStep {
        id: "finish",
        prompt: "Protocol initialized. You will receive a confirmation shortly. \
                 We look forward to engineering your profit.",
        kind: StepKind::Closing,
        field: "done",
    },
];

/// Substitute `{field}` placeholders from the answer record.
///
/// Only recorded fields are substituted — a never-answered field leaves the
/// literal `{field}` text in place. That mirrors the shipped widget and is
/// deliberate.
pub fn substitute(template: &str, answers: &HashMap<String, String>) -> String {
    let mut text = template.to_string();
    for (field, value) in answers {
        text = text.replace(&format!("{{{field}}}"), value);
    }
    text
}
