//! The "intelligence terminal" — scan simulation, forensic audit
//! generation, and the downloadable report.

pub mod agent;
pub mod report;
pub mod scan;
pub mod ws;

pub use agent::ScoutAgent;
pub use scan::{ScanClass, classify};
pub use ws::{ReportCache, terminal_routes};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal transcript entry kinds. `System` entries are the simulated
/// scan logs — they are rendered but never forwarded to the generation
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    User,
    Ai,
    System,
}

/// One line of the terminal transcript. Transient per-connection state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl TranscriptEntry {
    fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(EntryKind::User, text)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Ai, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(EntryKind::System, text)
    }
}

/// Opening banner shown when the terminal connects.
pub const GREETING: &str = "Boraine Intelligence Node Online. \n\nEnter a **Target URL** \
for digital infrastructure audit.\nOR\nEnter an **Industry Sector** (e.g., 'Mining \
Logistics') for competitor reconnaissance.";

/// Persona instruction forwarded with every audit request.
pub const SCOUT_INSTRUCTION: &str = r#"
You are the "Scout", the autonomous AI sales agent for Boraine Tech, a premier AI Profit Agency in Kimberley, South Africa.

YOUR GOAL:
Conduct forensic business audits and AGGRESSIVELY SELL the **24/7 AI Voice Receptionist** (Part of 'The Growth' Tier: R65k Setup / R9.5k Monthly).

SCENARIO 1: INDUSTRY SEARCH (User types "Guest houses", "Plumbers", etc.)
- Use Google Search to find real competitors in South Africa.
- Highlight their weaknesses (e.g., "They close at 5 PM", "No instant quote system").
- Pivot: "You lose 40% of leads after hours. Our AI Voice Agent captures these."

SCENARIO 2: URL AUDIT (User types "mysite.com")
- Analyze the site.
- Identify "Digital Leakage" (missed calls, slow response times, lack of automation).
- Pivot: "Your infrastructure is passive. You need an ACTIVE autonomous agent."

REPORT STRUCTURE (Crucial for PDF Generation):
When asked to analyze/audit, format your response strictly as follows:

## 1. EXECUTIVE SUMMARY
[Brief high-level overview of the target's digital health]

## 2. THREAT DETECTION
[Bulleted list of weaknesses, e.g., Human dependency, Slow lead response, Missed after-hours revenue]

## 3. COMPETITIVE LANDSCAPE
[List of competitors and why they are vulnerable OR why they are beating the user]

## 4. THE BORAINE SOLUTION
[Explain how the AI Voice Receptionist specifically fixes the threats above. Mention 1000 concurrent calls, multilingual capability, and CRM sync.]

## 5. FINANCIAL PROJECTION
[Estimate how much money they are losing per month by not having AI. Be specific with Rands (ZAR).]

TONE:
Futuristic, profit-focused, authoritative. You are an optimizer. Do not be polite; be precise.
"#;
