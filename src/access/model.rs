//! Access-control records — the only entities in the system with a
//! lifecycle. Rows are created when a user first runs a free trial
//! (`TRIAL`) or completes checkout (`PAID`), never mutated in place, and
//! never deleted by the application.

use serde::{Deserialize, Serialize};

/// How a user is entitled to a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessType {
    Trial,
    Paid,
}

/// A stored fact that `user_id` may use `tool_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub user_id: String,
    pub tool_id: String,
    pub access_type: AccessType,
}

/// What the widget should do for a given tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolGate {
    /// A `PAID` row exists — the trial-lock overlay never renders.
    Paid,
    /// No rows — one free generation is available.
    TrialAvailable,
    /// A `TRIAL` row and no `PAID` row — show the trial-exhausted overlay
    /// and block generation.
    TrialExhausted,
}

impl ToolGate {
    /// Whether generation is allowed in this state.
    pub fn can_generate(&self) -> bool {
        !matches!(self, Self::TrialExhausted)
    }
}

/// A user's access rows, folded into the two lists the widget works with.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessSnapshot {
    /// Tool ids with a `PAID` row.
    pub unlocked: Vec<String>,
    /// Tool ids with a `TRIAL` row.
    pub trials_used: Vec<String>,
}

impl AccessSnapshot {
    pub fn from_records(records: &[AccessRecord]) -> Self {
        let mut snapshot = Self::default();
        for record in records {
            let bucket = match record.access_type {
                AccessType::Paid => &mut snapshot.unlocked,
                AccessType::Trial => &mut snapshot.trials_used,
            };
            if !bucket.contains(&record.tool_id) {
                bucket.push(record.tool_id.clone());
            }
        }
        snapshot
    }

    pub fn is_paid(&self, tool_id: &str) -> bool {
        self.unlocked.iter().any(|t| t == tool_id)
    }

    pub fn trial_used(&self, tool_id: &str) -> bool {
        self.trials_used.iter().any(|t| t == tool_id)
    }

    /// Gate for a tool. A `PAID` row always wins, regardless of any
    /// `TRIAL` row for the same pair.
    pub fn gate(&self, tool_id: &str) -> ToolGate {
        if self.is_paid(tool_id) {
            ToolGate::Paid
        } else if self.trial_used(tool_id) {
            ToolGate::TrialExhausted
        } else {
            ToolGate::TrialAvailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tool: &str, access: AccessType) -> AccessRecord {
        AccessRecord {
            user_id: "user-1".into(),
            tool_id: tool.into(),
            access_type: access,
        }
    }

    #[test]
    fn paid_overrides_trial() {
        let snapshot = AccessSnapshot::from_records(&[
            record("tender", AccessType::Trial),
            record("tender", AccessType::Paid),
        ]);
        assert_eq!(snapshot.gate("tender"), ToolGate::Paid);
        assert!(snapshot.gate("tender").can_generate());
    }

    #[test]
    fn trial_row_without_paid_blocks() {
        let snapshot = AccessSnapshot::from_records(&[record("social", AccessType::Trial)]);
        assert_eq!(snapshot.gate("social"), ToolGate::TrialExhausted);
        assert!(!snapshot.gate("social").can_generate());
    }

    #[test]
    fn no_rows_allows_trial() {
        let snapshot = AccessSnapshot::from_records(&[]);
        assert_eq!(snapshot.gate("legal"), ToolGate::TrialAvailable);
        assert!(snapshot.gate("legal").can_generate());
    }

    #[test]
    fn duplicate_rows_collapse() {
        let snapshot = AccessSnapshot::from_records(&[
            record("trade", AccessType::Trial),
            record("trade", AccessType::Trial),
        ]);
        assert_eq!(snapshot.trials_used, vec!["trade".to_string()]);
    }

    #[test]
    fn access_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&AccessType::Trial).unwrap(),
            "\"TRIAL\""
        );
        assert_eq!(serde_json::to_string(&AccessType::Paid).unwrap(), "\"PAID\"");
    }
}
