//! Backend-agnostic access store and auth interfaces, plus the in-memory
//! implementations used by tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, StoreError};

use super::model::{AccessRecord, AccessType};

/// Read/append interface over the hosted access table.
#[async_trait]
pub trait AccessStore: Send + Sync {
    /// All access rows for a user. Read failures collapse to an empty
    /// list (logged) — the widget degrades to its locked state rather
    /// than crashing.
    async fn user_access(&self, user_id: &str) -> Vec<AccessRecord>;

    /// Record that the user consumed their free trial for a tool.
    /// Idempotent upsert on the full `(user, tool, TRIAL)` triple.
    async fn record_trial(&self, user_id: &str, tool_id: &str) -> Result<(), StoreError>;

    /// Record a completed purchase. Idempotent upsert on the full
    /// `(user, tool, PAID)` triple.
    async fn record_purchase(&self, user_id: &str, tool_id: &str) -> Result<(), StoreError>;
}

/// A signed-in user as the auth service reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: SessionUser,
}

/// Outcome of a signup attempt.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// Session issued immediately.
    SignedIn(Session),
    /// Account created; the user must confirm their email before login.
    ConfirmationRequired,
}

/// Thin wrapper over the hosted auth service.
#[async_trait]
pub trait SessionAuth: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Resolve a bearer token to its user.
    async fn user_from_token(&self, token: &str) -> Result<SessionUser, AuthError>;
}

// ── In-memory implementations ───────────────────────────────────────────

/// In-memory access store. The set models the upsert semantics of the
/// hosted table: re-recording the same triple is a no-op.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashSet<(String, String, AccessType)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessStore for MemoryStore {
    async fn user_access(&self, user_id: &str) -> Vec<AccessRecord> {
        let rows = self.rows.lock().expect("access rows lock poisoned");
        rows.iter()
            .filter(|(user, _, _)| user == user_id)
            .map(|(user, tool, access)| AccessRecord {
                user_id: user.clone(),
                tool_id: tool.clone(),
                access_type: *access,
            })
            .collect()
    }

    async fn record_trial(&self, user_id: &str, tool_id: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().expect("access rows lock poisoned");
        rows.insert((user_id.to_string(), tool_id.to_string(), AccessType::Trial));
        Ok(())
    }

    async fn record_purchase(&self, user_id: &str, tool_id: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().expect("access rows lock poisoned");
        rows.insert((user_id.to_string(), tool_id.to_string(), AccessType::Paid));
        Ok(())
    }
}

/// In-memory auth that accepts any credentials and hands out the email as
/// the token. Test-only convenience.
#[derive(Default)]
pub struct MemoryAuth;

fn memory_user(email: &str) -> SessionUser {
    SessionUser {
        id: format!("user-{email}"),
        email: Some(email.to_string()),
    }
}

#[async_trait]
impl SessionAuth for MemoryAuth {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<SignUpOutcome, AuthError> {
        Ok(SignUpOutcome::SignedIn(Session {
            access_token: email.to_string(),
            user: memory_user(email),
        }))
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        Ok(Session {
            access_token: email.to_string(),
            user: memory_user(email),
        })
    }

    async fn user_from_token(&self, token: &str) -> Result<SessionUser, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidSession);
        }
        Ok(memory_user(token))
    }
}
