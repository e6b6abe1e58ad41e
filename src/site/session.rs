//! Browsing-session intro gating.
//!
//! The splash intro is shown once per browsing session. The gate hands
//! each browser a session cookie (no expiry — it dies with the browsing
//! session) and remembers, in process memory only, which tokens have
//! completed the intro. A new session means a new token, so the intro
//! shows again.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Cookie carrying the browsing-session token.
pub const SESSION_COOKIE: &str = "boraine_session";

#[derive(Clone, Default)]
pub struct IntroGate {
    completed: Arc<Mutex<HashSet<String>>>,
}

impl IntroGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the intro should be shown for this token.
    pub fn show_intro(&self, token: &str) -> bool {
        !self
            .completed
            .lock()
            .expect("intro gate lock poisoned")
            .contains(token)
    }

    /// Mark the intro complete for this token.
    pub fn complete(&self, token: &str) {
        self.completed
            .lock()
            .expect("intro gate lock poisoned")
            .insert(token.to_string());
    }
}
