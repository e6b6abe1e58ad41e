//! Hosted backend-as-a-service clients: the PostgREST access table and the
//! GoTrue auth endpoints. Each is a thin typed wrapper — one request, one
//! parsed response, no retry.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::error::{AuthError, StoreError};

use super::model::{AccessRecord, AccessType};
use super::store::{AccessStore, Session, SessionAuth, SessionUser, SignUpOutcome};

const ACCESS_TABLE: &str = "user_access";

/// Shared connection details for both hosted services.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: SecretString,
}

impl SupabaseClient {
    pub fn new(base_url: String, anon_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    fn rest_url(&self) -> String {
        format!("{}/rest/v1/{ACCESS_TABLE}", self.base_url)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn anon_key(&self) -> &str {
        self.anon_key.expose_secret()
    }
}

// ── Access table ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AccessRow {
    tool_id: String,
    access_type: AccessType,
}

impl SupabaseClient {
    async fn upsert_access(
        &self,
        user_id: &str,
        tool_id: &str,
        access_type: AccessType,
    ) -> Result<(), StoreError> {
        let response = self
            .http
            .post(self.rest_url())
            .query(&[("on_conflict", "user_id,tool_id,access_type")])
            .header("apikey", self.anon_key())
            .bearer_auth(self.anon_key())
            .header("Prefer", "resolution=merge-duplicates")
            .json(&json!([{
                "user_id": user_id,
                "tool_id": tool_id,
                "access_type": access_type,
            }]))
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AccessStore for SupabaseClient {
    async fn user_access(&self, user_id: &str) -> Vec<AccessRecord> {
        let result = self
            .http
            .get(self.rest_url())
            .query(&[
                ("user_id", format!("eq.{user_id}")),
                ("select", "tool_id,access_type".to_string()),
            ])
            .header("apikey", self.anon_key())
            .bearer_auth(self.anon_key())
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Database connection failed (user_access)");
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            warn!(status = %response.status(), "Access table read rejected");
            return Vec::new();
        }

        match response.json::<Vec<AccessRow>>().await {
            Ok(rows) => rows
                .into_iter()
                .map(|row| AccessRecord {
                    user_id: user_id.to_string(),
                    tool_id: row.tool_id,
                    access_type: row.access_type,
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "Access table response unreadable");
                Vec::new()
            }
        }
    }

    async fn record_trial(&self, user_id: &str, tool_id: &str) -> Result<(), StoreError> {
        self.upsert_access(user_id, tool_id, AccessType::Trial).await
    }

    async fn record_purchase(&self, user_id: &str, tool_id: &str) -> Result<(), StoreError> {
        self.upsert_access(user_id, tool_id, AccessType::Paid).await
    }
}

// ── Auth ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct AuthSessionResponse {
    access_token: Option<String>,
    user: Option<AuthUser>,
}

#[derive(Deserialize)]
struct AuthErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
}

fn auth_error_message(body: &str) -> String {
    serde_json::from_str::<AuthErrorBody>(body)
        .ok()
        .and_then(|b| b.msg.or(b.error_description))
        .unwrap_or_else(|| "Authentication failed. Check your connection and credentials.".into())
}

impl From<AuthUser> for SessionUser {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[async_trait]
impl SessionAuth for SupabaseClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let response = self
            .http
            .post(self.auth_url("signup"))
            .header("apikey", self.anon_key())
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(AuthError::Rejected(auth_error_message(&body)));
        }

        let parsed: AuthSessionResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::RequestFailed(e.to_string()))?;
        match (parsed.access_token, parsed.user) {
            (Some(access_token), Some(user)) => Ok(SignUpOutcome::SignedIn(Session {
                access_token,
                user: user.into(),
            })),
            // Account created, session withheld until email confirmation.
            _ => Ok(SignUpOutcome::ConfirmationRequired),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", self.anon_key())
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(AuthError::Rejected(auth_error_message(&body)));
        }

        let parsed: AuthSessionResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::RequestFailed(e.to_string()))?;
        match (parsed.access_token, parsed.user) {
            (Some(access_token), Some(user)) => Ok(Session {
                access_token,
                user: user.into(),
            }),
            _ => Err(AuthError::Rejected(
                "Login response carried no session".into(),
            )),
        }
    }

    async fn user_from_token(&self, token: &str) -> Result<SessionUser, AuthError> {
        let response = self
            .http
            .get(self.auth_url("user"))
            .header("apikey", self.anon_key())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidSession);
        }
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected(auth_error_message(&body)));
        }

        let user: AuthUser = response
            .json()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;
        Ok(user.into())
    }
}
