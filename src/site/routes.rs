//! Site composition routes: health, pricing, intro gating, and the auth
//! endpoints the modals call.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::access::{SessionAuth, SignUpOutcome, bearer_token};
use crate::content;

use super::session::{IntroGate, SESSION_COOKIE};

/// Shared state for the site routes.
#[derive(Clone)]
pub struct SiteState {
    pub intro: IntroGate,
    pub auth: Arc<dyn SessionAuth>,
}

/// Build the site routes.
pub fn site_routes(state: SiteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/pricing", get(pricing))
        .route("/api/intro", get(intro_status))
        .route("/api/intro/complete", post(intro_complete))
        .route("/api/auth/signup", post(sign_up))
        .route("/api/auth/login", post(log_in))
        .route("/api/auth/session", get(session))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "boraine-site"
    }))
}

/// GET /api/pricing — static consultancy tiers.
async fn pricing() -> impl IntoResponse {
    Json(content::PRICING_TIERS)
}

// ── Intro gating ────────────────────────────────────────────────────────

/// Find the browsing-session token in the request's cookies.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// A session cookie with no expiry — it dies with the browsing session.
fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; SameSite=Lax")
}

/// GET /api/intro
///
/// Whether to show the splash intro, issuing a session token if the
/// browser doesn't carry one yet.
async fn intro_status(State(state): State<SiteState>, headers: HeaderMap) -> impl IntoResponse {
    match session_token(&headers) {
        Some(token) => {
            let body = Json(serde_json::json!({"show_intro": state.intro.show_intro(&token)}));
            (StatusCode::OK, HeaderMap::new(), body)
        }
        None => {
            let token = Uuid::new_v4().to_string();
            let mut response_headers = HeaderMap::new();
            if let Ok(value) = session_cookie(&token).parse() {
                response_headers.insert(header::SET_COOKIE, value);
            }
            (
                StatusCode::OK,
                response_headers,
                Json(serde_json::json!({"show_intro": true})),
            )
        }
    }
}

/// POST /api/intro/complete
async fn intro_complete(State(state): State<SiteState>, headers: HeaderMap) -> impl IntoResponse {
    let (token, response_headers) = match session_token(&headers) {
        Some(token) => (token, HeaderMap::new()),
        None => {
            let token = Uuid::new_v4().to_string();
            let mut response_headers = HeaderMap::new();
            if let Ok(value) = session_cookie(&token).parse() {
                response_headers.insert(header::SET_COOKIE, value);
            }
            (token, response_headers)
        }
    };
    state.intro.complete(&token);
    (
        StatusCode::OK,
        response_headers,
        Json(serde_json::json!({"status": "completed"})),
    )
}

// ── Auth ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

/// POST /api/auth/signup
async fn sign_up(
    State(state): State<SiteState>,
    Json(body): Json<Credentials>,
) -> impl IntoResponse {
    match state.auth.sign_up(&body.email, &body.password).await {
        Ok(SignUpOutcome::SignedIn(session)) => (
            StatusCode::OK,
            Json(serde_json::json!({"status": "signed_in", "session": session})),
        ),
        Ok(SignUpOutcome::ConfirmationRequired) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "confirmation_required",
                "message": "Registration Successful!\n\nPlease check your email inbox to \
                            confirm your account before logging in.",
            })),
        ),
        Err(e) => {
            warn!(error = %e, "Signup rejected");
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": e.to_string()})),
            )
        }
    }
}

/// POST /api/auth/login
async fn log_in(State(state): State<SiteState>, Json(body): Json<Credentials>) -> impl IntoResponse {
    match state.auth.sign_in(&body.email, &body.password).await {
        Ok(session) => (StatusCode::OK, Json(serde_json::json!({"session": session}))),
        Err(e) => {
            warn!(error = %e, "Login rejected");
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": e.to_string()})),
            )
        }
    }
}

/// GET /api/auth/session — resolve the bearer token to its user.
async fn session(State(state): State<SiteState>, headers: HeaderMap) -> impl IntoResponse {
    let Some(token) = bearer_token(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "No session"})),
        );
    };
    match state.auth.user_from_token(token).await {
        Ok(user) => (StatusCode::OK, Json(serde_json::json!({"user": user}))),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "No session"})),
        ),
    }
}
