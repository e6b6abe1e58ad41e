//! REST endpoints for the SaaS tool suite: descriptors, access state, and
//! gated generation.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::error;

use crate::access::{AccessSnapshot, AccessStore, SessionAuth, SessionUser, ToolGate, bearer_token};
use crate::content;

use super::generation::{GenerationInputs, SaasGenerator};

/// Shared state for the SaaS routes.
#[derive(Clone)]
pub struct SaasState {
    pub generator: Arc<SaasGenerator>,
    pub store: Arc<dyn AccessStore>,
    pub auth: Arc<dyn SessionAuth>,
}

/// Build the SaaS tool routes.
pub fn saas_routes(state: SaasState) -> Router {
    Router::new()
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{id}/access", get(tool_access))
        .route("/api/tools/{id}/generate", post(generate))
        .with_state(state)
}

/// GET /api/tools — static tool descriptors.
async fn list_tools() -> impl IntoResponse {
    Json(content::SAAS_TOOLS)
}

async fn resolve_user(
    state: &SaasState,
    headers: &HeaderMap,
) -> Result<SessionUser, (StatusCode, Json<serde_json::Value>)> {
    let Some(token) = bearer_token(headers) else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "Session expired. Please login again."})),
        ));
    };
    state.auth.user_from_token(token).await.map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "Session expired. Please login again."})),
        )
    })
}

/// GET /api/tools/{id}/access
///
/// The gate the widget uses to decide whether to show the trial-lock
/// overlay.
async fn tool_access(
    State(state): State<SaasState>,
    Path(tool_id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(rejection) => return rejection,
    };

    let records = state.store.user_access(&user.id).await;
    let snapshot = AccessSnapshot::from_records(&records);
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "tool_id": tool_id,
            "gate": snapshot.gate(&tool_id),
            "unlocked": snapshot.unlocked,
            "trials_used": snapshot.trials_used,
        })),
    )
}

/// POST /api/tools/{id}/generate
///
/// Auth, gate, validate, generate — and record the trial afterwards if
/// this was one.
async fn generate(
    State(state): State<SaasState>,
    Path(tool_id): Path<String>,
    headers: HeaderMap,
    Json(inputs): Json<GenerationInputs>,
) -> impl IntoResponse {
    let user = match resolve_user(&state, &headers).await {
        Ok(user) => user,
        Err(rejection) => return rejection,
    };

    let records = state.store.user_access(&user.id).await;
    let gate = AccessSnapshot::from_records(&records).gate(&tool_id);
    if !gate.can_generate() {
        return (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({
                "error": "Free trial already used. Upgrade to Pro to continue.",
                "locked": true,
            })),
        );
    }

    let accepts_image = content::find_tool(&tool_id).is_some_and(|t| t.accepts_image);
    if accepts_image && inputs.image.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Please upload a site image for analysis."})),
        );
    }
    if !accepts_image && (inputs.title.trim().is_empty() || inputs.details.trim().is_empty()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Please provide required input parameters."})),
        );
    }

    let document = state.generator.generate(&tool_id, &inputs).await;

    // The response the user already waited for is delivered even if the
    // trial write fails; the widget refreshes access state on its own.
    if gate == ToolGate::TrialAvailable {
        if let Err(e) = state.store.record_trial(&user.id, &tool_id).await {
            error!(user_id = %user.id, tool_id = %tool_id, error = %e, "Failed to record trial usage");
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"content": document})),
    )
}
