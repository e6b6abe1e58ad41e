//! Checkout endpoints: widget configuration and purchase recording.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::access::{AccessStore, SessionAuth, bearer_token};
use crate::content;

use super::gateway::{SimulatedGateway, amount_in_cents};

/// Shared state for the payment routes.
#[derive(Clone)]
pub struct PaymentsState {
    pub gateway: Arc<SimulatedGateway>,
    pub store: Arc<dyn AccessStore>,
    pub auth: Arc<dyn SessionAuth>,
    /// Public key the client mounts the hosted widget with.
    pub public_key: String,
}

/// Build the payment routes.
pub fn payment_routes(state: PaymentsState) -> Router {
    Router::new()
        .route("/api/payments/config", get(widget_config))
        .route("/api/payments/checkout", post(checkout))
        .with_state(state)
}

#[derive(Deserialize)]
struct ConfigQuery {
    tool_id: String,
}

/// GET /api/payments/config?tool_id=…
///
/// Everything the client needs to mount the hosted payment widget.
async fn widget_config(
    State(state): State<PaymentsState>,
    Query(query): Query<ConfigQuery>,
) -> impl IntoResponse {
    let Some(tool) = content::find_tool(&query.tool_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Unknown tool"})),
        );
    };
    let Some(amount) = amount_in_cents(tool.price) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Tool has no purchase price"})),
        );
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "public_key": state.public_key,
            "amount_in_cents": amount,
            "currency": "ZAR",
            "product_name": format!("{} Pro License", tool.name),
        })),
    )
}

#[derive(Deserialize)]
struct CheckoutRequest {
    tool_id: String,
    /// Opaque charge token from the hosted widget.
    token: String,
}

/// POST /api/payments/checkout
///
/// Accepts the widget's charge token, runs the (simulated) charge, and on
/// success records the `PAID` entitlement. A failed entitlement write
/// after a successful charge is surfaced — the user must hear that
/// license generation failed.
async fn checkout(
    State(state): State<PaymentsState>,
    headers: HeaderMap,
    Json(body): Json<CheckoutRequest>,
) -> impl IntoResponse {
    let Some(token) = bearer_token(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "Session expired. Please login again."})),
        );
    };
    let user = match state.auth.user_from_token(token).await {
        Ok(user) => user,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": "Session expired. Please login again."})),
            );
        }
    };

    let Some(tool) = content::find_tool(&body.tool_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Unknown tool"})),
        );
    };
    let amount = amount_in_cents(tool.price).unwrap_or_default();

    let outcome = state.gateway.charge(&body.token, amount).await;
    if !outcome.success {
        return (
            StatusCode::PAYMENT_REQUIRED,
            Json(serde_json::json!({"error": format!("Payment Failed: {}", outcome.message)})),
        );
    }

    if let Err(e) = state.store.record_purchase(&user.id, &body.tool_id).await {
        error!(user_id = %user.id, tool_id = %body.tool_id, error = %e, "Failed to record purchase");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": "Payment authorized, but database update failed. Please contact support.",
            })),
        );
    }

    info!(user_id = %user.id, tool_id = %body.tool_id, "Purchase recorded");
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "paid",
            "transaction_id": outcome.transaction_id,
            "message": outcome.message,
        })),
    )
}
