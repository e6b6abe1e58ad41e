//! REST endpoints for the booking intake dialogue.
//!
//! Sessions are per-browsing-context view state: held in process memory,
//! discarded on completion or restart, never persisted.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::script::{CLOSE_DELAY, MESSAGE_DELAY};
use super::session::{BookingSession, DialogueError};

/// Shared registry of open dialogues.
#[derive(Clone, Default)]
pub struct BookingRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, BookingSession>>>,
}

impl BookingRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Build the booking REST routes.
pub fn booking_routes(registry: BookingRegistry) -> Router {
    Router::new()
        .route("/api/booking/start", post(start_session))
        .route("/api/booking/{id}/answer", post(answer))
        .route("/api/booking/{id}", get(session_state))
        .with_state(registry)
}

/// POST /api/booking/start
///
/// Opens a dialogue and returns the opening prompt immediately.
async fn start_session(State(registry): State<BookingRegistry>) -> impl IntoResponse {
    let session = BookingSession::new();
    let opening = session.opening();
    let id = Uuid::new_v4();
    registry.sessions.lock().await.insert(id, session);
    debug!(session_id = %id, "Booking dialogue opened");

    Json(serde_json::json!({
        "session_id": id,
        "message": opening,
    }))
}

#[derive(Deserialize)]
struct AnswerRequest {
    text: String,
}

/// POST /api/booking/{id}/answer
///
/// Records one answer and, after the fixed pacing delay, returns the next
/// prompt. A completed dialogue is removed once the close delay elapses.
async fn answer(
    State(registry): State<BookingRegistry>,
    Path(id): Path<Uuid>,
    Json(body): Json<AnswerRequest>,
) -> impl IntoResponse {
    let advance = {
        let mut sessions = registry.sessions.lock().await;
        let Some(session) = sessions.get_mut(&id) else {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": "Unknown session"})),
            );
        };
        match session.answer(&body.text) {
            Ok(advance) => advance,
            Err(e @ DialogueError::EmptyAnswer) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({"error": e.to_string()})),
                );
            }
            Err(e @ DialogueError::Completed) => {
                return (
                    StatusCode::GONE,
                    Json(serde_json::json!({"error": e.to_string()})),
                );
            }
        }
    };

    // Pacing: the agent "types" for a fixed moment before the next prompt.
    tokio::time::sleep(MESSAGE_DELAY).await;

    if advance.done {
        let sessions = Arc::clone(&registry.sessions);
        tokio::spawn(async move {
            tokio::time::sleep(CLOSE_DELAY).await;
            sessions.lock().await.remove(&id);
            debug!(session_id = %id, "Booking dialogue closed");
        });
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": advance.message,
            "done": advance.done,
        })),
    )
}

/// GET /api/booking/{id}
async fn session_state(
    State(registry): State<BookingRegistry>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let sessions = registry.sessions.lock().await;
    match sessions.get(&id) {
        Some(session) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "cursor": session.cursor(),
                "done": session.is_done(),
            })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Unknown session"})),
        ),
    }
}
