//! WebSocket transport for the support chat widget.
//!
//! Each connection keeps its own conversation history; nothing survives a
//! reload.

use std::sync::Arc;

use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::llm::Turn;

use super::{GREETING, SupportAgent};

/// Message from widget → server.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ClientMessage {
    #[serde(rename = "message")]
    Message { content: String },
}

/// Message from server → widget.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
enum ServerMessage {
    #[serde(rename = "greeting")]
    Greeting { content: &'static str },
    #[serde(rename = "thinking")]
    Thinking,
    #[serde(rename = "response")]
    Response { content: String },
}

#[derive(Clone)]
struct SupportState {
    agent: Arc<SupportAgent>,
}

/// Build the support chat route.
pub fn support_routes(agent: Arc<SupportAgent>) -> Router {
    Router::new()
        .route("/ws/support", get(ws_handler))
        .with_state(SupportState { agent })
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SupportState>) -> impl IntoResponse {
    info!("Support chat client connecting");
    ws.on_upgrade(|socket| handle_support_socket(socket, state.agent))
}

async fn handle_support_socket(mut socket: WebSocket, agent: Arc<SupportAgent>) {
    info!("Support chat client connected");

    let mut history: Vec<Turn> = Vec::new();

    if send_json(&mut socket, &ServerMessage::Greeting { content: GREETING })
        .await
        .is_err()
    {
        return;
    }
    history.push(Turn::model(GREETING));

    while let Some(result) = socket.recv().await {
        match result {
            Ok(Message::Text(text)) => {
                let content = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Message { content }) => content.trim().to_string(),
                    Err(e) => {
                        debug!(error = %e, text = %text, "Unrecognized support message");
                        continue;
                    }
                };
                if content.is_empty() {
                    continue;
                }

                if send_json(&mut socket, &ServerMessage::Thinking).await.is_err() {
                    break;
                }

                // The history forwarded excludes the turn being answered,
                // which rides along as the final message.
                let reply = agent.reply(&history, &content).await;
                history.push(Turn::user(&content));
                history.push(Turn::model(&reply));

                if send_json(&mut socket, &ServerMessage::Response { content: reply })
                    .await
                    .is_err()
                {
                    break;
                }
            }
            Ok(Message::Ping(data)) => {
                if socket.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!("Support chat client disconnected");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Support chat WebSocket error");
                break;
            }
        }
    }

    info!("Support chat connection closed");
}

async fn send_json(socket: &mut WebSocket, message: &ServerMessage) -> Result<(), ()> {
    let json = serde_json::to_string(message).map_err(|_| ())?;
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}
