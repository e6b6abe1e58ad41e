//! Terminal transport — WebSocket session plus the report download
//! endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::agent::ScoutAgent;
use super::report::{self, ReportDocument};
use super::scan::{self, SCAN_STEP_DELAY};
use super::{GREETING, TranscriptEntry};

// ── JSON protocol ───────────────────────────────────────────────────────

/// Message from terminal client → server.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ClientMessage {
    #[serde(rename = "send")]
    Send { content: String },
}

/// Message from server → terminal client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
enum ServerMessage {
    #[serde(rename = "banner")]
    Banner { content: &'static str },
    #[serde(rename = "scan_log")]
    ScanLog { line: String, progress: f32 },
    #[serde(rename = "thinking")]
    Thinking,
    #[serde(rename = "response")]
    Response { content: String },
    #[serde(rename = "report_ready")]
    ReportReady { report_id: Uuid, filename: String },
}

// ── Report cache ────────────────────────────────────────────────────────

struct StoredReport {
    filename: String,
    document: ReportDocument,
}

/// Completed audits held for download. Process memory only — a restart
/// drops them, like any other per-session state.
#[derive(Clone, Default)]
pub struct ReportCache {
    reports: Arc<Mutex<HashMap<Uuid, StoredReport>>>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn store(&self, filename: String, document: ReportDocument) -> Uuid {
        let id = Uuid::new_v4();
        self.reports
            .lock()
            .await
            .insert(id, StoredReport { filename, document });
        id
    }
}

// ── Routes ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct TerminalState {
    agent: Arc<ScoutAgent>,
    reports: ReportCache,
}

/// Build the terminal WebSocket + report download routes.
pub fn terminal_routes(agent: Arc<ScoutAgent>, reports: ReportCache) -> Router {
    let state = TerminalState { agent, reports };
    Router::new()
        .route("/ws/terminal", get(ws_handler))
        .route("/api/terminal/report/{id}", get(download_report))
        .with_state(state)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<TerminalState>) -> impl IntoResponse {
    info!("Terminal client connecting");
    ws.on_upgrade(|socket| handle_terminal_socket(socket, state))
}

/// Per-connection terminal session: transcript, locked target, and
/// whether the first audit has been retained as the report.
async fn handle_terminal_socket(mut socket: WebSocket, state: TerminalState) {
    info!("Terminal client connected");

    let mut transcript: Vec<TranscriptEntry> = Vec::new();
    let mut target: Option<String> = None;
    let mut report_ready = false;

    if send_json(&mut socket, &ServerMessage::Banner { content: GREETING })
        .await
        .is_err()
    {
        return;
    }
    transcript.push(TranscriptEntry::ai(GREETING));

    while let Some(result) = socket.recv().await {
        match result {
            Ok(Message::Text(text)) => {
                let content = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Send { content }) => content.trim().to_string(),
                    Err(e) => {
                        debug!(error = %e, text = %text, "Unrecognized terminal message");
                        continue;
                    }
                };
                if content.is_empty() {
                    continue;
                }
                transcript.push(TranscriptEntry::user(&content));

                let closed = if target.is_none() {
                    run_scan_and_audit(
                        &mut socket,
                        &state,
                        &mut transcript,
                        &mut target,
                        &mut report_ready,
                        content,
                    )
                    .await
                    .is_err()
                } else {
                    run_followup(&mut socket, &state, &mut transcript, content)
                        .await
                        .is_err()
                };
                if closed {
                    break;
                }
            }
            Ok(Message::Ping(data)) => {
                if socket.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!("Terminal client disconnected");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Terminal WebSocket error");
                break;
            }
        }
    }

    info!("Terminal connection closed");
}

/// First input: replay the scan script with pacing, then run the audit
/// and retain it as the downloadable report.
async fn run_scan_and_audit(
    socket: &mut WebSocket,
    state: &TerminalState,
    transcript: &mut Vec<TranscriptEntry>,
    target: &mut Option<String>,
    report_ready: &mut bool,
    input: String,
) -> Result<(), ()> {
    let class = scan::classify(&input);
    let script = scan::script(class);

    for (i, line) in script.iter().enumerate() {
        tokio::time::sleep(SCAN_STEP_DELAY).await;
        let line = format!("> {line}");
        transcript.push(TranscriptEntry::system(&line));
        send_json(
            socket,
            &ServerMessage::ScanLog {
                line,
                progress: scan::progress(i, script.len()),
            },
        )
        .await?;
    }

    *target = Some(input.clone());
    send_json(socket, &ServerMessage::Thinking).await?;

    let prompt = scan::audit_prompt(class, &input);
    let response = state.agent.audit(transcript, &prompt).await;
    transcript.push(TranscriptEntry::ai(&response));

    // The first completed audit becomes the report.
    if !*report_ready {
        *report_ready = true;
        let document = report::paginate(&response, &input, class);
        let filename = report::filename(&input);
        let report_id = state.reports.store(filename.clone(), document).await;
        send_json(socket, &ServerMessage::ReportReady { report_id, filename }).await?;
    }

    send_json(socket, &ServerMessage::Response { content: response }).await
}

/// Follow-up Q&A once a target is locked.
async fn run_followup(
    socket: &mut WebSocket,
    state: &TerminalState,
    transcript: &mut Vec<TranscriptEntry>,
    input: String,
) -> Result<(), ()> {
    send_json(socket, &ServerMessage::Thinking).await?;
    let response = state.agent.audit(transcript, &input).await;
    transcript.push(TranscriptEntry::ai(&response));
    send_json(socket, &ServerMessage::Response { content: response }).await
}

async fn send_json(socket: &mut WebSocket, message: &ServerMessage) -> Result<(), ()> {
    let json = serde_json::to_string(message).map_err(|_| ())?;
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

/// GET /api/terminal/report/{id}
///
/// Returns the rendered report with a download disposition.
async fn download_report(
    State(state): State<TerminalState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let reports = state.reports.reports.lock().await;
    match reports.get(&id) {
        Some(stored) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", stored.filename),
                ),
            ],
            report::render(&stored.document),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({"error": "Report data incomplete. Please wait for analysis to finish."})),
        )
            .into_response(),
    }
}
