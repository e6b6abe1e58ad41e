//! Integration tests for the site service.
//!
//! Each test spins up the real Axum router on a random port with in-memory
//! store/auth and a stub generator, then exercises the REST / WS contracts
//! the widgets rely on.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tower_http::cors::CorsLayer;

use boraine_site::access::{AccessStore, MemoryAuth, MemoryStore, SessionAuth};
use boraine_site::booking::{BookingRegistry, booking_routes};
use boraine_site::error::LlmError;
use boraine_site::llm::{GenerationRequest, TextGenerator};
use boraine_site::payments::{PaymentsState, SimulatedGateway, payment_routes};
use boraine_site::saas::{SaasGenerator, SaasState, saas_routes};
use boraine_site::scout::{ReportCache, ScoutAgent, terminal_routes};
use boraine_site::site::{IntroGate, SiteState, site_routes};
use boraine_site::support::{SupportAgent, support_routes};

/// Maximum time any test may run before we consider it hung. The booking
/// walkthrough alone spends ~4s on pacing delays.
const TEST_TIMEOUT: Duration = Duration::from_secs(15);

const STUB_ANALYSIS: &str = "## 1. EXECUTIVE SUMMARY\nStub analysis content.";

/// Stub generator — no real API calls.
struct StubGenerator;

#[async_trait]
impl TextGenerator for StubGenerator {
    fn model_name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, _request: GenerationRequest) -> Result<String, LlmError> {
        Ok(STUB_ANALYSIS.to_string())
    }
}

/// Start the full router on a random port; return (port, store).
async fn start_server() -> (u16, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let store_dyn: Arc<dyn AccessStore> = store.clone();
    let auth: Arc<dyn SessionAuth> = Arc::new(MemoryAuth);
    let generator: Arc<dyn TextGenerator> = Arc::new(StubGenerator);

    let app = site_routes(SiteState {
        intro: IntroGate::new(),
        auth: Arc::clone(&auth),
    })
    .merge(saas_routes(SaasState {
        generator: Arc::new(SaasGenerator::new(Some(Arc::clone(&generator)))),
        store: Arc::clone(&store_dyn),
        auth: Arc::clone(&auth),
    }))
    .merge(payment_routes(PaymentsState {
        gateway: Arc::new(
            SimulatedGateway::new()
                .with_success_rate(1.0)
                .with_latency(Duration::ZERO),
        ),
        store: Arc::clone(&store_dyn),
        auth: Arc::clone(&auth),
        public_key: "pk_test_integration".to_string(),
    }))
    .merge(booking_routes(BookingRegistry::new()))
    .merge(terminal_routes(
        Arc::new(ScoutAgent::new(Some(Arc::clone(&generator)))),
        ReportCache::new(),
    ))
    .merge(support_routes(Arc::new(SupportAgent::new(Some(generator)))))
    .layer(CorsLayer::permissive());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (port, store)
}

fn parse_ws_json(msg: &Message) -> Value {
    match msg {
        Message::Text(txt) => serde_json::from_str(txt).expect("invalid JSON from server"),
        other => panic!("expected Text frame, got {:?}", other),
    }
}

// ── REST: site surface ───────────────────────────────────────────────

#[tokio::test]
async fn rest_health_endpoint() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/health"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "boraine-site");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rest_pricing_and_tools_are_served() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;

        let tiers: Vec<Value> = reqwest::get(format!("http://127.0.0.1:{port}/api/pricing"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers[1]["name"], "The Growth");

        let tools: Vec<Value> = reqwest::get(format!("http://127.0.0.1:{port}/api/tools"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(tools.len(), 8);
        assert!(tools.iter().any(|t| t["id"] == "tender"));
    })
    .await
    .expect("test timed out");
}

// ── REST: generation gating ──────────────────────────────────────────

#[tokio::test]
async fn generation_requires_a_session() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/tools/tender/generate"))
            .json(&serde_json::json!({"title": "Boraine Holdings", "details": "Security"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 401);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn trial_is_consumed_then_blocked() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;
        let client = reqwest::Client::new();

        // First generation consumes the trial.
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/tools/tender/generate"))
            .bearer_auth("alice")
            .json(&serde_json::json!({"title": "Boraine Holdings", "details": "Security"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["content"], STUB_ANALYSIS);

        // The gate now reports the trial exhausted.
        let access: Value = client
            .get(format!("http://127.0.0.1:{port}/api/tools/tender/access"))
            .bearer_auth("alice")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(access["gate"], "trial_exhausted");

        // Second generation is blocked.
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/tools/tender/generate"))
            .bearer_auth("alice")
            .json(&serde_json::json!({"title": "Boraine Holdings", "details": "Security"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 403);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["locked"], true);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn paid_row_overrides_trial_row() {
    timeout(TEST_TIMEOUT, async {
        let (port, store) = start_server().await;
        let client = reqwest::Client::new();

        // MemoryAuth maps bearer "bob" to user id "user-bob".
        store.record_trial("user-bob", "legal").await.unwrap();
        store.record_purchase("user-bob", "legal").await.unwrap();

        let access: Value = client
            .get(format!("http://127.0.0.1:{port}/api/tools/legal/access"))
            .bearer_auth("bob")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(access["gate"], "paid");

        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/tools/legal/generate"))
            .bearer_auth("bob")
            .json(&serde_json::json!({"title": "Smith v. State", "details": "self-defense"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unknown_tool_id_still_generates() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/tools/mystery/generate"))
            .bearer_auth("carol")
            .json(&serde_json::json!({"title": "Thing", "details": "Stuff"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["content"], STUB_ANALYSIS);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn landscape_requires_an_image() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/tools/landscape/generate"))
            .bearer_auth("dave")
            .json(&serde_json::json!({"title": "Casino Garden B", "details": "Full sun"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);

        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/tools/landscape/generate"))
            .bearer_auth("dave")
            .json(&serde_json::json!({
                "title": "Casino Garden B",
                "details": "Full sun",
                "image": "data:image/png;base64,Zm9v",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    })
    .await
    .expect("test timed out");
}

// ── REST: payments ───────────────────────────────────────────────────

#[tokio::test]
async fn payment_config_exposes_widget_parameters() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;

        let body: Value = reqwest::get(format!(
            "http://127.0.0.1:{port}/api/payments/config?tool_id=tender"
        ))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
        assert_eq!(body["public_key"], "pk_test_integration");
        assert_eq!(body["amount_in_cents"], 49_900);
        assert_eq!(body["currency"], "ZAR");
        assert_eq!(body["product_name"], "TenderFlow Pro License");

        let resp = reqwest::get(format!(
            "http://127.0.0.1:{port}/api/payments/config?tool_id=mystery"
        ))
        .await
        .unwrap();
        assert_eq!(resp.status(), 404);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn checkout_records_paid_entitlement() {
    timeout(TEST_TIMEOUT, async {
        let (port, store) = start_server().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/payments/checkout"))
            .bearer_auth("erin")
            .json(&serde_json::json!({"tool_id": "social", "token": "tok_opaque"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "paid");
        assert!(body["transaction_id"].as_str().unwrap().starts_with("TRX-"));

        let rows = store.user_access("user-erin").await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tool_id, "social");
    })
    .await
    .expect("test timed out");
}

// ── REST: booking dialogue ───────────────────────────────────────────

#[tokio::test]
async fn booking_dialogue_walks_to_completion() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;
        let client = reqwest::Client::new();

        let opened: Value = client
            .post(format!("http://127.0.0.1:{port}/api/booking/start"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let session_id = opened["session_id"].as_str().unwrap().to_string();
        assert_eq!(opened["message"]["step_id"], "welcome");

        let answer = |text: &str| {
            let client = client.clone();
            let session_id = session_id.clone();
            let text = text.to_string();
            async move {
                client
                    .post(format!(
                        "http://127.0.0.1:{port}/api/booking/{session_id}/answer"
                    ))
                    .json(&serde_json::json!({"text": text}))
                    .send()
                    .await
                    .unwrap()
            }
        };

        // Empty answers are rejected without advancing.
        let resp = answer("   ").await;
        assert_eq!(resp.status(), 400);

        let body: Value = answer("Thabo").await.json().await.unwrap();
        assert_eq!(
            body["message"]["text"],
            "Pleasure to meet you, Thabo. Which organization do you represent?"
        );

        let body: Value = answer("Delta Mining").await.json().await.unwrap();
        assert_eq!(body["message"]["kind"], "options");

        let body: Value = answer("R5M - R50M").await.json().await.unwrap();
        assert_eq!(body["message"]["step_id"], "goal");

        let body: Value = answer("Profit Automation").await.json().await.unwrap();
        assert_eq!(body["message"]["kind"], "calendar");
        assert!(
            body["message"]["text"]
                .as_str()
                .unwrap()
                .contains("specializes in Profit Automation")
        );

        let body: Value = answer("Tomorrow, 10:00 AM").await.json().await.unwrap();
        assert_eq!(body["message"]["step_id"], "email");

        let body: Value = answer("thabo@delta.co.za").await.json().await.unwrap();
        assert_eq!(body["message"]["step_id"], "finish");
        assert_eq!(body["done"], true);

        // No further prompts after the closing step.
        let resp = answer("anything").await;
        assert_eq!(resp.status(), 410);
    })
    .await
    .expect("test timed out");
}

// ── REST: intro gating ───────────────────────────────────────────────

#[tokio::test]
async fn intro_shows_once_per_browsing_session() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;
        let client = reqwest::Client::new();

        // First render: intro shown, session cookie issued.
        let resp = client
            .get(format!("http://127.0.0.1:{port}/api/intro"))
            .send()
            .await
            .unwrap();
        let cookie = resp
            .headers()
            .get("set-cookie")
            .expect("session cookie issued")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["show_intro"], true);

        client
            .post(format!("http://127.0.0.1:{port}/api/intro/complete"))
            .header("cookie", &cookie)
            .send()
            .await
            .unwrap();

        // Second render in the same session: suppressed.
        let body: Value = client
            .get(format!("http://127.0.0.1:{port}/api/intro"))
            .header("cookie", &cookie)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["show_intro"], false);

        // A new browsing session (no cookie) sees the intro again.
        let body: Value = client
            .get(format!("http://127.0.0.1:{port}/api/intro"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["show_intro"], true);
    })
    .await
    .expect("test timed out");
}

// ── WS: support chat ─────────────────────────────────────────────────

#[tokio::test]
async fn support_chat_greets_then_replies() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;

        let (mut ws, _) = connect_async(format!("ws://127.0.0.1:{port}/ws/support"))
            .await
            .unwrap();

        let msg = ws.next().await.unwrap().unwrap();
        let json = parse_ws_json(&msg);
        assert_eq!(json["type"], "greeting");
        assert!(json["content"].as_str().unwrap().contains("Nexus"));

        ws.send(Message::Text(
            serde_json::json!({"type": "message", "content": "How much is an agent?"})
                .to_string()
                .into(),
        ))
        .await
        .unwrap();

        let msg = ws.next().await.unwrap().unwrap();
        assert_eq!(parse_ws_json(&msg)["type"], "thinking");

        let msg = ws.next().await.unwrap().unwrap();
        let json = parse_ws_json(&msg);
        assert_eq!(json["type"], "response");
        assert_eq!(json["content"], STUB_ANALYSIS);
    })
    .await
    .expect("test timed out");
}

// ── WS: terminal ─────────────────────────────────────────────────────

#[tokio::test]
async fn terminal_scan_then_report_download() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;

        let (mut ws, _) = connect_async(format!("ws://127.0.0.1:{port}/ws/terminal"))
            .await
            .unwrap();

        let msg = ws.next().await.unwrap().unwrap();
        assert_eq!(parse_ws_json(&msg)["type"], "banner");

        ws.send(Message::Text(
            serde_json::json!({"type": "send", "content": "example.com"})
                .to_string()
                .into(),
        ))
        .await
        .unwrap();

        // Ten scan lines, progress climbing to 100.
        let mut last_progress = 0.0;
        for _ in 0..10 {
            let msg = ws.next().await.unwrap().unwrap();
            let json = parse_ws_json(&msg);
            assert_eq!(json["type"], "scan_log");
            let progress = json["progress"].as_f64().unwrap();
            assert!(progress > last_progress);
            last_progress = progress;
        }
        assert_eq!(last_progress, 100.0);

        let msg = ws.next().await.unwrap().unwrap();
        assert_eq!(parse_ws_json(&msg)["type"], "thinking");

        let msg = ws.next().await.unwrap().unwrap();
        let json = parse_ws_json(&msg);
        assert_eq!(json["type"], "report_ready");
        let report_id = json["report_id"].as_str().unwrap().to_string();
        assert_eq!(json["filename"], "Boraine_Report_example_com.txt");

        let msg = ws.next().await.unwrap().unwrap();
        let json = parse_ws_json(&msg);
        assert_eq!(json["type"], "response");
        assert_eq!(json["content"], STUB_ANALYSIS);

        // Download the retained report.
        let resp = reqwest::get(format!(
            "http://127.0.0.1:{port}/api/terminal/report/{report_id}"
        ))
        .await
        .unwrap();
        assert_eq!(resp.status(), 200);
        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("attachment"));
        assert!(disposition.contains("Boraine_Report_example_com.txt"));

        let body = resp.text().await.unwrap();
        assert!(body.contains("BORAINE"));
        assert!(body.contains("DIGITAL INFRASTRUCTURE AUDIT"));
        assert!(body.contains("Stub analysis content."));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn terminal_unknown_report_is_404() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;

        let fake_id = uuid::Uuid::new_v4();
        let resp = reqwest::get(format!(
            "http://127.0.0.1:{port}/api/terminal/report/{fake_id}"
        ))
        .await
        .unwrap();
        assert_eq!(resp.status(), 404);
    })
    .await
    .expect("test timed out");
}
