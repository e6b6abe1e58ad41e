use std::sync::Arc;

use boraine_site::access::{AccessStore, SessionAuth, SupabaseClient};
use boraine_site::booking::{BookingRegistry, booking_routes};
use boraine_site::config::SiteConfig;
use boraine_site::llm::create_generator;
use boraine_site::payments::{PaymentsState, SimulatedGateway, payment_routes};
use boraine_site::saas::{SaasGenerator, SaasState, saas_routes};
use boraine_site::scout::{ReportCache, ScoutAgent, terminal_routes};
use boraine_site::site::{IntroGate, SiteState, site_routes};
use boraine_site::support::{SupportAgent, support_routes};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = SiteConfig::from_env()?;

    eprintln!("⚡ Boraine Site v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Bind: http://{}", config.bind_addr);
    eprintln!("   Terminal WS: ws://{}/ws/terminal", config.bind_addr);
    eprintln!("   Support WS: ws://{}/ws/support", config.bind_addr);
    eprintln!("   Data store: {}", config.supabase_url);

    // ── Generation ───────────────────────────────────────────────────────
    let generator = create_generator(&config);
    match &generator {
        Some(g) => eprintln!("   Generation: enabled (model: {})", g.model_name()),
        None => eprintln!("   Generation: disabled (no API key — widgets degrade to error copy)"),
    }

    // ── Hosted backend ───────────────────────────────────────────────────
    let supabase = Arc::new(SupabaseClient::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    ));
    let store: Arc<dyn AccessStore> = supabase.clone();
    let auth: Arc<dyn SessionAuth> = supabase;

    // ── Widgets ──────────────────────────────────────────────────────────
    let scout = Arc::new(ScoutAgent::new(generator.clone()));
    let saas = Arc::new(SaasGenerator::new(generator.clone()));
    let support = Arc::new(SupportAgent::new(generator));
    let gateway = Arc::new(SimulatedGateway::new());

    let mut app = site_routes(SiteState {
        intro: IntroGate::new(),
        auth: Arc::clone(&auth),
    })
    .merge(saas_routes(SaasState {
        generator: saas,
        store: Arc::clone(&store),
        auth: Arc::clone(&auth),
    }))
    .merge(payment_routes(PaymentsState {
        gateway,
        store: Arc::clone(&store),
        auth: Arc::clone(&auth),
        public_key: config.yoco_public_key.clone(),
    }))
    .merge(booking_routes(BookingRegistry::new()))
    .merge(terminal_routes(scout, ReportCache::new()))
    .merge(support_routes(support))
    .layer(CorsLayer::permissive());

    if let Some(dir) = &config.static_dir {
        eprintln!("   Static assets: {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }
    eprintln!();

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Site server started");
    axum::serve(listener, app).await?;

    Ok(())
}
