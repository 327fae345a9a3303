// API Server Binary Entry Point
//
// Purpose: Train the diagnosis pipeline and serve it over Axum
// Usage: cargo run --features api --bin api_server

use cotton_diagnosis::api_server::{create_router, AppState};
use cotton_diagnosis::{Diagnoser, KnowledgeBase, PipelineConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "cotton_diagnosis=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let disease_data = std::env::var("DISEASE_DATA")
        .unwrap_or_else(|_| "data/doencas_algodoeiro.csv".to_string());

    let config_path = std::env::var("PIPELINE_CONFIG").ok();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    tracing::info!("Configuration:");
    tracing::info!("  DISEASE_DATA: {}", disease_data);
    tracing::info!("  PIPELINE_CONFIG: {}", config_path.as_deref().unwrap_or("(defaults)"));
    tracing::info!("  PORT: {}", port);

    let config = match &config_path {
        Some(path) => PipelineConfig::load(std::path::Path::new(path))?,
        None => PipelineConfig::default(),
    };

    // Train once; the state is read-only afterwards
    let kb = KnowledgeBase::load(&disease_data)?;
    let diagnoser = Diagnoser::new(kb, config)?;
    let state = AppState::new(diagnoser);
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
