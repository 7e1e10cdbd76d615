mod config;
mod enrichment;
mod errors;
mod gemini_client;
mod handlers;
mod models;
mod prompt;
mod services;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading (including the optional Gemini API key).
/// - HTTP routes and middleware (CORS, body size limit, request tracing).
///
/// It then starts the Axum server.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_enrichment_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration (logs a warning when GEMINI_API_KEY is absent; the
    // service still runs and every analysis degrades to the fallback path)
    let config = Config::from_env()?;

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        config: config.clone(),
    });

    // Build app: enrichment endpoint plus liveness endpoints
    let app = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/enrich", post(handlers::enrich_lead))
        .layer(
            ServiceBuilder::new()
                // Request size limit: 1MB max payload (lead payloads are small)
                .layer(RequestBodyLimitLayer::new(1024 * 1024)),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
