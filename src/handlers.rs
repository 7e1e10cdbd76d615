use crate::config::Config;
use crate::enrichment::enrich_lead_workflow;
use crate::errors::AppError;
use crate::models::{EnrichmentResponse, LeadRequest};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
}

/// GET /
///
/// Service identity endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with service info JSON.
pub async fn root() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-enrichment-api",
            "version": "0.1.0"
        })),
    )
}

/// GET /health
///
/// Liveness check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// POST /enrich
///
/// Qualifies one inbound lead: validates required fields, then runs the full
/// enrichment pipeline (website resolution, content extraction, Gemini
/// analysis) and returns the response envelope. Pipeline failures never
/// surface as HTTP errors; they are folded into the envelope's status field.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `lead` - JSON body containing the raw lead payload.
///
/// # Returns
///
/// * `Result<Json<EnrichmentResponse>, AppError>` - The enrichment response,
///   or HTTP 400 when a required field is missing.
pub async fn enrich_lead(
    State(state): State<Arc<AppState>>,
    Json(lead): Json<LeadRequest>,
) -> Result<Json<EnrichmentResponse>, AppError> {
    tracing::info!("Received lead for enrichment: {}", lead.company_name);

    lead.validate()?;

    let response = enrich_lead_workflow(&state.config, &lead).await;

    tracing::info!(
        "Enrichment completed for '{}' with status {:?}",
        lead.company_name,
        response.status
    );

    Ok(Json(response))
}
