/// Shared enrichment logic for the lead qualification workflow
///
/// This module provides the orchestration for one enrichment request:
/// 1. Normalize lead fields
/// 2. Resolve the company website (discovery only when none was supplied)
/// 3. Extract a content digest from the website
/// 4. Run the Gemini analysis
/// 5. Assemble the response envelope with the derived status
use crate::config::Config;
use crate::errors::AppError;
use crate::gemini_client::GeminiClient;
use crate::models::{
    AnalysisResult, EnrichmentResponse, EnrichmentStatus, LeadRequest, NormalizedLead,
};
use crate::services::{ContentExtractor, WebsiteResolver};

/// Normalizes inbound lead fields: trims every string, lower-cases the email.
/// The result is immutable; the pipeline only reads it.
pub fn normalize_lead(lead: &LeadRequest) -> NormalizedLead {
    NormalizedLead {
        full_name: lead.full_name.trim().to_string(),
        email: lead.email.trim().to_lowercase(),
        company_name: lead.company_name.trim().to_string(),
        website: lead.website.trim().to_string(),
        country: lead.country.trim().to_string(),
        lead_source: lead.lead_source.trim().to_string(),
        budget: lead.budget.trim().to_string(),
        notes: lead.notes.trim().to_string(),
        consent: lead.consent,
        row_number: lead.row_number,
    }
}

/// Derives the response status for an analysis.
///
/// Fallback-built verdicts demote the response to partial and surface their
/// reasoning as the error message; model-built verdicts keep success.
pub fn analysis_status(analysis: &AnalysisResult) -> (EnrichmentStatus, Option<String>) {
    if analysis.is_fallback() {
        (EnrichmentStatus::Partial, Some(analysis.reasoning.clone()))
    } else {
        (EnrichmentStatus::Success, None)
    }
}

/// Complete enrichment workflow for a lead.
///
/// Never fails outward: anything that escapes a pipeline stage is caught here
/// and converted into a status="error" response carrying the normalized email
/// (re-derived from the raw request) and the failure text.
pub async fn enrich_lead_workflow(config: &Config, lead: &LeadRequest) -> EnrichmentResponse {
    match try_enrich(config, lead).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Error enriching lead: {}", e);
            EnrichmentResponse::error(lead.email.trim().to_lowercase(), e.to_string())
        }
    }
}

async fn try_enrich(config: &Config, lead: &LeadRequest) -> Result<EnrichmentResponse, AppError> {
    let normalized = normalize_lead(lead);
    tracing::info!("Normalized email: {}", normalized.email);

    // Step 1: Resolve the company website
    tracing::info!(
        "Step 1: Resolving website for '{}'",
        normalized.company_name
    );
    let resolver = WebsiteResolver::new()?;
    let enriched_website = resolver
        .resolve(&normalized.company_name, &normalized.website)
        .await;
    tracing::info!("Enriched website: {}", enriched_website);

    // Step 2: Extract the content digest
    tracing::info!("Step 2: Extracting website content");
    let extractor = ContentExtractor::new()?;
    let company_info = extractor.extract(&enriched_website).await;

    // Step 3: Run the Gemini analysis
    tracing::info!("Step 3: Analyzing lead with Gemini");
    let gemini = GeminiClient::new(config)?;
    let analysis = gemini.analyze(&normalized, &company_info).await;
    tracing::info!("AI Score: {}", analysis.lead_score);

    // Step 4: Assemble the response envelope
    let (status, error_message) = analysis_status(&analysis);

    Ok(EnrichmentResponse {
        status,
        normalized_email: normalized.email,
        enriched_website,
        company_info,
        ai_summary: analysis.company_summary,
        ai_fit_score: analysis.lead_score,
        ai_recommendation: analysis.recommendation,
        ai_reasoning: analysis.reasoning,
        error_message,
    })
}
