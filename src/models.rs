use crate::errors::AppError;
use serde::{Deserialize, Serialize};

// ============ Request Models ============

/// Inbound lead payload submitted for qualification.
///
/// Wire format is camelCase, matching the spreadsheet-driven intake forms
/// that feed this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRequest {
    /// Contact person's full name.
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Contact email address.
    pub email: String,
    /// Company the lead represents.
    #[serde(rename = "companyName")]
    pub company_name: String,
    /// Known company website, if the lead supplied one.
    #[serde(default)]
    pub website: String,
    /// Country of the company.
    pub country: String,
    /// Where the lead came from (Website, Referral, LinkedIn, Event, ...).
    #[serde(rename = "leadSource")]
    pub lead_source: String,
    /// Estimated budget as free text (e.g. "$5000").
    pub budget: String,
    /// Free-text notes from the intake form.
    #[serde(default)]
    pub notes: String,
    /// Marketing consent flag.
    #[serde(default = "default_consent")]
    pub consent: bool,
    /// Row number in the source spreadsheet, when imported in bulk.
    #[serde(rename = "rowNumber")]
    pub row_number: Option<i64>,
}

fn default_consent() -> bool {
    true
}

impl LeadRequest {
    /// Validates that every required field is non-empty.
    ///
    /// # Returns
    ///
    /// * `Result<(), AppError>` - Ok, or `BadRequest` naming the first missing field.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("companyName", &self.company_name),
            ("country", &self.country),
            ("leadSource", &self.lead_source),
            ("budget", &self.budget),
        ];

        for (field, value) in required {
            if value.is_empty() {
                return Err(AppError::BadRequest(format!(
                    "Field '{}' is required and cannot be empty",
                    field
                )));
            }
        }

        Ok(())
    }
}

/// A lead after normalization: every string trimmed, email lower-cased.
///
/// The pipeline only ever reads this; nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLead {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub website: String,
    pub country: String,
    pub lead_source: String,
    pub budget: String,
    pub notes: String,
    pub consent: bool,
    pub row_number: Option<i64>,
}

// ============ Analysis Models ============

/// Raw model reply, parsed verbatim from the Gemini response text.
///
/// All five fields are required; unknown extra fields are ignored. Range
/// checking of `lead_score` happens when mapping into [`AnalysisResult`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnalysis {
    #[serde(rename = "companySummary")]
    pub company_summary: String,
    #[serde(rename = "fitAssessment")]
    pub fit_assessment: String,
    #[serde(rename = "leadScore")]
    pub lead_score: i64,
    pub recommendation: String,
    pub reasoning: String,
}

/// How an [`AnalysisResult`] was produced.
///
/// This discriminator, not the reasoning text, is the authoritative signal
/// for demoting the response status to "partial". The fallback constructors
/// still emit the documented reasoning prefixes ("JSON parsing error:",
/// "Error:") as a stable human-readable contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The model reply parsed and validated cleanly.
    Success,
    /// The model replied but the reply was not a usable JSON verdict.
    ParseFallback,
    /// The model call itself failed (network, quota, missing API key, ...).
    TransportFallback,
}

/// Structured lead verdict, either parsed from the model or built from one
/// of the two fixed fallback templates. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub company_summary: String,
    pub fit_assessment: String,
    /// Lead quality score, always within [0, 100].
    pub lead_score: i32,
    pub recommendation: String,
    pub reasoning: String,
    pub outcome: AnalysisOutcome,
}

impl AnalysisResult {
    /// Maps a raw model reply onto an `AnalysisResult`, range-checking the score.
    ///
    /// # Returns
    ///
    /// * `Result<Self, String>` - The mapped result, or a parse-failure description.
    pub fn from_raw(raw: RawAnalysis) -> Result<Self, String> {
        if !(0..=100).contains(&raw.lead_score) {
            return Err(format!(
                "leadScore {} is outside the required 0-100 range",
                raw.lead_score
            ));
        }

        Ok(Self {
            company_summary: raw.company_summary,
            fit_assessment: raw.fit_assessment,
            lead_score: raw.lead_score as i32,
            recommendation: raw.recommendation,
            reasoning: raw.reasoning,
            outcome: AnalysisOutcome::Success,
        })
    }

    /// Fixed verdict used when the model replied but the reply could not be
    /// parsed into a valid analysis.
    pub fn parse_fallback(company_name: &str, detail: &str) -> Self {
        Self {
            company_summary: format!(
                "Could not analyze {} - AI response was not valid JSON.",
                company_name
            ),
            fit_assessment: "Unable to assess fit due to processing error.".to_string(),
            lead_score: 50,
            recommendation: "Manual review required - AI analysis failed.".to_string(),
            reasoning: format!("JSON parsing error: {}", detail),
            outcome: AnalysisOutcome::ParseFallback,
        }
    }

    /// Fixed verdict used when the model call itself failed.
    pub fn transport_fallback(company_name: &str, detail: &str) -> Self {
        Self {
            company_summary: format!("Error analyzing {}.", company_name),
            fit_assessment: "Unable to assess.".to_string(),
            lead_score: 50,
            recommendation: "Manual review required.".to_string(),
            reasoning: format!("Error: {}", detail),
            outcome: AnalysisOutcome::TransportFallback,
        }
    }

    /// Whether this result came from one of the fallback templates.
    pub fn is_fallback(&self) -> bool {
        self.outcome != AnalysisOutcome::Success
    }
}

// ============ Response Models ============

/// Overall outcome of one enrichment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrichmentStatus {
    /// Pipeline completed with a model-built analysis.
    #[serde(rename = "success")]
    Success,
    /// Pipeline completed but the analysis came from a fallback template.
    #[serde(rename = "partial")]
    Partial,
    /// The orchestrator itself caught an unexpected failure.
    #[serde(rename = "error")]
    Error,
}

/// Response envelope returned for every enrichment request.
///
/// The shape never changes: fallback and error outcomes fill the same fields
/// with their documented substitute values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResponse {
    pub status: EnrichmentStatus,
    #[serde(rename = "normalizedEmail")]
    pub normalized_email: String,
    #[serde(rename = "enrichedWebsite")]
    pub enriched_website: String,
    #[serde(rename = "companyInfo")]
    pub company_info: String,
    #[serde(rename = "aiSummary")]
    pub ai_summary: String,
    #[serde(rename = "aiFitScore")]
    pub ai_fit_score: i32,
    #[serde(rename = "aiRecommendation")]
    pub ai_recommendation: String,
    #[serde(rename = "aiReasoning")]
    pub ai_reasoning: String,
    #[serde(rename = "errorMessage")]
    pub error_message: Option<String>,
}

impl EnrichmentResponse {
    /// Builds the status="error" envelope for unexpected orchestrator-level
    /// failures. The caller re-derives the email from the raw request.
    pub fn error(normalized_email: String, error_message: String) -> Self {
        Self {
            status: EnrichmentStatus::Error,
            normalized_email,
            enriched_website: String::new(),
            company_info: String::new(),
            ai_summary: String::new(),
            ai_fit_score: 0,
            ai_recommendation: "Manual review required".to_string(),
            ai_reasoning: String::new(),
            error_message: Some(error_message),
        }
    }
}
