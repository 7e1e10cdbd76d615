use crate::config::Config;
use crate::errors::AppError;
use crate::models::{AnalysisResult, NormalizedLead, RawAnalysis};
use crate::prompt::build_analysis_prompt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Fast-tier Gemini model used for lead analysis.
const GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Sampling temperature for analysis calls. Low, for stable verdicts.
const TEMPERATURE: f32 = 0.3;

/// Output token cap for analysis calls.
const MAX_OUTPUT_TOKENS: u32 = 500;

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

/// Client for the Gemini generateContent REST API.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Creates a new `GeminiClient` from configuration.
    ///
    /// The API key stays optional: an unconfigured key is a typed state that
    /// routes every analysis through the transport-failure fallback instead
    /// of failing startup.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create Gemini client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    /// Sends one prompt to Gemini and returns the raw reply text.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The rendered analysis prompt.
    ///
    /// # Returns
    ///
    /// * `Result<String, AppError>` - The reply text, or a transport error.
    pub async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::ExternalApiError("GEMINI_API_KEY is not configured".to_string())
        })?;

        // Build URL with proper parameter encoding; the key never reaches logs
        let url = Url::parse_with_params(
            &format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, GEMINI_MODEL
            ),
            &[("key", api_key)],
        )
        .map_err(|e| AppError::ExternalApiError(format!("Failed to build URL: {}", e)))?;

        tracing::debug!(
            "Gemini request: {}/v1beta/models/{}:generateContent?key=[REDACTED]",
            self.base_url,
            GEMINI_MODEL
        );

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self.client.post(url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Gemini returned status {}: {}",
                status, error_text
            )));
        }

        let reply: GeminiResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse Gemini response: {}", e))
        })?;

        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                AppError::ExternalApiError("Gemini reply contained no text parts".to_string())
            })
    }

    /// Runs the full analysis for one lead. Never fails: the result is either
    /// the parsed model verdict or one of the two fixed fallbacks.
    ///
    /// # Arguments
    ///
    /// * `lead` - The normalized lead under analysis.
    /// * `company_info` - The content digest for the lead's website.
    ///
    /// # Returns
    ///
    /// * `AnalysisResult` - Parsed verdict, parse fallback, or transport fallback.
    pub async fn analyze(&self, lead: &NormalizedLead, company_info: &str) -> AnalysisResult {
        let prompt = build_analysis_prompt(
            &lead.company_name,
            company_info,
            &lead.lead_source,
            &lead.budget,
            &lead.notes,
            &lead.country,
        );

        match self.generate(&prompt).await {
            Ok(reply) => parse_analysis_reply(&lead.company_name, &reply),
            Err(e) => {
                tracing::error!("AI service error: {}", e);
                AnalysisResult::transport_fallback(&lead.company_name, &e.to_string())
            }
        }
    }
}

/// Strips a wrapping triple-backtick code fence (with or without a leading
/// "json" language tag) from a model reply, returning the trimmed inner text.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with("```") {
        return text;
    }

    let inner = text.split("```").nth(1).unwrap_or("");
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

/// Parses a model reply into an [`AnalysisResult`]. Malformed JSON, missing
/// fields, and out-of-range scores all map to the parse-failure fallback;
/// this function itself never fails.
pub fn parse_analysis_reply(company_name: &str, reply: &str) -> AnalysisResult {
    let stripped = strip_code_fence(reply);

    let raw: RawAnalysis = match serde_json::from_str(stripped) {
        Ok(raw) => raw,
        Err(e) => return AnalysisResult::parse_fallback(company_name, &e.to_string()),
    };

    match AnalysisResult::from_raw(raw) {
        Ok(result) => result,
        Err(detail) => AnalysisResult::parse_fallback(company_name, &detail),
    }
}
