use serde::Deserialize;

/// Default Gemini API endpoint. Overridable via `GEMINI_BASE_URL`, which the
/// integration tests use to point the client at a mock server.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Gemini API key. Optional: when absent the service still runs, but every
    /// analysis call degrades to the transport-failure fallback.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            gemini_base_url: match std::env::var("GEMINI_BASE_URL") {
                Ok(url) if !url.trim().is_empty() => {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("GEMINI_BASE_URL must start with http:// or https://");
                    }
                    url.trim_end_matches('/').to_string()
                }
                _ => DEFAULT_GEMINI_BASE_URL.to_string(),
            },
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        if config.gemini_api_key.is_some() {
            tracing::info!("Gemini API key configured");
        } else {
            tracing::warn!(
                "GEMINI_API_KEY not found in environment; lead analysis will return fallback results"
            );
        }
        tracing::debug!("Gemini Base URL: {}", config.gemini_base_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
