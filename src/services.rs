use crate::errors::AppError;
use regex::Regex;
use reqwest::{redirect, Client};
use scraper::{Html, Selector};
use std::time::Duration;

/// User agent sent on outbound probes and fetches. Some sites reject
/// requests without one.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; lead-enrichment-api/0.1)";

/// Generates the three candidate URLs for a company without a known website,
/// in fixed priority order:
///
/// 1. `https://www.<name>.com` (spaces removed)
/// 2. `https://<name>.com` (spaces removed)
/// 3. `https://www.<name>.com` (spaces replaced by hyphens)
///
/// The name is first stripped of everything except word characters and
/// whitespace, trimmed, and lower-cased. An empty company name yields no
/// candidates.
pub fn candidate_urls(company_name: &str) -> Vec<String> {
    if company_name.is_empty() {
        return Vec::new();
    }

    let clean_name = Regex::new(r"[^\w\s]")
        .unwrap()
        .replace_all(company_name, "")
        .trim()
        .to_string();

    let joined = clean_name.to_lowercase().replace(' ', "");
    let hyphenated = clean_name.to_lowercase().replace(' ', "-");

    vec![
        format!("https://www.{}.com", joined),
        format!("https://{}.com", joined),
        format!("https://www.{}.com", hyphenated),
    ]
}

/// Discovers and verifies company websites.
///
/// A lead-supplied website is trusted as-is; otherwise the candidate URLs
/// from [`candidate_urls`] are probed in order. The guessing heuristic is
/// isolated here: the orchestrator only calls [`WebsiteResolver::resolve`],
/// so a real domain-lookup service could replace this struct wholesale.
pub struct WebsiteResolver {
    client: Client,
}

impl WebsiteResolver {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .redirect(redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create probe client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Resolves the lead's website.
    ///
    /// # Arguments
    ///
    /// * `company_name` - Company name used for discovery.
    /// * `known_website` - Website supplied with the lead; returned unchanged
    ///   (no probing) when non-empty.
    ///
    /// # Returns
    ///
    /// * `String` - The resolved website URL, or empty when discovery failed.
    pub async fn resolve(&self, company_name: &str, known_website: &str) -> String {
        if !known_website.is_empty() {
            return known_website.to_string();
        }

        self.probe_candidates(&candidate_urls(company_name)).await
    }

    /// Probes candidates with one HEAD request each (5s timeout, redirects
    /// followed) and returns the first whose final status is < 400. Probe
    /// failures skip to the next candidate; no candidate is retried.
    pub async fn probe_candidates(&self, candidates: &[String]) -> String {
        for candidate in candidates {
            tracing::debug!("Probing candidate website: {}", candidate);
            match self.client.head(candidate).send().await {
                Ok(response) if response.status().as_u16() < 400 => {
                    tracing::info!("✓ Website discovered: {}", candidate);
                    return candidate.clone();
                }
                Ok(response) => {
                    tracing::debug!(
                        "Candidate {} rejected with status {}",
                        candidate,
                        response.status()
                    );
                }
                Err(e) => {
                    tracing::debug!("Candidate {} unreachable: {}", candidate, e);
                }
            }
        }

        String::new()
    }
}

/// Fetches a company website and reduces it to a compact textual digest.
pub struct ContentExtractor {
    client: Client,
}

impl ContentExtractor {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create fetch client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Fetches the page and digests it. Never fails: every failure mode maps
    /// to a descriptive string, so the caller always has something to feed
    /// the analysis prompt.
    ///
    /// # Arguments
    ///
    /// * `website` - The URL to fetch; a missing scheme is defaulted to https.
    ///
    /// # Returns
    ///
    /// * `String` - The labeled digest, or a human-readable failure message.
    pub async fn extract(&self, website: &str) -> String {
        if website.is_empty() {
            return "No website available for enrichment.".to_string();
        }

        let website = if website.starts_with("http://") || website.starts_with("https://") {
            website.to_string()
        } else {
            format!("https://{}", website)
        };

        tracing::debug!("Fetching company website: {}", website);

        let response = match self.client.get(&website).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return format!("Website {} timed out during fetch.", website);
            }
            Err(e) => {
                return format!("Could not fetch website info: {}", e);
            }
        };

        if !response.status().is_success() {
            return format!("Website returned error: {}", response.status().as_u16());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                return format!("Website {} timed out during fetch.", website);
            }
            Err(e) => {
                return format!("Could not fetch website info: {}", e);
            }
        };

        match digest_html(&body) {
            Some(digest) => digest,
            None => format!(
                "Website accessible at {}, but limited content extracted.",
                website
            ),
        }
    }
}

/// Reduces raw HTML to the ordered digest fragments, joined with `" | "`:
/// page title, meta description, up to three `<h1>` headings, and an
/// about-page marker. Returns `None` when no fragment was found.
pub fn digest_html(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    let mut info_parts: Vec<String> = Vec::new();

    let title_sel = Selector::parse("title").unwrap();
    if let Some(el) = doc.select(&title_sel).next() {
        info_parts.push(format!("Title: {}", el.text().collect::<String>().trim()));
    }

    let meta_sel = Selector::parse(r#"meta[name="description"]"#).unwrap();
    if let Some(content) = doc
        .select(&meta_sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .filter(|content| !content.is_empty())
    {
        info_parts.push(format!("Description: {}", content.trim()));
    }

    let h1_sel = Selector::parse("h1").unwrap();
    let headings: Vec<String> = doc
        .select(&h1_sel)
        .take(3)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();
    if !headings.is_empty() {
        info_parts.push(format!("Main headings: {}", headings.join(", ")));
    }

    let link_sel = Selector::parse("a[href]").unwrap();
    let has_about = doc.select(&link_sel).any(|el| {
        el.value()
            .attr("href")
            .map(|href| href.to_lowercase().contains("about"))
            .unwrap_or(false)
    });
    if has_about {
        info_parts.push("Has about page: Yes".to_string());
    }

    if info_parts.is_empty() {
        None
    } else {
        Some(info_parts.join(" | "))
    }
}
