/// Unit tests for the enrichment pipeline's pure logic
/// Tests candidate generation, normalization, digesting, prompt construction,
/// reply parsing, and status derivation
use lead_enrichment_api::enrichment::{analysis_status, normalize_lead};
use lead_enrichment_api::gemini_client::parse_analysis_reply;
use lead_enrichment_api::models::{
    AnalysisOutcome, AnalysisResult, EnrichmentResponse, EnrichmentStatus, LeadRequest,
};
use lead_enrichment_api::prompt::build_analysis_prompt;
use lead_enrichment_api::services::{candidate_urls, digest_html};

fn sample_lead() -> LeadRequest {
    LeadRequest {
        full_name: "Jane Doe".to_string(),
        email: "jane.doe@acmeretail.com".to_string(),
        company_name: "Acme Retail".to_string(),
        website: String::new(),
        country: "US".to_string(),
        lead_source: "Website".to_string(),
        budget: "$5000".to_string(),
        notes: String::new(),
        consent: true,
        row_number: Some(7),
    }
}

#[cfg(test)]
mod candidate_generation_tests {
    use super::*;

    #[test]
    fn test_candidate_order_for_two_word_name() {
        let candidates = candidate_urls("Acme Retail");
        assert_eq!(
            candidates,
            vec![
                "https://www.acmeretail.com",
                "https://acmeretail.com",
                "https://www.acme-retail.com",
            ]
        );
    }

    #[test]
    fn test_punctuation_is_stripped() {
        let candidates = candidate_urls("Acme, Inc.");
        assert_eq!(
            candidates,
            vec![
                "https://www.acmeinc.com",
                "https://acmeinc.com",
                "https://www.acme-inc.com",
            ]
        );
    }

    #[test]
    fn test_underscores_survive_cleaning() {
        let candidates = candidate_urls("Acme_Co");
        assert_eq!(candidates[0], "https://www.acme_co.com");
    }

    #[test]
    fn test_single_word_name_repeats_first_form() {
        let candidates = candidate_urls("TechStartup");
        assert_eq!(
            candidates,
            vec![
                "https://www.techstartup.com",
                "https://techstartup.com",
                "https://www.techstartup.com",
            ]
        );
    }

    #[test]
    fn test_three_word_name_hyphenation() {
        let candidates = candidate_urls("Tech Startup Labs");
        assert_eq!(candidates[2], "https://www.tech-startup-labs.com");
    }

    #[test]
    fn test_empty_name_yields_no_candidates() {
        assert!(candidate_urls("").is_empty());
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let candidates = candidate_urls("  Acme  ");
        assert_eq!(candidates[0], "https://www.acme.com");
    }
}

#[cfg(test)]
mod normalization_tests {
    use super::*;

    #[test]
    fn test_strings_are_trimmed_and_email_lowercased() {
        let mut lead = sample_lead();
        lead.full_name = "  Jane Doe  ".to_string();
        lead.email = "  Jane.Doe@AcmeRetail.COM ".to_string();
        lead.company_name = " Acme Retail ".to_string();
        lead.notes = "  urgent  ".to_string();

        let normalized = normalize_lead(&lead);

        assert_eq!(normalized.full_name, "Jane Doe");
        assert_eq!(normalized.email, "jane.doe@acmeretail.com");
        assert_eq!(normalized.company_name, "Acme Retail");
        assert_eq!(normalized.notes, "urgent");
    }

    #[test]
    fn test_non_string_fields_pass_through() {
        let lead = sample_lead();
        let normalized = normalize_lead(&lead);

        assert!(normalized.consent);
        assert_eq!(normalized.row_number, Some(7));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let mut lead = sample_lead();
        lead.email = " MIXED@Case.Org ".to_string();
        lead.budget = " $5000 ".to_string();

        let once = normalize_lead(&lead);
        let again = normalize_lead(&LeadRequest {
            full_name: once.full_name.clone(),
            email: once.email.clone(),
            company_name: once.company_name.clone(),
            website: once.website.clone(),
            country: once.country.clone(),
            lead_source: once.lead_source.clone(),
            budget: once.budget.clone(),
            notes: once.notes.clone(),
            consent: once.consent,
            row_number: once.row_number,
        });

        assert_eq!(once, again);
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_complete_lead_passes() {
        assert!(sample_lead().validate().is_ok());
    }

    #[test]
    fn test_empty_required_field_rejected() {
        let mut lead = sample_lead();
        lead.email = String::new();

        let err = lead.validate().unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let mut lead = sample_lead();
        lead.website = String::new();
        lead.notes = String::new();

        assert!(lead.validate().is_ok());
    }
}

#[cfg(test)]
mod digest_tests {
    use super::*;

    #[test]
    fn test_all_fragments_in_order() {
        let html = r#"<html><head>
            <title> Acme Retail </title>
            <meta name="description" content=" Online retail platform ">
            </head><body>
            <h1>Shop</h1><h1>Deals</h1>
            <a href="/about-us">About</a>
            </body></html>"#;

        assert_eq!(
            digest_html(html).unwrap(),
            "Title: Acme Retail | Description: Online retail platform | Main headings: Shop, Deals | Has about page: Yes"
        );
    }

    #[test]
    fn test_missing_fragments_are_omitted_not_blank() {
        let html = "<html><head><title>Acme</title></head><body></body></html>";
        assert_eq!(digest_html(html).unwrap(), "Title: Acme");
    }

    #[test]
    fn test_no_fragments_yields_none() {
        assert!(digest_html("<html><body><p>hello</p></body></html>").is_none());
    }

    #[test]
    fn test_h1_limited_to_first_three() {
        let html = "<html><body><h1>A</h1><h1>B</h1><h1>C</h1><h1>D</h1></body></html>";
        assert_eq!(digest_html(html).unwrap(), "Main headings: A, B, C");
    }

    #[test]
    fn test_empty_h1_elements_are_skipped() {
        let html = "<html><body><h1> </h1><h1>Real</h1></body></html>";
        assert_eq!(digest_html(html).unwrap(), "Main headings: Real");
    }

    #[test]
    fn test_about_link_match_is_case_insensitive() {
        let html = r#"<html><body><a href="/ABOUT">Us</a></body></html>"#;
        assert_eq!(digest_html(html).unwrap(), "Has about page: Yes");
    }

    #[test]
    fn test_empty_meta_description_is_skipped() {
        let html = r#"<html><head><meta name="description" content=""></head>
            <body><h1>X</h1></body></html>"#;
        assert_eq!(digest_html(html).unwrap(), "Main headings: X");
    }
}

#[cfg(test)]
mod prompt_tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_analysis_prompt("Acme", "info", "Website", "$5000", "notes", "US");
        let b = build_analysis_prompt("Acme", "info", "Website", "$5000", "notes", "US");
        assert_eq!(a, b);
    }

    #[test]
    fn test_lead_fields_are_embedded() {
        let prompt = build_analysis_prompt(
            "Acme Retail",
            "Title: Acme",
            "Referral",
            "$12000",
            "met at expo",
            "Germany",
        );

        assert!(prompt.contains("- Company Name: Acme Retail"));
        assert!(prompt.contains("- Country: Germany"));
        assert!(prompt.contains("- Lead Source: Referral"));
        assert!(prompt.contains("- Estimated Budget: $12000"));
        assert!(prompt.contains("- Additional Notes: met at expo"));
        assert!(prompt.contains("- Company Website Info: Title: Acme"));
    }

    #[test]
    fn test_empty_notes_substituted_with_literal() {
        let prompt = build_analysis_prompt("Acme", "info", "Website", "$1", "", "US");
        assert!(prompt.contains("- Additional Notes: None provided"));
    }

    #[test]
    fn test_empty_company_info_substituted_with_literal() {
        let prompt = build_analysis_prompt("Acme", "", "Website", "$1", "note", "US");
        assert!(prompt.contains("- Company Website Info: No website information available"));
    }

    #[test]
    fn test_company_context_and_json_contract_present() {
        let prompt = build_analysis_prompt("Acme", "info", "Website", "$1", "note", "US");

        assert!(prompt.contains("ABC Company builds AI-powered customer support solutions"));
        assert!(prompt.contains("RESPOND IN THIS EXACT JSON FORMAT:"));
        assert!(prompt.contains("\"leadScore\": 75"));
        assert!(prompt.contains("Respond ONLY with valid JSON"));
        assert!(prompt.contains("Fit with e-commerce/retail industry (0-30 points)"));
        assert!(prompt.contains("Budget alignment (0-25 points)"));
        assert!(prompt.contains("Lead source quality (0-20 points)"));
        assert!(prompt.contains("Overall potential (0-25 points)"));
    }
}

#[cfg(test)]
mod reply_parsing_tests {
    use super::*;

    const VALID_REPLY: &str = r#"{
        "companySummary": "Acme sells shoes online.",
        "fitAssessment": "Strong fit.",
        "leadScore": 82,
        "recommendation": "Book a demo call.",
        "reasoning": "E-commerce retailer with budget."
    }"#;

    #[test]
    fn test_valid_reply_parses_to_success() {
        let result = parse_analysis_reply("Acme", VALID_REPLY);

        assert_eq!(result.outcome, AnalysisOutcome::Success);
        assert_eq!(result.lead_score, 82);
        assert_eq!(result.company_summary, "Acme sells shoes online.");
        assert_eq!(result.fit_assessment, "Strong fit.");
        assert_eq!(result.recommendation, "Book a demo call.");
    }

    #[test]
    fn test_fenced_reply_parses_identically_to_unfenced() {
        let fenced = format!("```json\n{}\n```", VALID_REPLY);
        let bare_fence = format!("```\n{}\n```", VALID_REPLY);

        assert_eq!(
            parse_analysis_reply("Acme", &fenced),
            parse_analysis_reply("Acme", VALID_REPLY)
        );
        assert_eq!(
            parse_analysis_reply("Acme", &bare_fence),
            parse_analysis_reply("Acme", VALID_REPLY)
        );
    }

    #[test]
    fn test_prose_reply_yields_parse_fallback() {
        let result = parse_analysis_reply("Acme Retail", "Sure! Here is my analysis.");

        assert_eq!(result.outcome, AnalysisOutcome::ParseFallback);
        assert_eq!(result.lead_score, 50);
        assert!(result.reasoning.starts_with("JSON parsing error:"));
        assert_eq!(
            result.company_summary,
            "Could not analyze Acme Retail - AI response was not valid JSON."
        );
        assert_eq!(
            result.recommendation,
            "Manual review required - AI analysis failed."
        );
    }

    #[test]
    fn test_missing_field_yields_parse_fallback() {
        let reply = r#"{"companySummary":"s","fitAssessment":"f","leadScore":80,"recommendation":"r"}"#;
        let result = parse_analysis_reply("Acme", reply);

        assert_eq!(result.outcome, AnalysisOutcome::ParseFallback);
        assert_eq!(result.lead_score, 50);
        assert!(result.reasoning.starts_with("JSON parsing error:"));
    }

    #[test]
    fn test_out_of_range_score_yields_parse_fallback() {
        let high = r#"{"companySummary":"s","fitAssessment":"f","leadScore":150,"recommendation":"r","reasoning":"x"}"#;
        let negative = r#"{"companySummary":"s","fitAssessment":"f","leadScore":-5,"recommendation":"r","reasoning":"x"}"#;

        for reply in [high, negative] {
            let result = parse_analysis_reply("Acme", reply);
            assert_eq!(result.outcome, AnalysisOutcome::ParseFallback);
            assert_eq!(result.lead_score, 50);
            assert!(result.reasoning.starts_with("JSON parsing error:"));
        }
    }

    #[test]
    fn test_boundary_scores_are_accepted() {
        for score in [0, 100] {
            let reply = format!(
                r#"{{"companySummary":"s","fitAssessment":"f","leadScore":{},"recommendation":"r","reasoning":"x"}}"#,
                score
            );
            let result = parse_analysis_reply("Acme", &reply);
            assert_eq!(result.outcome, AnalysisOutcome::Success);
            assert_eq!(result.lead_score, score);
        }
    }

    #[test]
    fn test_non_integer_score_yields_parse_fallback() {
        let reply = r#"{"companySummary":"s","fitAssessment":"f","leadScore":"82","recommendation":"r","reasoning":"x"}"#;
        let result = parse_analysis_reply("Acme", reply);

        assert_eq!(result.outcome, AnalysisOutcome::ParseFallback);
    }

    #[test]
    fn test_unknown_extra_fields_are_tolerated() {
        let reply = r#"{"companySummary":"s","fitAssessment":"f","leadScore":60,"recommendation":"r","reasoning":"x","confidence":0.9}"#;
        let result = parse_analysis_reply("Acme", reply);

        assert_eq!(result.outcome, AnalysisOutcome::Success);
        assert_eq!(result.lead_score, 60);
    }
}

#[cfg(test)]
mod status_tests {
    use super::*;

    fn success_result() -> AnalysisResult {
        parse_analysis_reply(
            "Acme",
            r#"{"companySummary":"s","fitAssessment":"f","leadScore":70,"recommendation":"r","reasoning":"solid"}"#,
        )
    }

    #[test]
    fn test_model_built_analysis_keeps_success() {
        let (status, error_message) = analysis_status(&success_result());

        assert_eq!(status, EnrichmentStatus::Success);
        assert!(error_message.is_none());
    }

    #[test]
    fn test_parse_fallback_demotes_to_partial() {
        let analysis = AnalysisResult::parse_fallback("Acme", "expected value at line 1");
        let (status, error_message) = analysis_status(&analysis);

        assert_eq!(status, EnrichmentStatus::Partial);
        let message = error_message.unwrap();
        assert!(message.starts_with("JSON parsing error:"));
        assert_eq!(message, analysis.reasoning);
    }

    #[test]
    fn test_transport_fallback_demotes_to_partial() {
        let analysis = AnalysisResult::transport_fallback("Acme", "connection refused");
        let (status, error_message) = analysis_status(&analysis);

        assert_eq!(status, EnrichmentStatus::Partial);
        assert!(error_message.unwrap().starts_with("Error:"));
    }

    #[test]
    fn test_error_envelope_shape() {
        let response = EnrichmentResponse::error(
            "jane@acme.com".to_string(),
            "client construction failed".to_string(),
        );

        assert_eq!(response.status, EnrichmentStatus::Error);
        assert_eq!(response.normalized_email, "jane@acme.com");
        assert_eq!(response.ai_fit_score, 0);
        assert_eq!(response.ai_recommendation, "Manual review required");
        assert!(response.enriched_website.is_empty());
        assert!(response.company_info.is_empty());
        assert_eq!(
            response.error_message.as_deref(),
            Some("client construction failed")
        );
    }
}

#[cfg(test)]
mod wire_format_tests {
    use super::*;

    #[test]
    fn test_lead_request_accepts_camel_case_payload() {
        let payload = r#"{
            "fullName": "Jane Doe",
            "email": "Jane@Acme.com",
            "companyName": "Acme Retail",
            "country": "US",
            "leadSource": "Website",
            "budget": "$5000"
        }"#;

        let lead: LeadRequest = serde_json::from_str(payload).unwrap();

        assert_eq!(lead.full_name, "Jane Doe");
        assert_eq!(lead.company_name, "Acme Retail");
        assert_eq!(lead.website, "");
        assert_eq!(lead.notes, "");
        assert!(lead.consent);
        assert_eq!(lead.row_number, None);
    }

    #[test]
    fn test_response_serializes_camel_case_with_status_tag() {
        let response = EnrichmentResponse {
            status: EnrichmentStatus::Partial,
            normalized_email: "jane@acme.com".to_string(),
            enriched_website: "https://acme.com".to_string(),
            company_info: "Title: Acme".to_string(),
            ai_summary: "summary".to_string(),
            ai_fit_score: 50,
            ai_recommendation: "Manual review required.".to_string(),
            ai_reasoning: "Error: boom".to_string(),
            error_message: Some("Error: boom".to_string()),
        };

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["status"], "partial");
        assert_eq!(value["normalizedEmail"], "jane@acme.com");
        assert_eq!(value["enrichedWebsite"], "https://acme.com");
        assert_eq!(value["aiFitScore"], 50);
        assert_eq!(value["errorMessage"], "Error: boom");
    }
}
