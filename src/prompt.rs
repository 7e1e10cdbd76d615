/// Static description of ABC Company's business model and target-customer
/// profile, embedded verbatim in every analysis prompt.
pub const ABC_COMPANY_CONTEXT: &str = "\
ABC Company builds AI-powered customer support solutions designed for small and mid-sized
e-commerce businesses. The platform helps online retailers automate first-line support,
reduce response times, and improve customer satisfaction by combining conversational AI
with human-in-the-loop workflows.

Target customers:
- Small to mid-sized e-commerce businesses
- Online retailers
- Companies looking to automate customer support
- Businesses wanting to reduce support response times";

/// Renders the lead-qualification prompt. Pure and deterministic: identical
/// inputs produce byte-identical text.
///
/// Empty `notes` and `company_info` are substituted with the literals
/// `None provided` and `No website information available`.
pub fn build_analysis_prompt(
    company_name: &str,
    company_info: &str,
    lead_source: &str,
    budget: &str,
    notes: &str,
    country: &str,
) -> String {
    let notes = if notes.is_empty() {
        "None provided"
    } else {
        notes
    };
    let company_info = if company_info.is_empty() {
        "No website information available"
    } else {
        company_info
    };

    format!(
        "You are a lead qualification AI for ABC Company.

{context}

Analyze the following lead and provide a structured assessment:

LEAD INFORMATION:
- Company Name: {company_name}
- Country: {country}
- Lead Source: {lead_source}
- Estimated Budget: {budget}
- Additional Notes: {notes}
- Company Website Info: {company_info}

TASK:
1. Summarize what this company appears to do (2-3 sentences)
2. Assess how well this lead fits ABC Company's target market
3. Provide a lead quality score from 0-100 based on:
   - Fit with e-commerce/retail industry (0-30 points)
   - Budget alignment (0-25 points)
   - Lead source quality (0-20 points)
   - Overall potential (0-25 points)
4. Recommend a specific next action

RESPOND IN THIS EXACT JSON FORMAT:
{{
    \"companySummary\": \"Brief 2-3 sentence summary of the company\",
    \"fitAssessment\": \"How well they fit as a potential customer\",
    \"leadScore\": 75,
    \"recommendation\": \"Specific next action to take\",
    \"reasoning\": \"Brief explanation of score and recommendation\"
}}

IMPORTANT: Respond ONLY with valid JSON, no additional text.",
        context = ABC_COMPANY_CONTEXT,
        company_name = company_name,
        country = country,
        lead_source = lead_source,
        budget = budget,
        notes = notes,
        company_info = company_info,
    )
}
