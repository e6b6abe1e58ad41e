//! Per-tool persona instructions and prompt templates. A dictionary
//! lookup — unknown tool ids fall back to a generic prompt rather than
//! failing.

/// Instruction + prompt pair forwarded for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPrompt {
    /// Persona instruction; empty means none is sent.
    pub instruction: String,
    pub prompt: String,
}

/// Build the persona and prompt for a tool.
pub fn tool_prompt(tool_id: &str, title: &str, details: &str) -> ToolPrompt {
    let (instruction, prompt) = match tool_id {
        "tender" => (
            "You are an expert South African Government Tender Compliance Officer. \
             Output strictly in Markdown.",
            format!(
                "Generate a Compliance Strategy for a tender.\n\
                 Company: {title}\n\
                 Sector: {details}\n\n\
                 Include:\n\
                 1. Executive Summary tailored to the sector.\n\
                 2. B-BBEE Strategy/Advantage.\n\
                 3. Risk Matrix for SBD 4 (Declaration of Interest).\n\
                 4. Pricing Strategy (Value for Money)."
            ),
        ),
        "social" => (
            "You are a Viral Social Media Strategist. Use emojis, hashtags, and punchy hooks.",
            format!(
                "Generate a Viral Content Plan.\n\
                 Niche: {title}\n\
                 Platform: {details}\n\n\
                 Output:\n\
                 1. 3 x Viral Hooks (First 3 seconds).\n\
                 2. 5-Day Content Calendar.\n\
                 3. Hashtag Strategy (High & Low volume)."
            ),
        ),
        "legal" => (
            "You are a South African High Court Para-legal AI. Cite relevant SA Case Law \
             or Acts where possible. Output in formal legal Markdown.",
            format!(
                "Analyze the following legal matter.\n\
                 Reference: {title}\n\
                 Facts: {details}\n\n\
                 Output:\n\
                 1. Case Summary.\n\
                 2. Relevant Acts/Precedents (e.g., Constitution, CPA, LRA).\n\
                 3. Draft Clause/Legal Opinion.\n\
                 4. Success Probability Assessment."
            ),
        ),
        "trade" => (
            "You are a construction estimation expert. Generate a professional \
             Invoice/Quote in Markdown.",
            format!(
                "Generate a Quote.\n\
                 Job Title: {title}\n\
                 Description: {details}\n\n\
                 Output:\n\
                 1. Itemized Material List (Assume standard SA pricing in ZAR).\n\
                 2. Labor Calculation (Hours x Rate).\n\
                 3. Total Estimated Cost (Excl & Incl VAT)."
            ),
        ),
        "medical" => (
            "You are a Medical Scribe. Output professional SOAP notes and ICD-10 codes.",
            format!(
                "Transcribe Clinical Notes.\n\
                 Condition: {title}\n\
                 Symptoms: {details}\n\n\
                 Output:\n\
                 1. SOAP Note (Subjective, Objective, Assessment, Plan).\n\
                 2. Recommended ICD-10 Codes.\n\
                 3. Suggested Treatment Plan (Generic names)."
            ),
        ),
        "construct" => (
            "You are a Quantity Surveyor. Output a Bill of Quantities (BOQ).",
            format!(
                "Generate BOQ.\n\
                 Project: {title}\n\
                 Scope: {details}\n\n\
                 Output:\n\
                 1. Material Breakdown (Cement, Bricks, Sand, Timber).\n\
                 2. Phase Timeline (Gantt style text).\n\
                 3. SANS 10400 Compliance Checklist."
            ),
        ),
        "estate" => (
            "You are a Luxury Real Estate Copywriter. Use emotive language.",
            format!(
                "Write a Property Listing.\n\
                 Address/Area: {title}\n\
                 Features: {details}\n\n\
                 Output:\n\
                 1. Headline (Catchy).\n\
                 2. Description (Emotive, selling the lifestyle).\n\
                 3. Investment Potential (Rental yield estimation)."
            ),
        ),
        "landscape" => (
            "You are a Landscape Architect specializing in South African indigenous \
             flora (fynbos, succulents).",
            format!(
                "Analyze this site image and request.\n\
                 Site Name: {title}\n\
                 Conditions: {details}\n\n\
                 Output:\n\
                 1. Analysis of terrain/sunlight based on image context (if visible) \
                 or description.\n\
                 2. Design Concept 1: Water-wise/Xeriscaping.\n\
                 3. Design Concept 2: Indigenous Lush.\n\
                 4. Plant List (Scientific & Common names)."
            ),
        ),
        _ => ("", format!("Analyze: {title} - {details}")),
    };

    ToolPrompt {
        instruction: instruction.to_string(),
        prompt,
    }
}
