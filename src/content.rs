//! Static product content: pricing tiers, SaaS tool descriptors, scan
//! scripts, and calendar slots. Configuration records, never mutated at
//! runtime.

use serde::Serialize;

/// A consultancy pricing tier shown on the investment section.
#[derive(Debug, Clone, Serialize)]
pub struct PricingTier {
    pub name: &'static str,
    pub setup_fee: &'static str,
    pub retainer: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub recommended: bool,
}

pub const PRICING_TIERS: &[PricingTier] = &[
    PricingTier {
        name: "The Starter",
        setup_fee: "R25,000",
        retainer: "R3,500/pm",
        description: "For local retail validation.",
        features: &["Basic Chatbot", "SEO Maintenance", "Missed Call Auto-SMS"],
        recommended: false,
    },
    PricingTier {
        name: "The Growth",
        setup_fee: "R65,000",
        retainer: "R9,500/pm",
        description: "Automated scaling infrastructure.",
        features: &[
            "24/7 AI Voice Receptionist",
            "Lead Scoring Agent",
            "Competitor Tracking",
            "CRM Sync",
        ],
        recommended: true,
    },
    PricingTier {
        name: "The Empire",
        setup_fee: "R150,000+",
        retainer: "R25,000/pm",
        description: "Full autonomous dominance. Mining & Corp.",
        features: &[
            "Autonomous Sales Team",
            "Multi-lingual Voice Agents",
            "Enterprise Security",
            "24/7 Priority Ops",
        ],
        recommended: false,
    },
];

/// Descriptor for one tool in the SaaS suite.
///
/// The prompt/persona pair that backs each tool lives in `saas::tools`;
/// this record is the display metadata the widget renders.
#[derive(Debug, Clone, Serialize)]
pub struct SaasTool {
    pub id: &'static str,
    pub name: &'static str,
    /// Display price, e.g. `"R499"`. Parsed to cents at checkout.
    pub price: &'static str,
    pub desc: &'static str,
    pub input_label1: &'static str,
    pub input_label2: &'static str,
    pub placeholder1: &'static str,
    pub placeholder2: &'static str,
    /// Whether the tool accepts an uploaded site image.
    pub accepts_image: bool,
}

pub const SAAS_TOOLS: &[SaasTool] = &[
    SaasTool {
        id: "tender",
        name: "TenderFlow",
        price: "R499",
        desc: "Government Tender Sniper & Compliance.",
        input_label1: "Company Name",
        input_label2: "Target Tender Sector",
        placeholder1: "Boraine Holdings",
        placeholder2: "Security Services / Civil Works",
        accepts_image: false,
    },
    SaasTool {
        id: "social",
        name: "SocialStrike",
        price: "R350",
        desc: "Viral Content & Hook Generator.",
        input_label1: "Niche / Industry",
        input_label2: "Target Platform",
        placeholder1: "Solar Installation",
        placeholder2: "TikTok / Facebook Community Groups",
        accepts_image: false,
    },
    SaasTool {
        id: "legal",
        name: "LexAutomata",
        price: "R1,500",
        desc: "Case summary & precedent search.",
        input_label1: "Case Reference / Title",
        input_label2: "Case Details / Facts",
        placeholder1: "Smith v. State",
        placeholder2: "Defendant claims self-defense...",
        accepts_image: false,
    },
    SaasTool {
        id: "trade",
        name: "TradeOps",
        price: "R499",
        desc: "Instant Invoicing for Tradesmen.",
        input_label1: "Job Title",
        input_label2: "Material/Fault Description",
        placeholder1: "Geyser Replacement",
        placeholder2: "150L Kwikot, burst valve, ceiling damage...",
        accepts_image: false,
    },
    SaasTool {
        id: "medical",
        name: "MediCore",
        price: "R950",
        desc: "Clinical transcription & ICD-10 coding.",
        input_label1: "Diagnosis / Condition",
        input_label2: "Patient Symptoms & Notes",
        placeholder1: "Acute Sinusitis",
        placeholder2: "Patient complains of frontal headache...",
        accepts_image: false,
    },
    SaasTool {
        id: "construct",
        name: "ConstructOS",
        price: "R850",
        desc: "BOQ calculator & timeline generator.",
        input_label1: "Project Name",
        input_label2: "Scope of Work",
        placeholder1: "Kimberley Mall Extension",
        placeholder2: "Foundation and brickwork for 200sqm...",
        accepts_image: false,
    },
    SaasTool {
        id: "estate",
        name: "PropLogic",
        price: "R650",
        desc: "Listing copywriter & valuation AI.",
        input_label1: "Property Address",
        input_label2: "Key Features",
        placeholder1: "12 Diamond Park, Kimberley",
        placeholder2: "3 Bed, 2 Bath, Pool, Solar installed...",
        accepts_image: false,
    },
    SaasTool {
        id: "landscape",
        name: "TerraForm",
        price: "R450",
        desc: "AI Landscaping Visualizer.",
        input_label1: "Site Name",
        input_label2: "Environment/Soil Type",
        placeholder1: "Casino Garden B",
        placeholder2: "Full sun, sandy soil, water restrictions...",
        accepts_image: true,
    },
];

/// Look up a tool descriptor by id.
pub fn find_tool(id: &str) -> Option<&'static SaasTool> {
    SAAS_TOOLS.iter().find(|t| t.id == id)
}

/// Scan script replayed while the terminal "audits" a URL.
pub const URL_SCAN_LOGS: &[&str] = &[
    "Resolving DNS...",
    "Ping: 24ms. Host active.",
    "Scraping metadata tags...",
    "Analyzing DOM structure...",
    "Testing voice gateway latency...",
    "Checking after-hours auto-response...",
    "Detecting missed call protocols: FAILED.",
    "Identifying competitors in Kimberley region...",
    "Calculating potential revenue leakage...",
    "COMPILING PDF AUDIT DOSSIER...",
];

/// Scan script replayed while the terminal sweeps an industry sector.
pub const INDUSTRY_SCAN_LOGS: &[&str] = &[
    "Initializing Sector Scan...",
    "Accessing Global Business Index...",
    "Triangulating location: Kimberley Node...",
    "Identifying market participants...",
    "Analyzing competitor operational hours...",
    "Detecting reception bottlenecks...",
    "Simulating call volume stress test...",
    "Mapping revenue opportunities...",
    "Formulating domination strategy...",
    "COMPILING SECTOR INTELLIGENCE REPORT...",
];

/// Mock consultation slots offered by the booking widgets.
pub const CALENDAR_SLOTS: &[&str] = &[
    "Tomorrow, 10:00 AM",
    "Tomorrow, 02:00 PM",
    "Wed, 09:00 AM",
    "Wed, 11:30 AM",
];
