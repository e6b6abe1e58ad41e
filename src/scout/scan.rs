//! Scan simulation — a fixed log script replayed with pacing delays
//! before the real audit request goes out.

use std::time::Duration;

use crate::content::{INDUSTRY_SCAN_LOGS, URL_SCAN_LOGS};

/// Delay between simulated scan lines.
pub const SCAN_STEP_DELAY: Duration = Duration::from_millis(150);

/// How the terminal interprets the operator's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanClass {
    /// Looks like a hostname — run the infrastructure audit script.
    UrlAudit,
    /// Anything else — run the sector sweep script.
    IndustrySweep,
}

/// Classify a target: a dot and no spaces reads as a URL.
pub fn classify(target: &str) -> ScanClass {
    if target.contains('.') && !target.contains(' ') {
        ScanClass::UrlAudit
    } else {
        ScanClass::IndustrySweep
    }
}

/// The scan script for a class.
pub fn script(class: ScanClass) -> &'static [&'static str] {
    match class {
        ScanClass::UrlAudit => URL_SCAN_LOGS,
        ScanClass::IndustrySweep => INDUSTRY_SCAN_LOGS,
    }
}

/// Progress percentage after emitting line `index` of `total`.
pub fn progress(index: usize, total: usize) -> f32 {
    ((index + 1) as f32 / total as f32) * 100.0
}

/// The audit prompt issued once the scan script finishes.
pub fn audit_prompt(class: ScanClass, target: &str) -> String {
    let prefix = match class {
        ScanClass::UrlAudit => format!(
            "Conduct a deep forensic audit of the digital footprint for URL: {target}."
        ),
        ScanClass::IndustrySweep => format!(
            "Search for '{target}' businesses in South Africa. Conduct a sector-wide gap analysis."
        ),
    };
    format!(
        "{prefix} IDENTIFY LOST REVENUE DUE TO HUMAN LIMITATIONS. AGGRESSIVELY SELL THE \
         'GROWTH TIER' (AI VOICE AGENT). STRUCTURE AS A FORMAL REPORT: 1. EXECUTIVE SUMMARY, \
         2. THREAT DETECTION, 3. BORAINE SOLUTION."
    )
}
