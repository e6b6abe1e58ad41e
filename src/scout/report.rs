//! Report export — formats the retained audit text into a fixed-layout
//! paginated document. Purely a formatting routine.

use super::scan::ScanClass;

/// Characters per body line.
pub const PAGE_WIDTH: usize = 84;
/// Body lines per page.
pub const PAGE_LINES: usize = 44;

const BRAND: &str = "BORAINE";
const BRAND_SUBTITLE: &str = "INTELLIGENCE SYSTEMS";
const BODY_HEADER: &str = "BORAINE // EXEC SUMMARY";

/// A fixed-layout page of the exported report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportPage {
    Cover {
        brand: &'static str,
        subtitle: &'static str,
        class_title: &'static str,
        target_line: String,
    },
    Body {
        header: &'static str,
        lines: Vec<String>,
    },
}

/// The assembled document: one cover page followed by body pages.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub pages: Vec<ReportPage>,
}

/// Cover title for a scan class.
pub fn class_title(class: ScanClass) -> &'static str {
    match class {
        ScanClass::UrlAudit => "DIGITAL INFRASTRUCTURE AUDIT",
        ScanClass::IndustrySweep => "SECTOR INTELLIGENCE REPORT",
    }
}

/// Strip markdown emphasis and heading markers before layout.
fn strip_markup(text: &str) -> String {
    text.replace("**", "")
        .replace("###", "")
        .replace("##", "")
        .replace('>', "")
}

/// Greedy word wrap to `width` columns. Words longer than a line are hard
/// split rather than overflowing.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for source_line in text.lines() {
        if source_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in source_line.split_whitespace() {
            let mut word = word;
            // Hard-split oversized tokens (long URLs, mostly).
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut split = width;
                while !word.is_char_boundary(split) {
                    split -= 1;
                }
                let (head, tail) = word.split_at(split);
                lines.push(head.to_string());
                word = tail;
            }
            if current.is_empty() {
                current.push_str(word);
            } else if current.len() + 1 + word.len() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Lay the analysis text out as cover page + body pages.
pub fn paginate(analysis: &str, target: &str, class: ScanClass) -> ReportDocument {
    let mut pages = vec![ReportPage::Cover {
        brand: BRAND,
        subtitle: BRAND_SUBTITLE,
        class_title: class_title(class),
        target_line: format!("TARGET: {}", target.to_uppercase()),
    }];

    let lines = wrap(&strip_markup(analysis), PAGE_WIDTH);
    for chunk in lines.chunks(PAGE_LINES) {
        pages.push(ReportPage::Body {
            header: BODY_HEADER,
            lines: chunk.to_vec(),
        });
    }
    // An empty analysis still yields one (blank) body page.
    if pages.len() == 1 {
        pages.push(ReportPage::Body {
            header: BODY_HEADER,
            lines: Vec::new(),
        });
    }

    ReportDocument { pages }
}

/// Render the document as plain text with form-feed page breaks.
pub fn render(document: &ReportDocument) -> String {
    let rendered: Vec<String> = document
        .pages
        .iter()
        .map(|page| match page {
            ReportPage::Cover {
                brand,
                subtitle,
                class_title,
                target_line,
            } => {
                let rule = "─".repeat(subtitle.len());
                format!("\n\n{brand}\n{subtitle}\n{rule}\n\n{class_title}\n{target_line}\n")
            }
            ReportPage::Body { header, lines } => {
                format!("{header}\n{}\n\n{}", "─".repeat(header.len()), lines.join("\n"))
            }
        })
        .collect();
    rendered.join("\u{c}")
}

/// Download filename derived from the target: non-alphanumerics collapse
/// to `_`.
pub fn filename(target: &str) -> String {
    let sanitized: String = target
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let sanitized = if sanitized.is_empty() {
        "Analysis".to_string()
    } else {
        sanitized
    };
    format!("Boraine_Report_{sanitized}.txt")
}
