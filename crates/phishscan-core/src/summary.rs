//! Plain-text report of a rendered analysis result
//!
//! The text layout is fixed; users paste it into tickets and chat.

use crate::highlight::{HighlightCategory, HighlightMarker};
use serde::Serialize;

const HEADER: &str = "Email Phishing Analysis Results:";
const RULE: &str = "===============================";
const FOOTER: &str = "Analyzed by Email Phishing Detector";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    pub title: String,
    pub snippets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub verdict: String,
    pub confidence: String,
    pub indicators: Vec<String>,
    pub sections: Vec<SummarySection>,
}

impl ResultSummary {
    pub fn new(
        verdict: impl AsRef<str>,
        confidence: impl AsRef<str>,
        indicators: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            verdict: verdict.as_ref().trim().to_string(),
            confidence: strip_label(confidence.as_ref(), "Confidence:").to_string(),
            indicators: indicators
                .into_iter()
                .map(|indicator| indicator.trim().to_string())
                .collect(),
            sections: Vec::new(),
        }
    }

    /// Group marker snippets into sections in summary priority order.
    /// Categories without markers get no section.
    pub fn with_markers(mut self, markers: &[HighlightMarker]) -> Self {
        self.sections = HighlightCategory::SUMMARY_ORDER
            .into_iter()
            .filter_map(|category| {
                let title = category.summary_title()?;
                let snippets: Vec<String> = markers
                    .iter()
                    .filter(|marker| marker.category == category)
                    .map(|marker| marker.text.trim().to_string())
                    .collect();
                if snippets.is_empty() {
                    None
                } else {
                    Some(SummarySection {
                        title: title.to_string(),
                        snippets,
                    })
                }
            })
            .collect();
        self
    }

    /// Render the clipboard text
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(HEADER);
        out.push('\n');
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!("Verdict: {}\n", self.verdict));
        out.push_str(&format!("Confidence: {}\n", self.confidence));
        out.push('\n');

        out.push_str("Risk Indicators:\n");
        for indicator in &self.indicators {
            out.push_str(&format!("- {}\n", indicator));
        }
        out.push('\n');

        for section in &self.sections {
            out.push_str(&format!("{}:\n", section.title));
            for snippet in &section.snippets {
                out.push_str(&format!("- {}\n", snippet));
            }
            out.push('\n');
        }

        out.push_str(FOOTER);
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// The result page may render the confidence with its own label
fn strip_label<'a>(text: &'a str, label: &str) -> &'a str {
    let text = text.trim();
    match text.get(..label.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(label) => text[label.len()..].trim_start(),
        _ => text,
    }
}
