//! Highlight categories rendered by the analysis server
//!
//! The server wraps interesting spans of the analyzed email in elements
//! carrying one of these classes, optionally with a `data-description`.

use serde::Serialize;

/// Attribute holding a marker's human-readable explanation
pub const DESCRIPTION_ATTR: &str = "data-description";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightCategory {
    SuspiciousPhrase,
    Url,
    SuspiciousUrl,
    EmailAddress,
    UrgentLanguage,
    FinancialTerm,
}

impl HighlightCategory {
    /// Fixed legend order
    pub const CATALOGUE: [HighlightCategory; 6] = [
        HighlightCategory::SuspiciousPhrase,
        HighlightCategory::Url,
        HighlightCategory::SuspiciousUrl,
        HighlightCategory::EmailAddress,
        HighlightCategory::UrgentLanguage,
        HighlightCategory::FinancialTerm,
    ];

    /// Priority order of the sections in the copied summary.
    /// Email addresses are shown in the legend but not summarized.
    pub const SUMMARY_ORDER: [HighlightCategory; 5] = [
        HighlightCategory::SuspiciousUrl,
        HighlightCategory::Url,
        HighlightCategory::SuspiciousPhrase,
        HighlightCategory::UrgentLanguage,
        HighlightCategory::FinancialTerm,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            HighlightCategory::SuspiciousPhrase => "suspicious-phrase",
            HighlightCategory::Url => "url-highlight",
            HighlightCategory::SuspiciousUrl => "suspicious-url",
            HighlightCategory::EmailAddress => "email-highlight",
            HighlightCategory::UrgentLanguage => "urgent-language",
            HighlightCategory::FinancialTerm => "financial-term",
        }
    }

    /// CSS selector matching markers of this category
    pub fn selector(self) -> String {
        format!(".{}", self.class_name())
    }

    /// Legend label
    pub fn label(self) -> &'static str {
        match self {
            HighlightCategory::SuspiciousPhrase => "Suspicious Phrase",
            HighlightCategory::Url => "URL",
            HighlightCategory::SuspiciousUrl => "Suspicious URL",
            HighlightCategory::EmailAddress => "Email Address",
            HighlightCategory::UrgentLanguage => "Urgent Language",
            HighlightCategory::FinancialTerm => "Financial Term",
        }
    }

    /// Section heading in the copied summary, if the category is summarized
    pub fn summary_title(self) -> Option<&'static str> {
        match self {
            HighlightCategory::SuspiciousUrl => Some("Suspicious URLs"),
            HighlightCategory::Url => Some("URLs"),
            HighlightCategory::SuspiciousPhrase => Some("Suspicious Phrases"),
            HighlightCategory::UrgentLanguage => Some("Urgent Language"),
            HighlightCategory::FinancialTerm => Some("Financial Terms"),
            HighlightCategory::EmailAddress => None,
        }
    }

    pub fn from_class_name(class_name: &str) -> Option<Self> {
        Self::CATALOGUE
            .into_iter()
            .find(|category| category.class_name() == class_name)
    }
}

/// A highlighted span discovered on the result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightMarker {
    pub category: HighlightCategory,
    pub text: String,
    pub description: Option<String>,
}

impl HighlightMarker {
    pub fn new(category: HighlightCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// Whether a tooltip should be attached
    pub fn has_tooltip(&self) -> bool {
        self.description.is_some()
    }
}
