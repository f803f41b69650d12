//! Highlight legend derived from the categories present on a result page

use crate::highlight::{HighlightCategory, HighlightMarker};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub category: HighlightCategory,
    pub label: &'static str,
    /// Class list for the colour swatch. Must not contain the bare marker class,
    /// or the swatch would match the marker selectors.
    pub swatch_class: String,
}

impl LegendEntry {
    fn for_category(category: HighlightCategory) -> Self {
        Self {
            category,
            label: category.label(),
            swatch_class: format!("legend-color legend-{}", category.class_name()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// Build the legend by asking `is_present` about each catalogue category once.
    /// Entry order is always the catalogue order.
    pub fn build(mut is_present: impl FnMut(HighlightCategory) -> bool) -> Self {
        let entries = HighlightCategory::CATALOGUE
            .into_iter()
            .filter(|category| is_present(*category))
            .map(LegendEntry::for_category)
            .collect();
        Self { entries }
    }

    pub fn from_markers(markers: &[HighlightMarker]) -> Self {
        Self::build(|category| markers.iter().any(|m| m.category == category))
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.label).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_urls_give_single_entry() {
        let markers = vec![
            HighlightMarker::new(HighlightCategory::Url, "http://a.example"),
            HighlightMarker::new(HighlightCategory::Url, "http://b.example"),
        ];
        let legend = Legend::from_markers(&markers);
        assert_eq!(legend.labels(), vec!["URL"]);
    }

    #[test]
    fn test_order_ignores_document_order() {
        let markers = vec![
            HighlightMarker::new(HighlightCategory::FinancialTerm, "bank"),
            HighlightMarker::new(HighlightCategory::Url, "http://x"),
            HighlightMarker::new(HighlightCategory::SuspiciousPhrase, "verify your account"),
        ];
        let legend = Legend::from_markers(&markers);
        assert_eq!(
            legend.labels(),
            vec!["Suspicious Phrase", "URL", "Financial Term"]
        );
    }

    #[test]
    fn test_no_markers_no_entries() {
        let legend = Legend::from_markers(&[]);
        assert!(legend.is_empty());
    }

    #[test]
    fn test_build_asks_each_category_once() {
        let mut asked = Vec::new();
        let legend = Legend::build(|category| {
            asked.push(category);
            true
        });
        assert_eq!(asked, HighlightCategory::CATALOGUE.to_vec());
        assert_eq!(legend.len(), 6);
    }

    #[test]
    fn test_swatch_class_is_prefixed() {
        let legend = Legend::build(|c| c == HighlightCategory::UrgentLanguage);
        assert_eq!(
            legend.entries()[0].swatch_class,
            "legend-color legend-urgent-language"
        );
    }
}
