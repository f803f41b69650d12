//! Page configuration
//!
//! Every limit the controllers enforce has a default matching the page
//! contract. A page may override any subset through a JSON document, e.g.
//! `{"intake": {"maxChars": 20000}}`.

use crate::error::ConfigError;
use crate::{
    COLLAPSE_THRESHOLD, COPY_FEEDBACK_MS, EMPTY_BANNER_MS, MAX_FILE_BYTES, MAX_TEXT_CHARS,
    WARNING_REMAINING,
};
use serde::{Deserialize, Serialize};

/// Limits applied by the intake form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntakeConfig {
    /// Largest accepted upload in bytes
    pub max_file_bytes: u64,
    /// Hard character ceiling for the text field
    pub max_chars: usize,
    /// Remaining budget below which the counter warns
    pub warning_remaining: usize,
    /// Lifetime of the empty-submission banner in milliseconds
    pub empty_banner_ms: u32,
    /// Declared MIME types accepted without looking at the file name
    pub accepted_mime_types: Vec<String>,
    /// File name suffixes accepted when the MIME type is missing or unknown
    pub accepted_extensions: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: MAX_FILE_BYTES,
            max_chars: MAX_TEXT_CHARS,
            warning_remaining: WARNING_REMAINING,
            empty_banner_ms: EMPTY_BANNER_MS,
            accepted_mime_types: vec!["text/plain".to_string(), "message/rfc822".to_string()],
            accepted_extensions: vec![".eml".to_string(), ".txt".to_string()],
        }
    }
}

/// Settings for the result page annotator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotatorConfig {
    /// Content taller than this gets a Show more / Show less toggle
    pub collapse_threshold: f64,
    /// How long "Copied!" stays on the copy button
    pub copy_feedback_ms: u32,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            collapse_threshold: COLLAPSE_THRESHOLD,
            copy_feedback_ms: COPY_FEEDBACK_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub intake: IntakeConfig,
    pub annotator: AnnotatorConfig,
}

impl PageConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an optional configuration, falling back to defaults when absent or blank
    pub fn from_optional_json(json: Option<&str>) -> Result<Self, ConfigError> {
        match json {
            Some(json) if !json.trim().is_empty() => Self::from_json(json),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let intake = &self.intake;
        if intake.max_chars == 0 {
            return Err(ConfigError::Invalid("maxChars must be positive".to_string()));
        }
        if intake.warning_remaining >= intake.max_chars {
            return Err(ConfigError::Invalid(format!(
                "warningRemaining {} must be below maxChars {}",
                intake.warning_remaining, intake.max_chars
            )));
        }
        if intake.max_file_bytes == 0 {
            return Err(ConfigError::Invalid(
                "maxFileBytes must be positive".to_string(),
            ));
        }
        if intake.accepted_mime_types.is_empty() && intake.accepted_extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one accepted MIME type or extension is required".to_string(),
            ));
        }
        let threshold = self.annotator.collapse_threshold;
        if threshold.is_nan() || threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "collapseThreshold must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config =
            PageConfig::from_json(r#"{"intake": {"maxChars": 20000}, "annotator": {"copyFeedbackMs": 500}}"#)
                .unwrap();
        assert_eq!(config.intake.max_chars, 20_000);
        assert_eq!(config.intake.max_file_bytes, MAX_FILE_BYTES);
        assert_eq!(config.annotator.copy_feedback_ms, 500);
        assert_eq!(config.annotator.collapse_threshold, COLLAPSE_THRESHOLD);
    }

    #[test]
    fn test_missing_or_blank_json_uses_defaults() {
        assert_eq!(
            PageConfig::from_optional_json(None).unwrap(),
            PageConfig::default()
        );
        assert_eq!(
            PageConfig::from_optional_json(Some("  ")).unwrap(),
            PageConfig::default()
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = PageConfig::from_json("{intake:");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_warning_above_limit() {
        let result = PageConfig::from_json(r#"{"intake": {"maxChars": 500}}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_limit_equal_to_warning_budget_is_rejected() {
        let err = PageConfig::from_json(r#"{"intake": {"maxChars": 1000}}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid page configuration: warningRemaining 1000 must be below maxChars 1000"
        );
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let result = PageConfig::from_json(r#"{"annotator": {"collapseThreshold": 0}}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
