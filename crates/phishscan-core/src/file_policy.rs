//! Upload acceptance policy
//!
//! A file is checked for size first, then for type. The type check accepts a
//! file when EITHER its declared MIME type or its name suffix is recognized,
//! since some browsers leave the MIME type empty for `.eml` files.

use crate::config::IntakeConfig;
use crate::error::IntakeError;

/// What the browser tells us about a picked file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

/// A file that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile {
    pub name: String,
    pub size: u64,
    /// Whether the contents should be loaded into the text field
    pub read_as_text: bool,
}

/// Validate a picked file against the configured limits
pub fn validate_file(
    candidate: &FileCandidate,
    config: &IntakeConfig,
) -> Result<AcceptedFile, IntakeError> {
    if candidate.size > config.max_file_bytes {
        tracing::warn!(
            name = %candidate.name,
            size = candidate.size,
            limit = config.max_file_bytes,
            "rejecting oversized file"
        );
        return Err(IntakeError::FileTooLarge {
            size: candidate.size,
            limit: config.max_file_bytes,
        });
    }

    let essence = mime_essence(&candidate.mime_type);
    let mime_ok = config
        .accepted_mime_types
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(&essence));
    let extension_ok = has_accepted_extension(&candidate.name, &config.accepted_extensions);

    if !mime_ok && !extension_ok {
        tracing::warn!(
            name = %candidate.name,
            mime_type = %candidate.mime_type,
            "rejecting unsupported file type"
        );
        return Err(IntakeError::UnsupportedFileType {
            name: candidate.name.clone(),
            mime_type: candidate.mime_type.clone(),
        });
    }

    // message/rfc822 under an unrecognized name is still posted, just not previewed
    let read_as_text = essence == "text/plain" || extension_ok;

    tracing::debug!(name = %candidate.name, read_as_text, "file accepted");
    Ok(AcceptedFile {
        name: candidate.name.clone(),
        size: candidate.size,
        read_as_text,
    })
}

/// MIME type without parameters, lowercased ("Text/Plain; charset=utf-8" -> "text/plain")
fn mime_essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn has_accepted_extension(name: &str, extensions: &[String]) -> bool {
    let name = name.to_ascii_lowercase();
    extensions
        .iter()
        .any(|ext| name.ends_with(&ext.to_ascii_lowercase()))
}
