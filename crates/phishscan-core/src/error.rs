use crate::format::format_bytes;
use thiserror::Error;

/// Failures the intake form reports to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please enter email content or upload a file.")]
    EmptySubmission,

    #[error(
        "File is too large ({}). Maximum size is {}.",
        byte_label(.size),
        byte_label(.limit)
    )]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Unsupported file type for {name}. Please upload a .txt or .eml file.")]
    UnsupportedFileType { name: String, mime_type: String },

    #[error("Could not read file: {0}")]
    FileReadFailure(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid page configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid page configuration: {0}")]
    Invalid(String),
}

fn byte_label(bytes: &u64) -> String {
    format_bytes(*bytes)
}
