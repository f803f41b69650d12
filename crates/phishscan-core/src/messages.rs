//! Validation messages shown next to the intake controls
//!
//! The DOM layer keeps at most one node per message class per anchor: showing a
//! message replaces any existing node with the same class.

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::file_policy::AcceptedFile;
use crate::format::format_bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    SizeError,
    TypeError,
    ReadError,
    EmptyError,
    /// Not an error: the name of the accepted file
    FileName,
}

impl MessageKind {
    /// Every kind that lives next to the file input
    pub const FILE_FEEDBACK: [MessageKind; 4] = [
        MessageKind::SizeError,
        MessageKind::TypeError,
        MessageKind::ReadError,
        MessageKind::FileName,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            MessageKind::SizeError => "size-error",
            MessageKind::TypeError => "type-error",
            MessageKind::ReadError => "read-error",
            MessageKind::EmptyError => "empty-error",
            MessageKind::FileName => "file-name",
        }
    }

    pub fn is_error(self) -> bool {
        !matches!(self, MessageKind::FileName)
    }

    pub fn placement(self) -> MessagePlacement {
        match self {
            MessageKind::EmptyError => MessagePlacement::FormTop,
            _ => MessagePlacement::AfterFileInput,
        }
    }
}

/// Where a message is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePlacement {
    /// Immediately after the file input
    AfterFileInput,
    /// First child of the form
    FormTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLifetime {
    /// Stays until replaced by the next validation outcome
    UntilReplaced,
    /// Removed after the given number of milliseconds
    ExpiresAfter(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    pub kind: MessageKind,
    pub text: String,
    pub lifetime: MessageLifetime,
}

impl ValidationMessage {
    pub fn from_error(error: &IntakeError, config: &IntakeConfig) -> Self {
        let kind = match error {
            IntakeError::EmptySubmission => MessageKind::EmptyError,
            IntakeError::FileTooLarge { .. } => MessageKind::SizeError,
            IntakeError::UnsupportedFileType { .. } => MessageKind::TypeError,
            IntakeError::FileReadFailure(_) => MessageKind::ReadError,
        };
        let lifetime = match kind {
            MessageKind::EmptyError => MessageLifetime::ExpiresAfter(config.empty_banner_ms),
            _ => MessageLifetime::UntilReplaced,
        };

        Self {
            kind,
            text: error.to_string(),
            lifetime,
        }
    }

    pub fn file_name(file: &AcceptedFile) -> Self {
        Self {
            kind: MessageKind::FileName,
            text: format!("Selected: {} ({})", file.name, format_bytes(file.size)),
            lifetime: MessageLifetime::UntilReplaced,
        }
    }

    /// Full class attribute for the message node
    pub fn class_list(&self) -> String {
        if self.kind.is_error() {
            format!("validation-error {}", self.kind.class_name())
        } else {
            self.kind.class_name().to_string()
        }
    }
}
