//! Decision logic for the Email Phishing Detector page
//!
//! This crate holds everything the page controllers decide, with no DOM access:
//! - Intake: file acceptance policy, character budget, submission gate
//! - Results: highlight catalogue, legend, copyable summary, disclosure toggles
//!
//! The `phishscan-wasm` app applies these decisions to the browser DOM.

pub mod config;
pub mod error;
pub mod file_policy;
pub mod format;
pub mod highlight;
pub mod legend;
pub mod messages;
pub mod submission;
pub mod summary;
pub mod text_limit;
pub mod toggles;

pub use config::{AnnotatorConfig, IntakeConfig, PageConfig};
pub use error::{ConfigError, IntakeError};
pub use file_policy::{validate_file, AcceptedFile, FileCandidate};
pub use format::format_bytes;
pub use highlight::{HighlightCategory, HighlightMarker};
pub use legend::{Legend, LegendEntry};
pub use messages::{MessageKind, MessageLifetime, MessagePlacement, ValidationMessage};
pub use submission::{IntakeMachine, IntakePhase, SubmissionDraft, SubmitOutcome};
pub use summary::{ResultSummary, SummarySection};
pub use text_limit::{clamp_to_limit, CharCount, CounterState};
pub use toggles::Disclosure;

/// Maximum accepted upload size (5 MiB)
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum number of characters accepted in the email text field
pub const MAX_TEXT_CHARS: usize = 50_000;

/// Remaining-character budget below which the counter turns into a warning
pub const WARNING_REMAINING: usize = 1_000;

/// How long the empty-submission banner stays on screen
pub const EMPTY_BANNER_MS: u32 = 5_000;

/// Natural content height above which the result content gets clamped
pub const COLLAPSE_THRESHOLD: f64 = 400.0;

/// How long the copy button shows its confirmation label
pub const COPY_FEEDBACK_MS: u32 = 2_000;
