//! Pre-submit gate for the analysis form
//!
//! Per submission attempt: `Idle -> Validating -> Blocked (back to Idle)` or
//! `Idle -> Validating -> Submitting`. `Submitting` normally ends with page
//! navigation. A page kept alive after that (stopped request, back/forward
//! cache) still runs every submit through validation, and a blank one drops
//! back to `Idle`.

use crate::error::IntakeError;
use crate::file_policy::FileCandidate;

/// Content pending analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub source_text: String,
    pub source_file: Option<FileCandidate>,
}

impl SubmissionDraft {
    pub fn new(source_text: impl Into<String>, source_file: Option<FileCandidate>) -> Self {
        Self {
            source_text: source_text.into(),
            source_file,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.source_text.trim().is_empty()
    }

    /// Either source is enough; both may be present
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.has_text() || self.source_file.is_some() {
            Ok(())
        } else {
            Err(IntakeError::EmptySubmission)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakePhase {
    Idle,
    Validating,
    /// Native post in flight; the loading overlay is up
    Submitting,
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Cancel the native submission and show the error
    Blocked(IntakeError),
    /// Let the browser post the form and show the loading overlay
    Proceed,
    /// Valid draft while already submitting; let the browser continue without
    /// a second overlay
    InFlight,
}

impl SubmitOutcome {
    pub fn allows_navigation(&self) -> bool {
        !matches!(self, SubmitOutcome::Blocked(_))
    }
}

#[derive(Debug)]
pub struct IntakeMachine {
    phase: IntakePhase,
    blocked_attempts: u32,
}

impl Default for IntakeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeMachine {
    pub fn new() -> Self {
        Self {
            phase: IntakePhase::Idle,
            blocked_attempts: 0,
        }
    }

    pub fn phase(&self) -> IntakePhase {
        self.phase
    }

    /// Number of submissions cancelled on this page so far
    pub fn blocked_attempts(&self) -> u32 {
        self.blocked_attempts
    }

    /// Run the gate for one submit event
    pub fn submit(&mut self, draft: &SubmissionDraft) -> SubmitOutcome {
        let in_flight = self.phase == IntakePhase::Submitting;
        if !in_flight {
            self.transition(IntakePhase::Validating);
        }

        match draft.validate() {
            Ok(()) if in_flight => {
                tracing::debug!("submit while already submitting");
                SubmitOutcome::InFlight
            }
            Ok(()) => {
                self.transition(IntakePhase::Submitting);
                SubmitOutcome::Proceed
            }
            Err(err) => {
                self.blocked_attempts += 1;
                self.transition(IntakePhase::Idle);
                SubmitOutcome::Blocked(err)
            }
        }
    }

    fn transition(&mut self, next: IntakePhase) {
        tracing::debug!(from = ?self.phase, to = ?next, "intake phase");
        self.phase = next;
    }
}
