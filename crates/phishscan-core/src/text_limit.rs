//! Character budget for the email text field
//!
//! Counts are in Unicode scalar values, so truncation never splits a character.

use crate::config::IntakeConfig;
use crate::format::format_count;

/// Visual state of the live character counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    /// Field is empty; prompt the user for content
    Prompt,
    /// Close to the ceiling
    Warning,
    Neutral,
}

impl CounterState {
    /// CSS class applied to the counter element alongside `char-count`
    pub fn class_name(self) -> &'static str {
        match self {
            CounterState::Prompt => "char-count-empty",
            CounterState::Warning => "char-count-warning",
            CounterState::Neutral => "char-count-ok",
        }
    }

    pub fn all() -> [CounterState; 3] {
        [
            CounterState::Prompt,
            CounterState::Warning,
            CounterState::Neutral,
        ]
    }
}

/// Snapshot of the counter for a given text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharCount {
    pub used: usize,
    pub remaining: usize,
    pub limit: usize,
    pub state: CounterState,
}

impl CharCount {
    pub fn measure(text: &str, config: &IntakeConfig) -> Self {
        let used = text.chars().count();
        let remaining = config.max_chars.saturating_sub(used);
        let state = if used == 0 {
            CounterState::Prompt
        } else if remaining < config.warning_remaining {
            CounterState::Warning
        } else {
            CounterState::Neutral
        };

        Self {
            used,
            remaining,
            limit: config.max_chars,
            state,
        }
    }

    /// Text shown in the counter element
    pub fn label(&self) -> String {
        match self.state {
            CounterState::Prompt => "Enter email content or upload a file".to_string(),
            CounterState::Warning => format!(
                "{} / {} characters ({} remaining)",
                format_count(self.used),
                format_count(self.limit),
                format_count(self.remaining)
            ),
            CounterState::Neutral => format!(
                "{} / {} characters",
                format_count(self.used),
                format_count(self.limit)
            ),
        }
    }
}

/// Truncate `text` to at most `max_chars` characters.
///
/// Returns `None` when the text already fits, so callers only touch the field
/// when a clamp actually happened.
pub fn clamp_to_limit(text: &str, max_chars: usize) -> Option<String> {
    text.char_indices()
        .nth(max_chars)
        .map(|(byte_index, _)| text[..byte_index].to_string())
}
