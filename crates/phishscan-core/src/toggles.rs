//! Two-state disclosure controls used on the result page

/// Open/closed state plus the label the control shows in each state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disclosure {
    open: bool,
    closed_label: &'static str,
    open_label: &'static str,
}

impl Disclosure {
    /// Long email content: starts clamped
    pub fn content() -> Self {
        Self {
            open: false,
            closed_label: "Show more",
            open_label: "Show less",
        }
    }

    /// Feature explanation panel: starts hidden
    pub fn explanation() -> Self {
        Self {
            open: false,
            closed_label: "Show explanation",
            open_label: "Hide explanation",
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Label for the control in the current state
    pub fn label(&self) -> &'static str {
        if self.open {
            self.open_label
        } else {
            self.closed_label
        }
    }

    /// Flip the state and return the new one
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}

/// Whether content of `natural_height` needs a Show more toggle
pub fn needs_collapse(natural_height: f64, threshold: f64) -> bool {
    natural_height > threshold
}
