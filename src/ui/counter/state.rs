use crate::effects::BurstKind;
use crate::history::HistoryBuffer;
use crate::ui::mvi::UiState;

/// User-triggerable operations that go through the remote counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Refresh,
    Increment,
    Reset,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Refresh => "refresh",
            Action::Increment => "increment",
            Action::Reset => "reset",
        }
    }

    /// Message shown after success. Refresh succeeds silently.
    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Action::Refresh => None,
            Action::Increment => Some("Counter incremented successfully!"),
            Action::Reset => Some("Counter reset successfully!"),
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Action::Refresh => "Failed to load counter. Please try again.",
            Action::Increment => "Failed to increment counter. Please try again.",
            Action::Reset => "Failed to reset counter. Please try again.",
        }
    }

    /// Particle burst to spawn after a successful call, if any.
    pub fn burst(self) -> Option<BurstKind> {
        match self {
            Action::Refresh => None,
            Action::Increment => Some(BurstKind::Increment),
            Action::Reset => Some(BurstKind::Reset),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Failure,
            text: text.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == StatusKind::Failure
    }
}

/// Everything the view needs to draw the counter card.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CounterState {
    /// Last value reported by the remote counter. `None` means unknown.
    pub value: Option<i64>,
    /// True exactly while a remote call is in flight.
    pub busy: bool,
    pub message: Option<StatusMessage>,
    pub history: HistoryBuffer,
}

impl UiState for CounterState {}

impl CounterState {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Text for the big counter display.
    pub fn display_value(&self) -> String {
        match (self.busy, self.value, &self.message) {
            (true, _, _) => "Loading...".to_string(),
            (false, Some(value), _) => value.to_string(),
            (false, None, None) => "Loading...".to_string(),
            (false, None, Some(_)) => "Error".to_string(),
        }
    }

    pub fn increment_label(&self) -> &'static str {
        if self.busy {
            "Incrementing..."
        } else {
            "Increment Counter"
        }
    }

    pub fn reset_label(&self) -> &'static str {
        if self.busy {
            "Resetting..."
        } else {
            "Reset Counter"
        }
    }
}
