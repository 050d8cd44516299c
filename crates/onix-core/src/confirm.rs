//! Confirmation step interposed before destructive actions.

/// Text shown by a confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self {
            title: "Are you sure?".to_string(),
            message: "Please confirm before proceeding.".to_string(),
            confirm_label: "Proceed".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

impl ConfirmPrompt {
    /// Builder method to set the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Open/closed state of a confirmation prompt.
///
/// Only [`ConfirmationGate::confirm`] on an open gate lets the guarded
/// action through; it closes the gate first so a second confirm is a no-op.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationGate {
    open: bool,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Close the gate; returns true if it was open, meaning the guarded
    /// action may proceed.
    pub fn confirm(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_passes_once() {
        let mut gate = ConfirmationGate::new();
        gate.open();
        assert!(gate.confirm());
        assert!(!gate.is_open());
        assert!(!gate.confirm());
    }

    #[test]
    fn test_confirm_on_closed_gate_is_refused() {
        let mut gate = ConfirmationGate::new();
        assert!(!gate.confirm());

        gate.open();
        gate.close();
        assert!(!gate.confirm());
    }
}
