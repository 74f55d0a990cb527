use std::cell::Cell;

use serde::{Deserialize, Serialize};

/// Shared tooltip timing, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipDelays {
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u32,
    #[serde(default = "default_reshow_ms")]
    pub reshow_ms: u32,
    #[serde(default = "default_dismiss_ms")]
    pub dismiss_ms: u32,
}

impl Default for TooltipDelays {
    fn default() -> Self {
        Self {
            initial_ms: default_initial_ms(),
            reshow_ms: default_reshow_ms(),
            dismiss_ms: default_dismiss_ms(),
        }
    }
}

fn default_initial_ms() -> u32 {
    750
}

fn default_reshow_ms() -> u32 {
    500
}

fn default_dismiss_ms() -> u32 {
    4000
}

/// Applies a panel's own tooltip delays to a shared tooltip manager while the
/// pointer is inside the panel, and restores the previous values on exit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TooltipDelayScope {
    saved: Option<TooltipDelays>,
}

impl TooltipDelayScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.saved.is_some()
    }

    /// Re-entering without an exit keeps the originally saved values.
    pub fn enter(&mut self, shared: &Cell<TooltipDelays>, own: TooltipDelays) {
        if self.saved.is_none() {
            self.saved = Some(shared.get());
        }
        shared.set(own);
    }

    pub fn exit(&mut self, shared: &Cell<TooltipDelays>) {
        if let Some(saved) = self.saved.take() {
            shared.set(saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::{TooltipDelayScope, TooltipDelays};

    const OWN: TooltipDelays = TooltipDelays {
        initial_ms: 100,
        reshow_ms: 50,
        dismiss_ms: 9000,
    };

    #[test]
    fn enter_then_exit_restores_previous_delays() {
        let shared = Cell::new(TooltipDelays::default());
        let mut scope = TooltipDelayScope::new();

        scope.enter(&shared, OWN);
        assert_eq!(shared.get(), OWN);
        assert!(scope.is_active());

        scope.exit(&shared);
        assert_eq!(shared.get(), TooltipDelays::default());
        assert!(!scope.is_active());
    }

    #[test]
    fn double_enter_keeps_first_saved_value() {
        let shared = Cell::new(TooltipDelays::default());
        let mut scope = TooltipDelayScope::new();
        scope.enter(&shared, OWN);
        scope.enter(&shared, OWN);
        scope.exit(&shared);
        assert_eq!(shared.get(), TooltipDelays::default());
    }

    #[test]
    fn exit_without_enter_is_noop() {
        let shared = Cell::new(OWN);
        TooltipDelayScope::new().exit(&shared);
        assert_eq!(shared.get(), OWN);
    }
}
