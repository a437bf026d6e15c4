use std::collections::VecDeque;

use defi_a11y_core::{FocusPort, FocusTarget};

/// Focus moves kept by [`InMemoryFocus`]; older entries are dropped.
pub const HISTORY_LIMIT: usize = 32;

/// Headless focus host. Useful for server-side rendering of the dialog tree
/// and for driving the dialog without a window.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFocus {
    active: Option<FocusTarget>,
    history: VecDeque<FocusTarget>,
}

impl InMemoryFocus {
    pub fn focused_on(target: FocusTarget) -> Self {
        Self {
            active: Some(target),
            history: VecDeque::new(),
        }
    }

    /// Simulates the user moving focus without going through the dialog.
    pub fn set_active(&mut self, target: Option<FocusTarget>) {
        self.active = target;
    }

    /// Most recent focus moves, oldest first.
    pub fn history(&self) -> Vec<FocusTarget> {
        self.history.iter().cloned().collect()
    }
}

impl FocusPort for InMemoryFocus {
    fn active_element(&self) -> Option<FocusTarget> {
        self.active.clone()
    }

    fn focus(&mut self, target: &FocusTarget) {
        self.active = Some(target.clone());
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(target.clone());
    }

    fn blur(&mut self) {
        self.active = None;
    }
}
