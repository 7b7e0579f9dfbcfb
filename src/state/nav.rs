//! Screen controller: owns which screen is visible and the navigation
//! history.
//!
//! Invariants enforced here:
//!
//! - Exactly one screen is visible at all times (the `visible` field is the
//!   only source of truth; there is nothing to get out of sync).
//! - Session-driven transitions are not reversible: callers on that path
//!   clear the history before showing, and pass `add_to_history = false`.
//! - Showing the already-visible screen is a no-op and never duplicates a
//!   history entry.

use tracing::debug;

use crate::state::screen::ScreenId;

/// Owns the visible screen and the back-navigation history.
#[derive(Debug)]
pub struct Navigator {
    visible: ScreenId,
    history: Vec<ScreenId>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start on the splash screen with an empty history.
    pub fn new() -> Self {
        Self {
            visible: ScreenId::Splash,
            history: Vec::new(),
        }
    }

    /// The currently visible screen.
    pub fn visible(&self) -> ScreenId {
        self.visible
    }

    /// Screens currently hidden.
    pub fn hidden(&self) -> Vec<ScreenId> {
        crate::state::screen::screens_to_hide(&ScreenId::ALL, self.visible)
    }

    /// Number of reversible entries in the history.
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    /// Show `target` and hide every other screen.
    ///
    /// When `add_to_history` is true the previously visible screen is pushed
    /// as a reversible entry; session-driven transitions pass false.
    /// Showing the screen that is already visible does nothing.
    pub fn show_screen(&mut self, target: ScreenId, add_to_history: bool) {
        if target == self.visible {
            return;
        }
        debug!(
            "screen transition: {} -> {} (reversible: {})",
            self.visible.name(),
            target.name(),
            add_to_history
        );
        if add_to_history {
            self.history.push(self.visible);
        }
        self.visible = target;
    }

    /// Reverse the most recent user-driven transition.
    ///
    /// Returns the screen that became visible, or `None` when the history is
    /// empty.
    pub fn pop_history(&mut self) -> Option<ScreenId> {
        let previous = self.history.pop()?;
        debug!(
            "back navigation: {} -> {}",
            self.visible.name(),
            previous.name()
        );
        self.visible = previous;
        Some(previous)
    }

    /// Drop all reversible entries. Session-state changes must not be
    /// undoable with back navigation, so the session-driven path calls this
    /// before every `show_screen`.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
