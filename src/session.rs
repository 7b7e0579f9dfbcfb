//! Provider session tracking and the session monitor.
//!
//! The identity provider owns the session; this module only tracks what the
//! provider has told us and decides which screen should be visible as a
//! result. Two pieces live here:
//!
//! - [`SessionRegistry`] — the locally known session: current
//!   [`SessionState`], the access token of the active session, and a
//!   monotonically increasing *generation* used to recognize stale async
//!   results.
//! - [`SessionMonitor`] — maps session-state changes to a target screen, but
//!   only while the surface is foregrounded. Changes that arrive while
//!   backgrounded are dropped; the app re-derives the screen from current
//!   state on the next focus gain.

use tracing::debug;

use crate::state::ScreenId;

/// Authentication state of the provider session, as last reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been opened yet.
    Unauthenticated,
    /// The provider accepted our credentials; API calls may be made.
    Opened,
    /// A previously open session was closed (logout or provider-side
    /// invalidation).
    Closed,
}

/// An open session with the provider.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    /// Identifies this particular session. Async results carry the
    /// generation they were requested under; anything tagged with an older
    /// generation is stale and must be discarded.
    pub generation: u64,
    /// Bearer token for provider API calls.
    pub token: String,
}

/// Locally tracked view of the provider session.
#[derive(Debug)]
pub struct SessionRegistry {
    state: SessionState,
    active: Option<ActiveSession>,
    next_generation: u64,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            state: SessionState::Unauthenticated,
            active: None,
            next_generation: 1,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The active session, if one is open.
    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    /// Record a newly opened session and return its generation.
    ///
    /// Opening while another session is active supersedes it: results still
    /// in flight for the old session fail the [`is_current`] check.
    ///
    /// [`is_current`]: SessionRegistry::is_current
    pub fn open(&mut self, token: String) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.state = SessionState::Opened;
        self.active = Some(ActiveSession { generation, token });
        debug!("session opened (generation {generation})");
        generation
    }

    /// Record that the session was closed.
    pub fn close(&mut self) {
        if self.active.take().is_some() {
            debug!("session closed");
        }
        self.state = SessionState::Closed;
    }

    /// Whether an async result tagged with `generation` belongs to the
    /// currently active session.
    pub fn is_current(&self, generation: u64) -> bool {
        self.active
            .as_ref()
            .is_some_and(|s| s.generation == generation)
    }
}

/// Observes session-state changes and selects the screen to show.
///
/// The monitor is only allowed to drive the UI while the hosting surface is
/// foregrounded. The `resumed` flag is explicit state, toggled by the
/// surrounding surface's lifecycle transitions (terminal focus events), not
/// inferred.
#[derive(Debug)]
pub struct SessionMonitor {
    resumed: bool,
}

impl Default for SessionMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMonitor {
    /// Monitors start paused; the surface calls [`on_resume`] once it is
    /// actually visible.
    ///
    /// [`on_resume`]: SessionMonitor::on_resume
    pub fn new() -> Self {
        Self { resumed: false }
    }

    /// The surface entered the foreground. The caller is expected to follow
    /// up with [`screen_for`](SessionMonitor::screen_for) on the *current*
    /// session state, since changes while paused were dropped.
    pub fn on_resume(&mut self) {
        self.resumed = true;
    }

    /// The surface left the foreground; state changes are ignored until the
    /// next [`on_resume`](SessionMonitor::on_resume).
    pub fn on_pause(&mut self) {
        self.resumed = false;
    }

    /// Whether the surface is currently foregrounded.
    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    /// React to a session-state change.
    ///
    /// Returns the screen that should become visible, or `None` when nothing
    /// should happen: the surface is backgrounded, or the state is neither
    /// `Opened` nor `Closed` (provider errors land here and must not crash
    /// or move screens).
    pub fn on_state_changed(&self, state: SessionState) -> Option<ScreenId> {
        if !self.resumed {
            debug!("session state change while backgrounded, dropped: {state:?}");
            return None;
        }
        match state {
            SessionState::Opened => Some(ScreenId::Main),
            SessionState::Closed => Some(ScreenId::Splash),
            SessionState::Unauthenticated => None,
        }
    }

    /// Screen for a session state, ignoring lifecycle. Used at startup and
    /// on every foreground entry to derive the screen from current state
    /// instead of replaying missed events.
    pub fn screen_for(state: SessionState) -> ScreenId {
        match state {
            SessionState::Opened => ScreenId::Main,
            _ => ScreenId::Splash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opened_maps_to_main_while_resumed() {
        let mut monitor = SessionMonitor::new();
        monitor.on_resume();
        assert_eq!(
            monitor.on_state_changed(SessionState::Opened),
            Some(ScreenId::Main)
        );
    }

    #[test]
    fn closed_maps_to_splash_while_resumed() {
        let mut monitor = SessionMonitor::new();
        monitor.on_resume();
        assert_eq!(
            monitor.on_state_changed(SessionState::Closed),
            Some(ScreenId::Splash)
        );
    }

    #[test]
    fn unauthenticated_is_a_noop() {
        let mut monitor = SessionMonitor::new();
        monitor.on_resume();
        assert_eq!(monitor.on_state_changed(SessionState::Unauthenticated), None);
    }

    #[test]
    fn changes_while_paused_are_dropped() {
        let mut monitor = SessionMonitor::new();
        monitor.on_resume();
        monitor.on_pause();
        assert_eq!(monitor.on_state_changed(SessionState::Opened), None);
        assert_eq!(monitor.on_state_changed(SessionState::Closed), None);
    }

    #[test]
    fn screen_for_derives_from_current_state() {
        assert_eq!(
            SessionMonitor::screen_for(SessionState::Opened),
            ScreenId::Main
        );
        assert_eq!(
            SessionMonitor::screen_for(SessionState::Closed),
            ScreenId::Splash
        );
        assert_eq!(
            SessionMonitor::screen_for(SessionState::Unauthenticated),
            ScreenId::Splash
        );
    }

    #[test]
    fn registry_generations_increase_per_open() {
        let mut registry = SessionRegistry::new();
        let first = registry.open("token-a".to_string());
        let second = registry.open("token-b".to_string());
        assert!(second > first);
        assert!(!registry.is_current(first));
        assert!(registry.is_current(second));
    }

    #[test]
    fn closed_registry_has_no_current_generation() {
        let mut registry = SessionRegistry::new();
        let generation = registry.open("token".to_string());
        registry.close();
        assert_eq!(registry.state(), SessionState::Closed);
        assert!(!registry.is_current(generation));
        assert!(registry.active().is_none());
    }
}
