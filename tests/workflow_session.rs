//! Integration tests for the session-driven screen workflows.
//!
//! Exercises the chain the TUI wires together at runtime: session state
//! changes flow through the monitor, which drives the navigator, which owns
//! the single visible screen. Covers the full observable contract:
//! foregrounded transitions, backgrounded drops with re-derivation,
//! stale-result discarding, and the empty-friend-list placeholder.

use socialite::provider::{Friend, Profile};
use socialite::screens::FriendsScreen;
use socialite::session::{SessionMonitor, SessionRegistry, SessionState};
use socialite::state::{Navigator, ScreenId};

/// Applies a session-state change the way the app's event loop does:
/// monitor decides, history is cleared, screen is shown non-reversibly.
fn deliver(monitor: &SessionMonitor, nav: &mut Navigator, state: SessionState) {
    if let Some(target) = monitor.on_state_changed(state) {
        nav.clear_history();
        nav.show_screen(target, false);
    }
}

/// Foreground re-entry: re-derive the screen from current session state.
fn refocus(monitor: &mut SessionMonitor, nav: &mut Navigator, registry: &SessionRegistry) {
    monitor.on_resume();
    nav.clear_history();
    nav.show_screen(SessionMonitor::screen_for(registry.state()), false);
}

fn friend(id: &str, name: &str) -> Friend {
    Friend {
        id: id.to_string(),
        name: name.to_string(),
        picture: None,
    }
}

// ============================================================================
// SESSION-DRIVEN TRANSITIONS (FOREGROUNDED)
// ============================================================================

#[test]
fn opened_session_shows_main_and_hides_splash() {
    // Given: fresh start, splash visible, surface foregrounded
    let mut monitor = SessionMonitor::new();
    monitor.on_resume();
    let mut nav = Navigator::new();
    assert_eq!(nav.visible(), ScreenId::Splash);

    // When: the provider reports the session opened
    deliver(&monitor, &mut nav, SessionState::Opened);

    // Then: main is the one visible screen and the change is not reversible
    assert_eq!(nav.visible(), ScreenId::Main);
    assert_eq!(nav.hidden(), vec![ScreenId::Splash]);
    assert_eq!(nav.history_depth(), 0);
}

#[test]
fn closed_session_returns_to_splash() {
    let mut monitor = SessionMonitor::new();
    monitor.on_resume();
    let mut nav = Navigator::new();
    deliver(&monitor, &mut nav, SessionState::Opened);

    // When: the provider reports the session closed
    deliver(&monitor, &mut nav, SessionState::Closed);

    // Then: splash visible, main hidden, nothing to undo
    assert_eq!(nav.visible(), ScreenId::Splash);
    assert_eq!(nav.hidden(), vec![ScreenId::Main]);
    assert_eq!(nav.history_depth(), 0);
}

#[test]
fn exactly_one_screen_visible_after_any_event_sequence() {
    let mut monitor = SessionMonitor::new();
    monitor.on_resume();
    let mut nav = Navigator::new();

    let sequence = [
        SessionState::Opened,
        SessionState::Opened,
        SessionState::Unauthenticated,
        SessionState::Closed,
        SessionState::Closed,
        SessionState::Opened,
    ];

    let mut last_selected = None;
    for state in sequence {
        deliver(&monitor, &mut nav, state);
        if monitor.on_state_changed(state).is_some() {
            last_selected = Some(state);
        }
        // Exactly one visible, the rest hidden
        assert_eq!(nav.hidden().len(), ScreenId::ALL.len() - 1);
        // Visible is Main iff the last non-ignored event was Opened
        let expect_main = last_selected == Some(SessionState::Opened);
        assert_eq!(nav.visible() == ScreenId::Main, expect_main);
    }
}

#[test]
fn error_states_do_not_move_screens() {
    let mut monitor = SessionMonitor::new();
    monitor.on_resume();
    let mut nav = Navigator::new();
    deliver(&monitor, &mut nav, SessionState::Opened);

    // When: the provider reports a state the monitor does not act on
    deliver(&monitor, &mut nav, SessionState::Unauthenticated);

    // Then: no change
    assert_eq!(nav.visible(), ScreenId::Main);
}

// ============================================================================
// LIFECYCLE: BACKGROUNDED EVENTS ARE DROPPED, REFOCUS RE-DERIVES
// ============================================================================

#[test]
fn backgrounded_events_leave_screen_untouched() {
    let mut monitor = SessionMonitor::new();
    monitor.on_resume();
    let mut nav = Navigator::new();

    // When: the surface is backgrounded and the session opens
    monitor.on_pause();
    deliver(&monitor, &mut nav, SessionState::Opened);

    // Then: still splash; nothing happened
    assert_eq!(nav.visible(), ScreenId::Splash);
}

#[test]
fn refocus_matches_current_session_state() {
    let mut monitor = SessionMonitor::new();
    monitor.on_resume();
    let mut nav = Navigator::new();
    let mut registry = SessionRegistry::new();

    // Given: session opens while backgrounded; the event was dropped
    monitor.on_pause();
    registry.open("token".to_string());
    deliver(&monitor, &mut nav, SessionState::Opened);
    assert_eq!(nav.visible(), ScreenId::Splash);

    // When: the surface comes back to the foreground
    refocus(&mut monitor, &mut nav, &registry);

    // Then: the visible screen matches the provider's current state
    assert_eq!(nav.visible(), ScreenId::Main);
}

#[test]
fn refocus_after_backgrounded_close_lands_on_splash() {
    let mut monitor = SessionMonitor::new();
    monitor.on_resume();
    let mut nav = Navigator::new();
    let mut registry = SessionRegistry::new();

    registry.open("token".to_string());
    deliver(&monitor, &mut nav, SessionState::Opened);
    assert_eq!(nav.visible(), ScreenId::Main);

    // Given: the session closes while backgrounded
    monitor.on_pause();
    registry.close();
    deliver(&monitor, &mut nav, SessionState::Closed);
    assert_eq!(nav.visible(), ScreenId::Main); // dropped

    // When/Then: refocus re-derives splash
    refocus(&mut monitor, &mut nav, &registry);
    assert_eq!(nav.visible(), ScreenId::Splash);
}

// ============================================================================
// HISTORY: SESSION CHANGES ARE NOT REVERSIBLE
// ============================================================================

#[test]
fn session_transition_clears_user_history() {
    let mut monitor = SessionMonitor::new();
    monitor.on_resume();
    let mut nav = Navigator::new();
    deliver(&monitor, &mut nav, SessionState::Opened);

    // Given: the user navigated to the account screen reversibly
    nav.show_screen(ScreenId::Splash, true);
    assert_eq!(nav.history_depth(), 1);

    // When: a session change arrives
    deliver(&monitor, &mut nav, SessionState::Closed);

    // Then: history is gone regardless of prior depth
    assert_eq!(nav.history_depth(), 0);
    assert_eq!(nav.pop_history(), None);
}

#[test]
fn user_navigation_is_reversible_until_session_changes() {
    let mut monitor = SessionMonitor::new();
    monitor.on_resume();
    let mut nav = Navigator::new();
    deliver(&monitor, &mut nav, SessionState::Opened);

    // User opens the account view, then goes back
    nav.show_screen(ScreenId::Splash, true);
    assert_eq!(nav.visible(), ScreenId::Splash);
    assert_eq!(nav.pop_history(), Some(ScreenId::Main));
    assert_eq!(nav.visible(), ScreenId::Main);
}

// ============================================================================
// STALE RESULTS
// ============================================================================

#[test]
fn results_for_superseded_sessions_are_not_current() {
    let mut registry = SessionRegistry::new();

    // Given: a fetch is issued under the first session
    let first = registry.open("token-a".to_string());

    // When: the user signs in again before the fetch resolves
    let second = registry.open("token-b".to_string());

    // Then: the old result fails the guard, the new one passes
    assert!(!registry.is_current(first));
    assert!(registry.is_current(second));
}

#[test]
fn stale_profile_result_is_dropped_not_applied() {
    let mut registry = SessionRegistry::new();
    let stale_generation = registry.open("token-a".to_string());
    registry.open("token-b".to_string());

    let mut screen = FriendsScreen::new();
    let profile = Profile {
        id: "old-user".to_string(),
        name: "Old User".to_string(),
    };

    // The app's guard: apply only when the generation is still current
    if registry.is_current(stale_generation) {
        screen.apply_profile(profile);
    }

    // Then: no UI field was updated from the stale callback
    assert_eq!(screen.profile_name(), None);
}

// ============================================================================
// FRIEND LIST CONTENT
// ============================================================================

#[test]
fn empty_friend_list_shows_placeholder_instead_of_rows() {
    let mut screen = FriendsScreen::new();
    screen.apply_friends(Vec::new());
    assert!(screen.is_showing_placeholder());
}

#[test]
fn failed_friend_fetch_is_indistinguishable_from_empty() {
    let mut empty = FriendsScreen::new();
    empty.apply_friends(Vec::new());

    let mut failed = FriendsScreen::new();
    failed.mark_friends_failed();

    assert_eq!(
        empty.is_showing_placeholder(),
        failed.is_showing_placeholder()
    );
}

#[test]
fn loaded_friends_replace_the_placeholder() {
    let mut screen = FriendsScreen::new();
    screen.apply_friends(Vec::new());
    assert!(screen.is_showing_placeholder());

    screen.apply_friends(vec![friend("1", "Ada Lovelace"), friend("2", "Alan Turing")]);
    assert!(!screen.is_showing_placeholder());
}
