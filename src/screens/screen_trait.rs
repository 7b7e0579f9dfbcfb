//! Screen trait and associated types.
//!
//! Screens own their state, render themselves, and translate input events
//! into [`ScreenAction`]s for the app to execute. They never mutate
//! navigation or session state directly; the app's event loop is the only
//! place those live.

use crate::config::Config;
use crate::session::SessionState;
use crate::state::ScreenId;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only context passed to screens.
pub struct ScreenContext<'a> {
    /// Application configuration.
    pub config: &'a Config,
    /// Current session state, as last reported by the provider.
    pub session_state: SessionState,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config, session_state: SessionState) -> Self {
        Self {
            config,
            session_state,
        }
    }
}

/// Actions a screen can return after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// No action needed, stay on the current screen.
    None,
    /// Submit an access token for validation against the provider.
    Login(String),
    /// Close the session and forget the stored token.
    Logout,
    /// Re-fetch profile and friend list for the active session.
    Refresh,
    /// User-driven navigation; reversible with back.
    Navigate(ScreenId),
    /// Reverse the most recent user-driven navigation.
    Back,
    /// Request to quit the application.
    Quit,
}

impl Default for ScreenAction {
    fn default() -> Self {
        Self::None
    }
}

/// Trait for screen controllers.
pub trait Screen {
    /// Render the screen into `area`.
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()>;

    /// Handle an input event and return the action the app should take.
    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Check if a text input is currently focused.
    ///
    /// When true, single-key shortcuts are disabled so users can type freely.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called when the screen becomes visible.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }
}
