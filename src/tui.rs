//! Terminal lifecycle wrapper.
//!
//! Owns raw mode, the alternate screen, and focus-change reporting. Focus
//! events are what drive the session monitor's resumed/paused flag, so
//! `EnableFocusChange` is part of entering the TUI, not an option.

use anyhow::{Context, Result};
use crossterm::event::{self, DisableFocusChange, EnableFocusChange, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

/// Wrapper around the ratatui terminal.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(std::io::stdout());
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;
        Ok(Self { terminal })
    }

    /// Enter the TUI: raw mode, alternate screen, focus reporting.
    pub fn enter(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        crossterm::execute!(std::io::stdout(), EnterAlternateScreen, EnableFocusChange)
            .context("Failed to enter alternate screen")?;
        self.terminal.clear().context("Failed to clear terminal")?;
        Ok(())
    }

    /// Leave the TUI and restore the terminal.
    pub fn exit(&mut self) -> Result<()> {
        crossterm::execute!(std::io::stdout(), DisableFocusChange, LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        disable_raw_mode().context("Failed to disable raw mode")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }

    /// Poll for an input event, waiting up to `timeout`.
    pub fn poll_event(&self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll events")? {
            let ev = event::read().context("Failed to read event")?;
            return Ok(Some(ev));
        }
        Ok(None)
    }

    /// Mutable access to the underlying terminal for drawing.
    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}
