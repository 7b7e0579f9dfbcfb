//! Shared styles for the TUI.
//!
//! Kept as plain functions; the palette is small enough that a runtime theme
//! system would be overhead.

use ratatui::style::{Color, Modifier, Style};

/// List selection indicator shown next to the selected item
pub const LIST_HIGHLIGHT_SYMBOL: &str = "» ";

/// Titles and key UI accents
pub fn title() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

/// Regular body text
pub fn text() -> Style {
    Style::default().fg(Color::White)
}

/// De-emphasized text (hints, picture URLs, footers)
pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error lines
pub fn error() -> Style {
    Style::default().fg(Color::Red)
}

/// Success / signed-in indicators
pub fn success() -> Style {
    Style::default().fg(Color::Green)
}

/// Unfocused block borders
pub fn border() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Focused block borders
pub fn border_focused() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Highlight for the selected list row
pub fn list_highlight() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}
