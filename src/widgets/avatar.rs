//! Terminal stand-in for a profile picture.
//!
//! The provider hosts the actual images; a terminal cell can't show them, so
//! each user gets a colored swatch with their initials. The color is derived
//! from the user id, so a given friend always renders the same.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Palette the swatch color is picked from. Chosen to stay readable on both
/// dark and light terminal backgrounds.
const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Red,
];

/// An avatar swatch for one user.
#[derive(Debug, Clone)]
pub struct Avatar {
    initials: String,
    color: Color,
}

impl Avatar {
    /// Build the avatar for a user, keyed by their provider id.
    pub fn for_user(id: &str, name: &str) -> Self {
        Self {
            initials: initials(name),
            color: color_for(id),
        }
    }

    /// Render as a span, e.g. `[AL]` in the user's color.
    pub fn as_span(&self) -> Span<'static> {
        Span::styled(
            format!("[{}]", self.initials),
            Style::default()
                .fg(self.color)
                .add_modifier(Modifier::BOLD),
        )
    }
}

/// Up to two initials from a display name; `?` when the name is empty.
fn initials(name: &str) -> String {
    let mut chars = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase);
    let first = chars.next();
    let second = chars.next();
    match (first, second) {
        (Some(a), Some(b)) => format!("{a}{b}"),
        (Some(a), None) => a.to_string(),
        _ => "?".to_string(),
    }
}

/// Deterministic palette pick from a user id.
fn color_for(id: &str) -> Color {
    let hash: u64 = id
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    PALETTE[(hash % PALETTE.len() as u64) as usize]
}
